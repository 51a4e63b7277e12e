//! Node-addressable doubly linked list backed by `SlotArena`.
//!
//! Nodes live in a [`SlotArena`] and link to each other by arena id, so the
//! list hands out [`NodeHandle`]s that stay valid until their node is removed.
//! Callers that keep a handle (caches, frequency buckets) can unlink or
//! relocate that node in O(1) without searching.
//!
//! ## Architecture
//!
//! ```text
//!   arena (SlotArena<Node<T>>)
//!   ┌──────────┬─────────────────────────────────────────────┐
//!   │ handle   │ Node { value, prev, next }                  │
//!   ├──────────┼─────────────────────────────────────────────┤
//!   │ (0, g0)  │ { value: A, prev: None, next: (1, g1) }     │
//!   │ (1, g1)  │ { value: B, prev: (0, g0), next: (2, g2) }  │
//!   │ (2, g2)  │ { value: C, prev: (1, g1), next: None }     │
//!   └──────────┴─────────────────────────────────────────────┘
//!
//!   head ─► [A] ◄──► [B] ◄──► [C] ◄── tail
//! ```
//!
//! ## Handle validity
//!
//! A handle is `(slot index, generation)`. Removing a node retires its
//! generation; a later node reusing the slot gets a new one. Operations that
//! take a handle report:
//!
//! - [`ListError::EmptyList`] when the list has no nodes,
//! - [`ListError::InvalidItem`] when the handle was never issued by this list,
//! - [`ListError::StaleHandle`] when the handle's node was already removed.
//!
//! ## Performance
//! - `push_front` / `push_back` / `pop_front` / `pop_back`: O(1)
//! - `remove` / `move_to_front` / `move_to_back`: O(1)
//! - `search` / `get_at` / `remove_value` / `iter`: O(n)
//!
//! ## Example
//!
//! ```
//! use nodekit::ds::LinkedList;
//! use nodekit::error::ListError;
//!
//! let mut list = LinkedList::new();
//! let a = list.push_back("a");
//! list.push_back("b");
//! list.push_back("c");
//!
//! list.move_to_back(a).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec!["b", "c", "a"]);
//!
//! assert_eq!(list.remove(a), Ok("a"));
//! assert_eq!(list.remove(a), Err(ListError::StaleHandle));
//! ```

use std::fmt;

use crate::ds::slot_arena::{SlotArena, SlotId, SlotLookup};
use crate::error::{InvariantError, ListError};

/// Opaque reference to one node of a [`LinkedList`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(SlotId);

impl fmt::Debug for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({}v{})", self.0.index(), self.0.generation())
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeHandle>,
    next: Option<NodeHandle>,
}

/// Doubly linked list that stores nodes in a `SlotArena` and links them by handle.
#[derive(Debug)]
pub struct LinkedList<T> {
    arena: SlotArena<Node<T>>,
    head: Option<NodeHandle>,
    tail: Option<NodeHandle>,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            arena: SlotArena::new(),
            head: None,
            tail: None,
        }
    }

    /// Creates an empty list with reserved node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: SlotArena::with_capacity(capacity),
            head: None,
            tail: None,
        }
    }

    /// Returns the number of nodes in the list.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns `true` if `handle` names a node currently in this list.
    pub fn contains(&self, handle: NodeHandle) -> bool {
        self.arena.contains(handle.0)
    }

    /// Returns the value at the front of the list.
    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|h| self.get(h))
    }

    /// Returns the handle of the front node.
    pub fn front_handle(&self) -> Option<NodeHandle> {
        self.head
    }

    /// Returns the value at the back of the list.
    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|h| self.get(h))
    }

    /// Returns the handle of the back node.
    pub fn back_handle(&self) -> Option<NodeHandle> {
        self.tail
    }

    /// Returns the value stored at `handle`, if the node is still present.
    pub fn get(&self, handle: NodeHandle) -> Option<&T> {
        self.arena.get(handle.0).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored at `handle`.
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut T> {
        self.arena.get_mut(handle.0).map(|node| &mut node.value)
    }

    /// Inserts a new node at the front and returns its handle.
    pub fn push_front(&mut self, value: T) -> NodeHandle {
        let handle = NodeHandle(self.arena.insert(Node {
            value,
            prev: None,
            next: self.head,
        }));
        match self.head {
            Some(head) => self.set_prev(head, Some(handle)),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
        handle
    }

    /// Inserts a new node at the back and returns its handle.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let handle = NodeHandle(self.arena.insert(Node {
            value,
            prev: self.tail,
            next: None,
        }));
        match self.tail {
            Some(tail) => self.set_next(tail, Some(handle)),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
        handle
    }

    /// Inserts a new node directly after `anchor` and returns its handle.
    ///
    /// Same error rules as [`remove`](Self::remove) for `anchor`.
    pub fn insert_after(&mut self, anchor: NodeHandle, value: T) -> Result<NodeHandle, ListError> {
        self.resolve(anchor)?;
        let next = self.arena.get(anchor.0).and_then(|node| node.next);
        let handle = NodeHandle(self.arena.insert(Node {
            value,
            prev: Some(anchor),
            next,
        }));
        self.set_next(anchor, Some(handle));
        match next {
            Some(next) => self.set_prev(next, Some(handle)),
            None => self.tail = Some(handle),
        }
        Ok(handle)
    }

    /// Appends `value` at the back, discarding the handle.
    pub fn append(&mut self, value: T) {
        self.push_back(value);
    }

    /// Removes and returns the front value.
    pub fn pop_front(&mut self) -> Result<T, ListError> {
        let handle = self.head.ok_or(ListError::EmptyList)?;
        self.unlink(handle)
    }

    /// Removes and returns the back value.
    pub fn pop_back(&mut self) -> Result<T, ListError> {
        let handle = self.tail.ok_or(ListError::EmptyList)?;
        self.unlink(handle)
    }

    /// Removes and returns the back value; alias of [`pop_back`](Self::pop_back).
    pub fn pop(&mut self) -> Result<T, ListError> {
        self.pop_back()
    }

    /// Removes the node named by `handle` and returns its value.
    pub fn remove(&mut self, handle: NodeHandle) -> Result<T, ListError> {
        self.resolve(handle)?;
        self.unlink(handle)
    }

    /// Moves an existing node to the front. The handle stays valid.
    pub fn move_to_front(&mut self, handle: NodeHandle) -> Result<(), ListError> {
        self.resolve(handle)?;
        if Some(handle) != self.head {
            self.detach(handle);
            self.attach_front(handle);
        }
        Ok(())
    }

    /// Moves an existing node to the back. The handle stays valid.
    pub fn move_to_back(&mut self, handle: NodeHandle) -> Result<(), ListError> {
        self.resolve(handle)?;
        if Some(handle) != self.tail {
            self.detach(handle);
            self.attach_back(handle);
        }
        Ok(())
    }

    /// Returns the handle of the first node, from the front, whose value
    /// satisfies `predicate`.
    pub fn search<F>(&self, mut predicate: F) -> Result<NodeHandle, ListError>
    where
        F: FnMut(&T) -> bool,
    {
        self.iter_entries()
            .find(|(_, value)| predicate(value))
            .map(|(handle, _)| handle)
            .ok_or(ListError::ItemNotFound)
    }

    /// Returns the value at 0-based position `index`, counting from the front.
    pub fn get_at(&self, index: usize) -> Result<&T, ListError> {
        self.iter().nth(index).ok_or(ListError::ItemNotFound)
    }

    /// Calls `f` with each value and its 0-based position, front to back.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T, usize),
    {
        for (idx, value) in self.iter().enumerate() {
            f(value, idx);
        }
    }

    /// Removes all nodes.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.tail = None;
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of handles from front to back.
    pub fn iter_handles(&self) -> Handles<'_, T> {
        Handles {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator of `(handle, &value)` from front to back.
    pub fn iter_entries(&self) -> Entries<'_, T> {
        Entries {
            list: self,
            current: self.head,
        }
    }

    /// Walks the links and verifies head/tail/length consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.head.is_none() || self.tail.is_none() {
            if self.head.is_some() || self.tail.is_some() {
                return Err(InvariantError::new("only one of head/tail is set"));
            }
            if !self.is_empty() {
                return Err(InvariantError::new(format!(
                    "empty links but len = {}",
                    self.len()
                )));
            }
            return Ok(());
        }

        let mut count = 0usize;
        let mut prev = None;
        let mut current = self.head;
        while let Some(handle) = current {
            let node = self
                .arena
                .get(handle.0)
                .ok_or_else(|| InvariantError::new(format!("{:?} is linked but vacant", handle)))?;
            if node.prev != prev {
                return Err(InvariantError::new(format!(
                    "{:?}.prev = {:?}, expected {:?}",
                    handle, node.prev, prev
                )));
            }
            if node.next.is_none() && self.tail != Some(handle) {
                return Err(InvariantError::new("last reachable node is not the tail"));
            }
            count += 1;
            if count > self.len() {
                return Err(InvariantError::new("cycle detected in list"));
            }
            prev = Some(handle);
            current = node.next;
        }

        if count != self.len() {
            return Err(InvariantError::new(format!(
                "{} nodes reachable from head, len = {}",
                count,
                self.len()
            )));
        }
        if count == 1 && self.head != self.tail {
            return Err(InvariantError::new("single node but head != tail"));
        }
        Ok(())
    }

    fn resolve(&self, handle: NodeHandle) -> Result<(), ListError> {
        if self.is_empty() {
            return Err(ListError::EmptyList);
        }
        match self.arena.lookup(handle.0) {
            SlotLookup::Live => Ok(()),
            SlotLookup::Stale => Err(ListError::StaleHandle),
            SlotLookup::Foreign => Err(ListError::InvalidItem),
        }
    }

    fn unlink(&mut self, handle: NodeHandle) -> Result<T, ListError> {
        self.detach(handle);
        self.arena
            .remove(handle.0)
            .map(|node| node.value)
            .ok_or(ListError::StaleHandle)
    }

    fn set_prev(&mut self, handle: NodeHandle, prev: Option<NodeHandle>) {
        if let Some(node) = self.arena.get_mut(handle.0) {
            node.prev = prev;
        }
    }

    fn set_next(&mut self, handle: NodeHandle, next: Option<NodeHandle>) {
        if let Some(node) = self.arena.get_mut(handle.0) {
            node.next = next;
        }
    }

    fn detach(&mut self, handle: NodeHandle) {
        let (prev, next) = match self.arena.get(handle.0) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(prev) => self.set_next(prev, next),
            None => self.head = next,
        }
        match next {
            Some(next) => self.set_prev(next, prev),
            None => self.tail = prev,
        }

        if let Some(node) = self.arena.get_mut(handle.0) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, handle: NodeHandle) {
        let old_head = self.head;
        if let Some(node) = self.arena.get_mut(handle.0) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(old_head) => self.set_prev(old_head, Some(handle)),
            None => self.tail = Some(handle),
        }
        self.head = Some(handle);
    }

    fn attach_back(&mut self, handle: NodeHandle) {
        let old_tail = self.tail;
        if let Some(node) = self.arena.get_mut(handle.0) {
            node.next = None;
            node.prev = old_tail;
        }
        match old_tail {
            Some(old_tail) => self.set_next(old_tail, Some(handle)),
            None => self.head = Some(handle),
        }
        self.tail = Some(handle);
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Removes the first node, from the front, whose value equals `value`.
    pub fn remove_value(&mut self, value: &T) -> Result<T, ListError> {
        let handle = self.search(|candidate| candidate == value)?;
        self.unlink(handle)
    }
}

/// Iterator over values from front to back.
pub struct Iter<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeHandle>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.list.arena.get(handle.0)?;
        self.current = node.next;
        Some(&node.value)
    }
}

/// Iterator over handles from front to back.
pub struct Handles<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeHandle>,
}

impl<'a, T> Iterator for Handles<'a, T> {
    type Item = NodeHandle;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.list.arena.get(handle.0)?;
        self.current = node.next;
        Some(handle)
    }
}

/// Iterator over `(handle, &value)` pairs from front to back.
pub struct Entries<'a, T> {
    list: &'a LinkedList<T>,
    current: Option<NodeHandle>,
}

impl<'a, T> Iterator for Entries<'a, T> {
    type Item = (NodeHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.current?;
        let node = self.list.arena.get(handle.0)?;
        self.current = node.next;
        Some((handle, &node.value))
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values<T: Copy>(list: &LinkedList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn linked_list_basic_ops() {
        let mut list = LinkedList::new();
        let a = list.push_front("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.front(), Some(&"a"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.len(), 3);

        list.move_to_front(c).unwrap();
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"b"));

        assert_eq!(list.remove(b), Ok("b"));
        assert_eq!(list.len(), 2);

        assert_eq!(list.pop_front(), Ok("c"));
        assert_eq!(list.pop_back(), Ok("a"));
        assert!(list.is_empty());

        assert!(!list.contains(a));
        list.check_invariants().unwrap();
    }

    #[test]
    fn push_back_pop_back_round_trip() {
        let input = [1, 2, 3, 4, 5, 6, 7, 9];
        let mut list = LinkedList::new();
        for v in input {
            list.append(v);
        }
        assert_eq!(list.len(), input.len());

        list.for_each(|value, idx| {
            assert_eq!(list.get_at(idx), Ok(value));
            assert_eq!(*value, input[idx]);
        });

        for expected in input.iter().rev() {
            assert_eq!(list.pop(), Ok(*expected));
        }
        assert!(list.is_empty());
        assert_eq!(list.pop(), Err(ListError::EmptyList));
        assert_eq!(list.pop_front(), Err(ListError::EmptyList));
    }

    #[test]
    fn remove_value_first_match() {
        let mut list: LinkedList<i32> = [1, 2, 3, 2].into_iter().collect();
        assert_eq!(list.remove_value(&2), Ok(2));
        assert_eq!(values(&list), vec![1, 3, 2]);
        assert_eq!(list.remove_value(&9), Err(ListError::ItemNotFound));
        list.check_invariants().unwrap();
    }

    #[test]
    fn remove_value_on_empty_list_is_not_found() {
        let mut list: LinkedList<i32> = LinkedList::new();
        assert_eq!(list.remove_value(&0), Err(ListError::ItemNotFound));
    }

    #[test]
    fn remove_middle_and_ends() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.remove(b), Ok("b"));
        assert_eq!(values(&list), vec!["a", "c"]);

        assert_eq!(list.remove(a), Ok("a"));
        assert_eq!(list.front(), Some(&"c"));
        assert_eq!(list.back(), Some(&"c"));
        assert_eq!(list.front_handle(), list.back_handle());

        assert_eq!(list.remove(c), Ok("c"));
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
    }

    #[test]
    fn remove_on_empty_list_reports_empty() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        list.pop_back().unwrap();
        assert_eq!(list.remove(a), Err(ListError::EmptyList));
    }

    #[test]
    fn stale_handle_after_remove_and_reuse() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        list.push_back(2);
        assert_eq!(list.remove(a), Ok(1));

        // Slot of `a` gets reused by the next node.
        let c = list.push_back(3);
        assert_eq!(list.get(a), None);
        assert_eq!(list.remove(a), Err(ListError::StaleHandle));
        assert_eq!(list.move_to_front(a), Err(ListError::StaleHandle));
        assert_eq!(list.get(c), Some(&3));
        assert_eq!(values(&list), vec![2, 3]);
        list.check_invariants().unwrap();
    }

    #[test]
    fn stale_handle_after_clear() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        list.clear();
        list.push_back("b");
        assert_eq!(list.remove(a), Err(ListError::StaleHandle));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn foreign_handle_is_invalid_item() {
        let mut other = LinkedList::new();
        other.push_back(0);
        other.push_back(0);
        let foreign = other.push_back(0);

        let mut list = LinkedList::new();
        list.push_back(1);
        assert_eq!(list.remove(foreign), Err(ListError::InvalidItem));
        assert_eq!(list.move_to_back(foreign), Err(ListError::InvalidItem));
    }

    #[test]
    fn move_to_front_back_edges() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        list.move_to_front(a).unwrap();
        assert_eq!(values(&list), vec!["a", "b", "c"]);

        list.move_to_back(a).unwrap();
        assert_eq!(values(&list), vec!["b", "c", "a"]);

        list.move_to_front(c).unwrap();
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        assert!(list.contains(b));
        assert_eq!(list.get(a), Some(&"a"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn insert_after_links_between_neighbours() {
        let mut list = LinkedList::new();
        let a = list.push_back(1);
        let c = list.push_back(3);

        let b = list.insert_after(a, 2).unwrap();
        let d = list.insert_after(c, 4).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3, 4]);
        assert_eq!(list.back_handle(), Some(d));
        assert_eq!(list.get(b), Some(&2));
        list.check_invariants().unwrap();

        list.remove(c).unwrap();
        assert_eq!(list.insert_after(c, 9), Err(ListError::StaleHandle));
        assert_eq!(values(&list), vec![1, 2, 4]);
    }

    #[test]
    fn search_and_get_at() {
        let list: LinkedList<i32> = (10..15).collect();
        let handle = list.search(|v| *v % 4 == 0).unwrap();
        assert_eq!(list.get(handle), Some(&12));
        assert_eq!(list.search(|v| *v > 100), Err(ListError::ItemNotFound));

        assert_eq!(list.get_at(0), Ok(&10));
        assert_eq!(list.get_at(4), Ok(&14));
        assert_eq!(list.get_at(5), Err(ListError::ItemNotFound));
    }

    #[test]
    fn clear_resets_state() {
        let mut list = LinkedList::new();
        list.push_back(1);
        list.push_back(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), Err(ListError::EmptyList));
        assert_eq!(list.pop_back(), Err(ListError::EmptyList));
        list.check_invariants().unwrap();
    }

    #[test]
    fn get_mut_updates_value() {
        let mut list = LinkedList::new();
        let id = list.push_back(10);
        if let Some(value) = list.get_mut(id) {
            *value = 20;
        }
        assert_eq!(list.get(id), Some(&20));
    }

    #[test]
    fn handle_and_entry_iters() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        let b = list.push_back("b");
        let c = list.push_back("c");

        assert_eq!(list.front_handle(), Some(a));
        assert_eq!(list.back_handle(), Some(c));

        let handles: Vec<_> = list.iter_handles().collect();
        assert_eq!(handles, vec![a, b, c]);

        let entries: Vec<_> = list.iter_entries().map(|(h, v)| (h, *v)).collect();
        assert_eq!(entries, vec![(a, "a"), (b, "b"), (c, "c")]);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    #[derive(Debug, Clone)]
    enum Op {
        PushFront(u8),
        PushBack(u8),
        PopFront,
        PopBack,
        Remove(usize),
        MoveToFront(usize),
        MoveToBack(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<u8>().prop_map(Op::PushFront),
            any::<u8>().prop_map(Op::PushBack),
            Just(Op::PopFront),
            Just(Op::PopBack),
            any::<usize>().prop_map(Op::Remove),
            any::<usize>().prop_map(Op::MoveToFront),
            any::<usize>().prop_map(Op::MoveToBack),
        ]
    }

    proptest! {
        /// Property: the list matches a VecDeque model under any op sequence,
        /// and invariants hold after every step.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_vecdeque_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
            let mut list = LinkedList::new();
            // Model stores (handle, value) so handle ops can be mirrored.
            let mut model: VecDeque<(NodeHandle, u8)> = VecDeque::new();

            for op in ops {
                match op {
                    Op::PushFront(v) => {
                        let h = list.push_front(v);
                        model.push_front((h, v));
                    }
                    Op::PushBack(v) => {
                        let h = list.push_back(v);
                        model.push_back((h, v));
                    }
                    Op::PopFront => {
                        let expected = model.pop_front().map(|(_, v)| v).ok_or(ListError::EmptyList);
                        prop_assert_eq!(list.pop_front(), expected);
                    }
                    Op::PopBack => {
                        let expected = model.pop_back().map(|(_, v)| v).ok_or(ListError::EmptyList);
                        prop_assert_eq!(list.pop_back(), expected);
                    }
                    Op::Remove(i) if !model.is_empty() => {
                        let (h, v) = model.remove(i % model.len()).unwrap();
                        prop_assert_eq!(list.remove(h), Ok(v));
                        prop_assert_eq!(list.remove(h), Err(if model.is_empty() {
                            ListError::EmptyList
                        } else {
                            ListError::StaleHandle
                        }));
                    }
                    Op::MoveToFront(i) if !model.is_empty() => {
                        let entry = model.remove(i % model.len()).unwrap();
                        prop_assert_eq!(list.move_to_front(entry.0), Ok(()));
                        model.push_front(entry);
                    }
                    Op::MoveToBack(i) if !model.is_empty() => {
                        let entry = model.remove(i % model.len()).unwrap();
                        prop_assert_eq!(list.move_to_back(entry.0), Ok(()));
                        model.push_back(entry);
                    }
                    _ => {}
                }

                prop_assert!(list.check_invariants().is_ok());
                prop_assert_eq!(list.len(), model.len());
                let actual: Vec<u8> = list.iter().copied().collect();
                let expected: Vec<u8> = model.iter().map(|(_, v)| *v).collect();
                prop_assert_eq!(actual, expected);
            }
        }
    }
}
