//! Generational slot arena.
//!
//! Values live in a `Vec` of slots addressed by [`SlotId`]. Vacated slots go on
//! a free list and are reused by later inserts. Every insert stamps its slot
//! with a fresh generation taken from a per-arena counter that is never reset,
//! so an id that outlived its value (or the whole arena contents, after
//! [`clear`](SlotArena::clear)) is rejected instead of aliasing the new
//! occupant.
//!
//! ```text
//!   slots: [ {gen 4, Some(a)} | {gen 2, None} | {gen 3, Some(c)} ]
//!   free_list: [1]          next_generation: 5
//!
//!   SlotId(0, 4) -> a        SlotId(1, 2) -> stale
//!   SlotId(0, 1) -> stale    SlotId(7, 9) -> never issued
//! ```

/// Stable handle into a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: usize,
    generation: u64,
}

impl SlotId {
    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index
    }

    /// Generation stamped on the slot when this id was issued.
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Result of resolving a [`SlotId`] that does not name a live value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotLookup {
    /// The id is live.
    Live,
    /// The id was issued by this arena but its value has been removed.
    Stale,
    /// The id was never issued by this arena.
    Foreign,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
    next_generation: u64,
    // most slots ever allocated; survives `clear`
    high_water: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            next_generation: 0,
            high_water: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
            next_generation: 0,
            high_water: 0,
        }
    }

    pub fn insert(&mut self, value: T) -> SlotId {
        let generation = self.next_generation;
        self.next_generation += 1;

        let index = if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index];
            slot.generation = generation;
            slot.value = Some(value);
            index
        } else {
            self.slots.push(Slot {
                generation,
                value: Some(value),
            });
            self.high_water = self.high_water.max(self.slots.len());
            self.slots.len() - 1
        };
        self.len += 1;
        SlotId { index, generation }
    }

    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        self.free_list.push(id.index);
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    /// Classifies `id` as live, stale, or foreign.
    pub fn lookup(&self, id: SlotId) -> SlotLookup {
        if id.generation >= self.next_generation || id.index >= self.high_water {
            return SlotLookup::Foreign;
        }
        if self.contains(id) {
            SlotLookup::Live
        } else {
            SlotLookup::Stale
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every value. The generation counter keeps running, so ids issued
    /// before the clear stay stale forever.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}
