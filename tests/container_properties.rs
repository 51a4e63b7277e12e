// ==============================================
// CROSS-CONTAINER BEHAVIOR TESTS (integration)
// ==============================================
//
// Exercises the public surface of the list, the caches and the frequency
// stack together, the way a downstream crate would use them.

mod linked_list {
    use nodekit::ds::LinkedList;
    use nodekit::error::ListError;

    #[test]
    fn push_back_then_pop_back_reverses() {
        let values: Vec<u32> = (0..64).map(|i| i * 7 % 13).collect();
        let mut list = LinkedList::new();
        for &v in &values {
            list.push_back(v);
        }

        let popped: Vec<u32> = std::iter::from_fn(|| list.pop_back().ok()).collect();
        let mut expected = values.clone();
        expected.reverse();

        assert_eq!(popped, expected);
        assert!(list.is_empty());
        assert_eq!(list.pop_back(), Err(ListError::EmptyList));
    }

    #[test]
    fn removed_handle_is_stale_even_after_slot_reuse() {
        let mut list = LinkedList::new();
        let a = list.push_back("a");
        let _b = list.push_back("b");
        assert_eq!(list.remove(a), Ok("a"));

        // reuses a's slot with a new generation
        let c = list.push_front("c");
        assert_eq!(list.remove(a), Err(ListError::StaleHandle));
        assert_eq!(list.move_to_back(a), Err(ListError::StaleHandle));
        assert_eq!(list.get(a), None);
        assert_eq!(list.get(c), Some(&"c"));
        list.check_invariants().unwrap();
    }

    #[test]
    fn handles_do_not_survive_clear() {
        let mut list = LinkedList::new();
        let old = list.push_back(1);
        list.clear();
        list.push_back(2);
        assert_eq!(list.remove(old), Err(ListError::StaleHandle));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn handle_from_a_busier_list_is_invalid() {
        let mut busy = LinkedList::new();
        for i in 0..8 {
            busy.push_back(i);
        }
        let foreign = busy.push_back(99);

        let mut fresh = LinkedList::new();
        fresh.push_back(0);
        assert_eq!(fresh.remove(foreign), Err(ListError::InvalidItem));
        assert_eq!(fresh.len(), 1);
    }

    #[test]
    fn older_handle_past_every_slot_is_invalid() {
        let mut wide = LinkedList::new();
        for i in 0..3 {
            wide.push_back(i);
        }
        let foreign = wide.push_back(3);

        // one slot, recycled until its generations pass the foreign handle's
        let mut narrow = LinkedList::new();
        for i in 0..6 {
            narrow.push_back(i);
            narrow.pop_front().unwrap();
        }
        narrow.push_back(7);

        assert_eq!(narrow.remove(foreign), Err(ListError::InvalidItem));
        assert_eq!(narrow.move_to_front(foreign), Err(ListError::InvalidItem));
        assert_eq!(narrow.len(), 1);
    }

    #[test]
    fn remove_on_empty_list_reports_empty() {
        let mut list = LinkedList::new();
        let handle = list.push_back(1u8);
        list.pop_front().unwrap();
        assert_eq!(list.remove(handle), Err(ListError::EmptyList));
    }
}

mod lru_cache {
    use nodekit::error::CacheError;
    use nodekit::policy::lru::LruCache;

    #[test]
    fn third_put_evicts_first_key() {
        let mut cache = LruCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.put(3, 3);

        assert_eq!(cache.get(&1), Err(CacheError::KeyNotFound));
        assert_eq!(cache.get(&2), Ok(&2));
        assert_eq!(cache.get(&3), Ok(&3));
    }

    #[test]
    fn get_between_puts_protects_key() {
        let mut cache = LruCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        assert_eq!(cache.get(&1), Ok(&1));
        cache.put(3, 3);

        assert_eq!(cache.get(&2), Err(CacheError::KeyNotFound));
        assert_eq!(cache.get(&1), Ok(&1));
    }

    #[test]
    fn clear_forgets_everything_but_capacity() {
        let mut cache = LruCache::new(2);
        cache.put(1, 1);
        cache.put(2, 2);
        cache.clear();

        for key in [1, 2] {
            assert_eq!(cache.get(&key), Err(CacheError::KeyNotFound));
        }
        assert_eq!(cache.capacity(), 2);
    }
}

mod freq_stack {
    use nodekit::ds::FreqStack;
    use nodekit::error::StackError;

    fn push_then_pop_all(pushes: &[i32]) -> Vec<i32> {
        let mut stack = FreqStack::new();
        for &v in pushes {
            stack.push(v);
        }
        let popped = (0..pushes.len())
            .map(|_| stack.pop().unwrap())
            .collect();
        assert_eq!(stack.pop(), Err(StackError::EmptyStack));
        popped
    }

    #[test]
    fn distinct_values_pop_as_lifo() {
        assert_eq!(push_then_pop_all(&[1, 2, 3]), vec![3, 2, 1]);
    }

    #[test]
    fn most_frequent_pops_first() {
        assert_eq!(push_then_pop_all(&[1, 2, 2, 3]), vec![2, 3, 2, 1]);
    }

    #[test]
    fn frequency_ties_break_by_recency() {
        assert_eq!(
            push_then_pop_all(&[1, 2, 2, 3, 3, 1, 1, 4]),
            vec![1, 1, 3, 2, 4, 3, 2, 1]
        );
    }

    #[test]
    fn fresh_stack_is_empty() {
        let mut stack: FreqStack<String> = FreqStack::new();
        assert_eq!(stack.pop(), Err(StackError::EmptyStack));
        assert_eq!(stack.max_frequency(), 0);
    }

    #[test]
    fn invariants_hold_over_interleaving() {
        let mut stack = FreqStack::new();
        let mut held = 0usize;
        for step in 0u32..500 {
            if step % 3 == 2 {
                if stack.pop().is_ok() {
                    held -= 1;
                }
            } else {
                stack.push(step % 5);
                held += 1;
            }
            assert_eq!(stack.len(), held);
            stack.check_invariants().unwrap();
        }
    }
}

mod generic_policies {
    use nodekit::builder::{CacheBuilder, CachePolicy};
    use nodekit::policy::{LfuCache, LruCache};
    use nodekit::traits::{CoreCache, MutableCache};

    fn churn<C: MutableCache<u32, u32>>(cache: &mut C) {
        for i in 0..100 {
            cache.put(i % 7, i);
            let _ = cache.get(&(i % 3));
            if i % 11 == 0 {
                cache.remove(&(i % 5));
            }
            assert!(cache.len() <= cache.capacity());
        }
    }

    #[test]
    fn both_policies_respect_capacity_under_churn() {
        let mut lru = LruCache::new(4);
        let mut lfu = LfuCache::new(4);
        churn(&mut lru);
        churn(&mut lfu);
        lru.check_invariants().unwrap();
        lfu.check_invariants().unwrap();

        let mut erased = CacheBuilder::new(4).build::<u32, u32>(CachePolicy::Lfu);
        churn(&mut erased);
        assert!(CoreCache::len(&erased) <= 4);
    }
}
