#![no_main]

use libfuzzer_sys::fuzz_target;
use nodekit::ds::LinkedList;
use nodekit::error::ListError;

// Fuzz arbitrary operation sequences on LinkedList
//
// Handles are kept after removal and clear, so stale handles are replayed
// against the list and must come back as errors.
fuzz_target!(|data: &[u8]| {
    let mut list: LinkedList<u32> = LinkedList::new();
    let mut all_ids = Vec::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 9;
        let value = u32::from(chunk[1]);

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.front(), Some(&value));
                assert_eq!(list.get(id), Some(&value));
            }
            1 => {
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
                assert_eq!(list.get(id), Some(&value));
            }
            2 => {
                let old_len = list.len();
                match list.pop_front() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(err) => {
                        assert_eq!(err, ListError::EmptyList);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            3 => {
                let old_len = list.len();
                match list.pop_back() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(err) => {
                        assert_eq!(err, ListError::EmptyList);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            4 | 5 | 6 => {
                if all_ids.is_empty() {
                    continue;
                }
                let id = all_ids[(value as usize) % all_ids.len()];
                let was_live = list.contains(id);
                let old_len = list.len();

                let result = match op {
                    4 => list.move_to_front(id).map(|()| {
                        assert_eq!(list.front_handle(), Some(id));
                    }),
                    5 => list.move_to_back(id).map(|()| {
                        assert_eq!(list.back_handle(), Some(id));
                    }),
                    _ => list.remove(id).map(|_| {
                        assert_eq!(list.len(), old_len - 1);
                        assert!(!list.contains(id));
                    }),
                };
                assert_eq!(result.is_ok(), was_live);
                if let Err(err) = result {
                    assert!(matches!(err, ListError::EmptyList | ListError::StaleHandle));
                }
            }
            7 => {
                let found = list.search(|v| *v == value);
                assert_eq!(found.is_ok(), list.iter().any(|v| *v == value));
            }
            8 => {
                list.clear();
                assert!(list.is_empty());
                assert_eq!(list.front(), None);
                assert_eq!(list.back(), None);
            }
            _ => unreachable!(),
        }

        assert!(list.check_invariants().is_ok());
    }
});
