#![no_main]

use libfuzzer_sys::fuzz_target;
use nodekit::error::CacheError;
use nodekit::policy::lru::LruCache;

// Fuzz arbitrary operation sequences on LruCache
//
// First byte picks the capacity; the rest is (op, key) pairs.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, ops)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 16) + 1;
    let mut cache: LruCache<u8, u16> = LruCache::new(capacity);

    for (step, chunk) in ops.chunks_exact(2).enumerate() {
        let key = chunk[1] % 32;
        match chunk[0] % 6 {
            0 => {
                let existed = cache.contains(&key);
                let previous = cache.put(key, step as u16);
                assert_eq!(previous.is_some(), existed);
                assert_eq!(cache.keys().next(), Some(&key));
            }
            1 => match cache.get(&key) {
                Ok(_) => assert_eq!(cache.recency_rank(&key), Some(0)),
                Err(err) => assert_eq!(err, CacheError::KeyNotFound),
            },
            2 => {
                let before = cache.keys().copied().collect::<Vec<_>>();
                let _ = cache.peek(&key);
                assert_eq!(cache.keys().copied().collect::<Vec<_>>(), before);
            }
            3 => {
                let removed = cache.remove(&key);
                assert!(removed.is_none() || !cache.contains(&key));
            }
            4 => {
                let expected = cache.peek_lru().map(|(k, v)| (*k, *v));
                assert_eq!(cache.pop_lru(), expected);
            }
            5 => {
                cache.clear();
                assert!(cache.is_empty());
                assert_eq!(cache.capacity(), capacity);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        assert!(cache.check_invariants().is_ok());
    }
});
