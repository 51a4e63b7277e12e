use nodekit::builder::{CacheBuilder, CachePolicy};
use nodekit::error::ConfigError;
use nodekit::policy::lru::LruCache;

fn main() -> Result<(), ConfigError> {
    let mut cache: LruCache<u32, &str> = LruCache::try_new(2)?;

    cache.put(1, "alpha");
    cache.put(2, "beta");
    if let Ok(value) = cache.get(&1) {
        println!("get(1) = {value}");
    }

    // 2 is least recently used now
    cache.put(3, "gamma");
    println!("get(2) after put(3): {:?}", cache.get(&2));
    println!("recency order: {:?}", cache.keys().collect::<Vec<_>>());

    let mut lfu = CacheBuilder::new(2).try_build::<&str, u32>(CachePolicy::Lfu)?;
    lfu.put("hot", 1);
    lfu.put("cold", 2);
    let _ = lfu.get(&"hot");
    lfu.put("new", 3);
    println!("lfu kept hot: {}, kept cold: {}", lfu.contains(&"hot"), lfu.contains(&"cold"));

    match CacheBuilder::new(0).try_build::<u32, u32>(CachePolicy::Lru) {
        Ok(_) => println!("unexpected: zero capacity accepted"),
        Err(err) => println!("zero capacity rejected: {err}"),
    }

    Ok(())
}
