pub mod factory;
pub mod in_memory;
pub mod redis;
pub mod sweeper;

pub use factory::build_cacher;
pub use in_memory::{CacheEntry, InMemoryCache};
pub use redis::RedisCache;
pub use sweeper::CacheSweeper;
