pub mod cache;
pub mod fetcher;

pub use cache::{build_cacher, InMemoryCache, RedisCache};
pub use fetcher::HttpSourceFetcher;
