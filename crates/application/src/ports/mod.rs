pub mod cacher;
pub mod source_fetcher;

pub use cacher::{CacheLookup, Cacher};
pub use source_fetcher::SourceFetcher;
