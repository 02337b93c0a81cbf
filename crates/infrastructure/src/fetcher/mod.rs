pub mod http;

pub use http::HttpSourceFetcher;
