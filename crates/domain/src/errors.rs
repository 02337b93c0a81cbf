use thiserror::Error;

/// Errors returned by `Cacher` implementations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("empty key")]
    EmptyKey,

    #[error("empty data")]
    EmptyData,

    #[error("cache closed")]
    Closed,

    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache operation timed out")]
    Timeout,

    #[error("entry lifetime out of range")]
    TtlOutOfRange,
}

/// Remote source retrieval failures. Every variant is non-fatal for a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("wrong response code: {0}")]
    Status(u16),

    #[error("wrong Content-Type response header [{0}] (text/plain* is required)")]
    ContentType(String),

    #[error("header Content-Length parsing error: {0}")]
    InvalidContentLength(String),

    #[error("content length [{size}] is too big (max: {max})")]
    TooLarge { size: u64, max: u64 },

    #[error("response body reading failed: {0}")]
    Body(String),

    #[error("request timed out")]
    Timeout,
}

/// Query parameter problems detected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("required parameter 'sources_urls' was not found")]
    MissingSources,

    #[error("empty sources list")]
    EmptySources,

    #[error("too many sources (only {0} is allowed)")]
    TooManySources(usize),

    #[error("too many excluded hosts (more than {0})")]
    TooManyExcludedHosts(usize),

    #[error("wrong 'limit' value")]
    InvalidLimit,

    #[error("wrong 'redirect_to' value (invalid IP address)")]
    InvalidRedirect,

    #[error("unsupported format [{0}] requested")]
    UnsupportedFormat(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Query parameters validation failed: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("Source fetch error: {0}")]
    SourceFetch(#[from] FetchError),

    #[error("Source parse error: {0}")]
    SourceParse(String),

    #[error("Script rendering error: {0}")]
    Render(String),

    #[error("Script generation failed (empty hosts list)")]
    EmptyHostsList,

    #[error("Context error: request cancelled")]
    Cancelled,

    #[error("Source task failed: {0}")]
    TaskFailed(String),
}
