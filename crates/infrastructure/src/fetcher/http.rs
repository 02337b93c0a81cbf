use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use hostscript_application::ports::SourceFetcher;
use hostscript_domain::FetchError;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::redirect::Policy;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Redirect hops followed before giving up.
pub const MAX_REDIRECTS: usize = 2;

const EXPECTED_CONTENT_TYPE: &str = "text/plain";
const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Downloads hosts files over HTTP(S) with size and content-type bounds.
#[derive(Clone)]
pub struct HttpSourceFetcher {
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        Self::with_timeout(user_agent, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(e.to_string())
    }
}

fn body_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Body(e.to_string())
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, url: &str, max_size: u64) -> Result<Bytes, FetchError> {
        let mut response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status().as_u16();
        if !(200..400).contains(&status) {
            return Err(FetchError::Status(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();
        if !content_type.starts_with(EXPECTED_CONTENT_TYPE) {
            return Err(FetchError::ContentType(content_type));
        }

        let declared = match response.headers().get(CONTENT_LENGTH) {
            None => None,
            Some(raw) => {
                let raw = String::from_utf8_lossy(raw.as_bytes());
                let size = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| FetchError::InvalidContentLength(format!("{raw}: {e}")))?;
                if size >= max_size {
                    return Err(FetchError::TooLarge {
                        size,
                        max: max_size,
                    });
                }
                Some(size)
            }
        };

        let capacity = declared
            .map(|size| size as usize)
            .unwrap_or(DEFAULT_BUFFER_CAPACITY)
            .min(max_size as usize);
        let mut buf = BytesMut::with_capacity(capacity);

        while let Some(chunk) = response.chunk().await.map_err(body_error)? {
            let size = (buf.len() + chunk.len()) as u64;
            if size >= max_size {
                return Err(FetchError::TooLarge {
                    size,
                    max: max_size,
                });
            }
            buf.extend_from_slice(&chunk);
        }

        debug!(url, bytes = buf.len(), "Source fetched");
        Ok(buf.freeze())
    }
}
