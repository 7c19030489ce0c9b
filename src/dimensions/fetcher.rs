//! Remote GET capability used to probe image dimensions
//!
//! ## Architecture
//!
//! The extractor only depends on [`RemoteFetcher`]. Two implementations ship:
//! - [`HttpFetcher`] - streaming `reqwest` download that stops once the image header is readable
//! - [`StubFetcher`] - fixed `url -> canned response` table for deterministic tests
//!
//! ## Usage
//!
//! ```ignore
//! use amp_sanitizer::dimensions::{HttpFetcher, RemoteFetcher};
//! use amp_sanitizer::SanitizerConfig;
//!
//! let fetcher = HttpFetcher::new(&SanitizerConfig::default());
//! let bytes = fetcher.get("https://example.com/a.png").await?;
//! ```

use dashmap::DashMap;
use futures::StreamExt;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

use super::probe::probe_dimensions;
use super::types::FetchFuture;
use crate::config::SanitizerConfig;
use crate::error::FetchError;

/// GET capability: fetch the bytes behind a URL
pub trait RemoteFetcher: Send + Sync {
    fn get<'a>(&'a self, url: &'a str) -> FetchFuture<'a>;
}

/// `reqwest`-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: usize,
    user_agent: String,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(config: &SanitizerConfig) -> Self {
        // Client already uses Arc internally, so clones share one pool
        Self::with_client(Client::new(), config)
    }

    #[must_use]
    pub fn with_client(client: Client, config: &SanitizerConfig) -> Self {
        Self {
            client,
            timeout: config.fetch_timeout(),
            max_bytes: config.max_image_bytes(),
            user_agent: config.user_agent().to_string(),
        }
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "image/avif,image/webp,image/apng,image/*,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        let expected_size = response.content_length();
        let capacity = expected_size.map_or(0, |size| size.min(self.max_bytes as u64) as usize);
        let mut buffer = Vec::with_capacity(capacity);
        let mut received: u64 = 0;

        // Only the header matters; stop as soon as the dimensions are readable
        // and never keep more than `max_bytes` while looking for them.
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result.map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: format!("Failed to read image chunk: {e}"),
            })?;
            received += chunk.len() as u64;

            let room = self.max_bytes.saturating_sub(buffer.len());
            let take = chunk.len().min(room);
            buffer.extend_from_slice(&chunk[..take]);

            if probe_dimensions(url, &buffer).is_ok() {
                log::debug!("Image header readable after {} bytes: {url}", buffer.len());
                return Ok(buffer);
            }

            if take < chunk.len() {
                return Err(FetchError::TooLarge {
                    url: url.to_string(),
                    size: expected_size.unwrap_or(received).max(received),
                    limit: self.max_bytes,
                });
            }
        }

        Ok(buffer)
    }
}

impl RemoteFetcher for HttpFetcher {
    fn get<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(self.fetch(url))
    }
}

/// Deterministic fetcher serving canned responses
///
/// Requesting a URL that was never registered is a configuration error
/// ([`FetchError::UnmappedUrl`]), which the extractor does not swallow.
#[derive(Debug, Default)]
pub struct StubFetcher {
    responses: HashMap<String, Result<Vec<u8>, FetchError>>,
    requests: DashMap<String, usize>,
}

impl StubFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `url`
    #[must_use]
    pub fn with_bytes(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.responses.insert(url.into(), Ok(bytes));
        self
    }

    /// Fail `url` with `error`
    #[must_use]
    pub fn with_error(mut self, url: impl Into<String>, error: FetchError) -> Self {
        self.responses.insert(url.into(), Err(error));
        self
    }

    /// How many times `url` was requested
    #[must_use]
    pub fn request_count(&self, url: &str) -> usize {
        self.requests.get(url).map_or(0, |count| *count)
    }

    /// Total requests across all URLs
    #[must_use]
    pub fn total_requests(&self) -> usize {
        self.requests.iter().map(|entry| *entry.value()).sum()
    }
}

impl RemoteFetcher for StubFetcher {
    fn get<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            *self.requests.entry(url.to_string()).or_insert(0) += 1;
            match self.responses.get(url) {
                Some(response) => response.clone(),
                None => Err(FetchError::UnmappedUrl(url.to_string())),
            }
        })
    }
}
