//! Error types for sanitization passes
//!
//! Per-node problems (missing `src`, unresolvable sizes, isolated fetch
//! failures) never surface here; they are recorded as
//! [`Diagnostic`](crate::sanitizer::Diagnostic)s and resolved with safe
//! defaults. Only fetch-layer misconfiguration and broken internal invariants
//! halt a pass.

use thiserror::Error;

/// Result type alias for sanitizer operations
pub type SanitizeResult<T> = Result<T, SanitizeError>;

/// Errors that abort a sanitize pass
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// The remote fetcher is misconfigured (e.g. a stub asked for an unmapped URL)
    #[error("Fetcher misconfigured for {url}: {message}")]
    Fetcher { url: String, message: String },

    /// Layout synthesis reached a state the fallback stage should have prevented
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// An internal CSS selector failed to compile
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// Writing serialized HTML failed
    #[error("Failed to serialize HTML: {0}")]
    Serialize(#[from] std::io::Error),

    /// Serialized HTML was not valid UTF-8
    #[error("Serialized HTML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error type for a single remote fetch
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Request failed for {url}: {message}")]
    Request { url: String, message: String },

    #[error("HTTP error {status}: {url}")]
    Status { url: String, status: u16 },

    #[error("Resource too large: {url} ({size} bytes, max {limit})")]
    TooLarge { url: String, size: u64, limit: usize },

    #[error("Unable to read image dimensions from {url}: {message}")]
    Undecodable { url: String, message: String },

    /// A stub fetcher received a URL it has no canned response for
    #[error("No canned response configured for URL: {0}")]
    UnmappedUrl(String),
}

impl FetchError {
    /// Returns true if this error is a fetcher misconfiguration rather than a
    /// failure of the remote resource
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, FetchError::UnmappedUrl(_))
    }

    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            FetchError::Request { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::TooLarge { url, .. }
            | FetchError::Undecodable { url, .. }
            | FetchError::UnmappedUrl(url) => url,
        }
    }
}

impl From<FetchError> for SanitizeError {
    fn from(error: FetchError) -> Self {
        SanitizeError::Fetcher {
            url: error.url().to_string(),
            message: error.to_string(),
        }
    }
}
