//! Getter methods for `SanitizerConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `SanitizerConfig` instance.

use std::time::Duration;

use super::types::SanitizerConfig;

impl SanitizerConfig {
    #[must_use]
    pub fn fallback_width(&self) -> u32 {
        self.fallback_width
    }

    #[must_use]
    pub fn fallback_height(&self) -> u32 {
        self.fallback_height
    }

    #[must_use]
    pub fn content_max_width(&self) -> Option<u32> {
        self.content_max_width
    }

    /// Width used for images with no resolvable size
    #[must_use]
    pub fn unknown_image_width(&self) -> u32 {
        self.content_max_width.unwrap_or(self.fallback_width)
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn infer_from_filename(&self) -> bool {
        self.infer_from_filename
    }

    #[must_use]
    pub fn cache_dimensions(&self) -> bool {
        self.cache_dimensions
    }

    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    #[must_use]
    pub fn max_image_bytes(&self) -> usize {
        self.max_image_bytes
    }

    #[must_use]
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
    }

    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
