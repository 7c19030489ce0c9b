//! Fluent builder for `SanitizerConfig`
//!
//! Every field has a sensible default, so `build()` only fails when a supplied
//! value is out of range.

use crate::utils::{
    is_valid_url, CHROME_USER_AGENT, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENT_FETCHES,
    DEFAULT_MAX_IMAGE_BYTES, FALLBACK_HEIGHT, FALLBACK_WIDTH,
};
use anyhow::{anyhow, Context, Result};
use std::path::Path;

use super::types::SanitizerConfig;

#[derive(Debug, Clone)]
pub struct SanitizerConfigBuilder {
    pub(crate) fallback_width: u32,
    pub(crate) fallback_height: u32,
    pub(crate) content_max_width: Option<u32>,
    pub(crate) base_url: Option<String>,
    pub(crate) infer_from_filename: bool,
    pub(crate) cache_dimensions: bool,
    pub(crate) fetch_timeout_secs: u64,
    pub(crate) max_image_bytes: usize,
    pub(crate) max_concurrent_fetches: usize,
    pub(crate) user_agent: String,
}

impl Default for SanitizerConfigBuilder {
    fn default() -> Self {
        Self {
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
            content_max_width: None,
            base_url: None,
            infer_from_filename: true,
            cache_dimensions: true,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            user_agent: CHROME_USER_AGENT.to_string(),
        }
    }
}

impl SanitizerConfig {
    /// Create a builder for configuring a `SanitizerConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SanitizerConfigBuilder {
        SanitizerConfigBuilder::default()
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: SanitizerConfig =
            serde_json::from_str(&raw).context("Failed to parse sanitizer config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Turn an existing configuration back into a builder for overrides
    #[must_use]
    pub fn to_builder(&self) -> SanitizerConfigBuilder {
        SanitizerConfigBuilder {
            fallback_width: self.fallback_width,
            fallback_height: self.fallback_height,
            content_max_width: self.content_max_width,
            base_url: self.base_url.clone(),
            infer_from_filename: self.infer_from_filename,
            cache_dimensions: self.cache_dimensions,
            fetch_timeout_secs: self.fetch_timeout_secs,
            max_image_bytes: self.max_image_bytes,
            max_concurrent_fetches: self.max_concurrent_fetches,
            user_agent: self.user_agent.clone(),
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.fallback_width == 0 || self.fallback_height == 0 {
            return Err(anyhow!(
                "Fallback dimensions must be non-zero (got {}x{})",
                self.fallback_width,
                self.fallback_height
            ));
        }
        if self.content_max_width == Some(0) {
            return Err(anyhow!("content_max_width must be non-zero when set"));
        }
        if let Some(base) = &self.base_url
            && !is_valid_url(base)
        {
            return Err(anyhow!("Invalid base URL '{base}': expected absolute http(s) URL"));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(anyhow!("max_concurrent_fetches must be at least 1"));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(anyhow!("fetch_timeout_secs must be at least 1"));
        }
        Ok(())
    }
}

impl SanitizerConfigBuilder {
    #[must_use]
    pub fn fallback_width(mut self, width: u32) -> Self {
        self.fallback_width = width;
        self
    }

    #[must_use]
    pub fn fallback_height(mut self, height: u32) -> Self {
        self.fallback_height = height;
        self
    }

    #[must_use]
    pub fn content_max_width(mut self, width: Option<u32>) -> Self {
        self.content_max_width = width;
        self
    }

    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn infer_from_filename(mut self, enabled: bool) -> Self {
        self.infer_from_filename = enabled;
        self
    }

    #[must_use]
    pub fn cache_dimensions(mut self, enabled: bool) -> Self {
        self.cache_dimensions = enabled;
        self
    }

    #[must_use]
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn max_image_bytes(mut self, bytes: usize) -> Self {
        self.max_image_bytes = bytes;
        self
    }

    #[must_use]
    pub fn max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub(crate) fn into_config(self) -> SanitizerConfig {
        SanitizerConfig {
            fallback_width: self.fallback_width,
            fallback_height: self.fallback_height,
            content_max_width: self.content_max_width,
            base_url: self.base_url,
            infer_from_filename: self.infer_from_filename,
            cache_dimensions: self.cache_dimensions,
            fetch_timeout_secs: self.fetch_timeout_secs,
            max_image_bytes: self.max_image_bytes,
            max_concurrent_fetches: self.max_concurrent_fetches,
            user_agent: self.user_agent,
        }
    }

    /// Validate and build the configuration
    pub fn build(self) -> Result<SanitizerConfig> {
        let config = self.into_config();
        config.validate()?;
        Ok(config)
    }
}
