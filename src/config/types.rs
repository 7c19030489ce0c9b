//! Core configuration type for sanitize passes
//!
//! This module contains the `SanitizerConfig` struct that defines fallback
//! sizing, URL resolution and dimension-probe behavior.

use serde::{Deserialize, Serialize};

/// Main configuration struct for sanitize passes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerConfig {
    /// Width assigned to images whose size could not be determined
    pub(crate) fallback_width: u32,

    /// Height assigned to images whose size could not be determined
    pub(crate) fallback_height: u32,

    /// Maximum content width of the theme, in pixels
    ///
    /// When set, percentage widths resolve against it and it replaces
    /// `fallback_width` for fully unknown images.
    pub(crate) content_max_width: Option<u32>,

    /// Base URL used to resolve relative image sources before probing
    ///
    /// **INVARIANT:** when present, parses as an absolute http(s) URL
    /// (validated in builder).
    pub(crate) base_url: Option<String>,

    /// Read `name-{W}x{H}.ext` size hints out of image file names
    pub(crate) infer_from_filename: bool,

    /// Remember per-URL lookups across passes
    pub(crate) cache_dimensions: bool,

    /// Timeout in seconds for one dimension probe request
    ///
    /// Default: 10 seconds
    pub(crate) fetch_timeout_secs: u64,

    /// Maximum bytes read from an image while probing its dimensions
    ///
    /// Default: 5MB
    pub(crate) max_image_bytes: usize,

    /// Upper bound on concurrent probes within one batch
    ///
    /// Default: 8
    pub(crate) max_concurrent_fetches: usize,

    /// User agent sent with probe requests
    pub(crate) user_agent: String,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        super::builder::SanitizerConfigBuilder::default().into_config()
    }
}
