//! Shared configuration constants for the AMP sanitizer
//!
//! This module contains default values and the stable class-token contract used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Fallback width applied when an image's size cannot be determined
pub const FALLBACK_WIDTH: u32 = 600;

/// Fallback height applied when an image's size cannot be determined
pub const FALLBACK_HEIGHT: u32 = 400;

/// Class prepended when neither dimension could be resolved
///
/// Styling and QA tooling match on these tokens; the spelling is part of the
/// public contract.
pub const UNKNOWN_SIZE_CLASS: &str = "amp-wp-unknown-size";

/// Class prepended when only the width was unresolved
pub const UNKNOWN_WIDTH_CLASS: &str = "amp-wp-unknown-width";

/// Class prepended when only the height was unresolved
pub const UNKNOWN_HEIGHT_CLASS: &str = "amp-wp-unknown-height";

/// Class appended to every element the img sanitizer converted
pub const ENFORCED_SIZES_CLASS: &str = "amp-wp-enforced-sizes";

/// Author-declared layout hint, renamed to `layout` on output
pub const LAYOUT_HINT_ATTRIBUTE: &str = "data-amp-layout";

/// Default upper bound on concurrent dimension probes in one batch
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

/// Default request timeout for dimension probes
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Default maximum image payload read while probing: 5MB
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Chrome user agent string sent with dimension probes
///
/// Some image CDNs refuse requests without a browser-like user agent.
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";

/// Base URL for AMP component scripts
pub const AMP_CDN_BASE: &str = "https://cdn.ampproject.org/v0";
