//! URL manipulation utilities.
//!
//! This module provides functions for classifying and resolving image and embed
//! URLs before they are fetched or pattern-matched.

use anyhow::{Context, Result};
use url::Url;

/// Resolve a potentially relative URL against a base URL
///
/// Query strings are re-encoded so URLs copied out of HTML with unencoded
/// special characters still produce valid requests.
pub fn resolve_url(base_url: &str, url: &str) -> Result<String> {
    let base = Url::parse(base_url).context("Invalid base URL")?;
    let mut resolved = base.join(url).context("Failed to resolve URL")?;

    if resolved.query().is_some() {
        // Collect query pairs into owned strings to avoid borrow conflicts
        let query_pairs: Vec<(String, String)> = resolved
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        resolved.query_pairs_mut().clear();
        for (key, value) in query_pairs {
            resolved.query_pairs_mut().append_pair(&key, &value);
        }
    }

    Ok(resolved.to_string())
}

/// Check if a URL is an absolute http(s) URL
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    // Skip data URLs, javascript URLs, and other non-http schemes
    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

/// Turn an image `src` into the absolute URL that should be requested
///
/// Protocol-relative URLs get `https:`; relative URLs are resolved against
/// `base_url` when one is configured. Returns `None` for anything that cannot
/// be fetched over http(s).
#[must_use]
pub fn fetchable_url(src: &str, base_url: Option<&str>) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    if let Some(rest) = src.strip_prefix("//") {
        let candidate = format!("https://{rest}");
        return is_valid_url(&candidate).then_some(candidate);
    }

    if is_valid_url(src) {
        return Some(src.to_string());
    }

    // Absolute URL with an unsupported scheme
    if Url::parse(src).is_ok() {
        return None;
    }

    let base = base_url?;
    match resolve_url(base, src) {
        Ok(resolved) if is_valid_url(&resolved) => Some(resolved),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Failed to resolve image src '{src}' against base '{base}': {e}");
            None
        }
    }
}

/// Lower-cased file extension of the URL path, ignoring query and fragment
#[must_use]
pub fn path_extension(url: &str) -> Option<String> {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };

    let file_name = path.rsplit('/').next()?;
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
