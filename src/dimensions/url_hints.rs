//! Dimensions encoded in image URLs
//!
//! CMS-generated intermediate sizes are saved as `name-{W}x{H}.ext`
//! (`photo-300x200.jpg`), so those URLs resolve without a request.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::Dimensions;

static RESIZED_FILENAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)-(\d{1,5})x(\d{1,5})\.(?:jpe?g|png|gif|webp)$")
        .expect("Invalid resized filename regex")
});

/// Parse a `-{W}x{H}.ext` suffix from the URL path, ignoring query and fragment
#[must_use]
pub fn dimensions_from_url(url: &str) -> Option<Dimensions> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let captures = RESIZED_FILENAME_REGEX.captures(path)?;
    let width = captures.get(1)?.as_str().parse().ok()?;
    let height = captures.get(2)?.as_str().parse().ok()?;
    Dimensions::new(width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resized_filename() {
        assert_eq!(
            dimensions_from_url("https://example.com/uploads/photo-300x200.jpg?ver=2"),
            Some(Dimensions { width: 300, height: 200 })
        );
        assert_eq!(
            dimensions_from_url("https://example.com/uploads/Banner-1024X512.PNG"),
            Some(Dimensions { width: 1024, height: 512 })
        );
    }

    #[test]
    fn test_no_hint() {
        assert_eq!(dimensions_from_url("https://example.com/a.png"), None);
        assert_eq!(dimensions_from_url("https://example.com/photo-300x200.jpg/raw"), None);
        assert_eq!(dimensions_from_url("https://example.com/photo-0x200.jpg"), None);
    }
}
