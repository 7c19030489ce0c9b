//! Measure pixel dimensions from image bytes

use image::ImageReader;
use std::io::Cursor;

use super::types::Dimensions;
use crate::error::FetchError;

/// Read width/height from an encoded image header
///
/// Only the header is decoded. Zero-sized images are rejected so callers never
/// see a partial size.
pub fn probe_dimensions(url: &str, bytes: &[u8]) -> Result<Dimensions, FetchError> {
    let undecodable = |message: String| FetchError::Undecodable {
        url: url.to_string(),
        message,
    };

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| undecodable(e.to_string()))?;

    if reader.format().is_none() {
        return Err(undecodable("unrecognized image format".to_string()));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| undecodable(e.to_string()))?;

    Dimensions::new(width, height)
        .ok_or_else(|| undecodable(format!("zero-sized image {width}x{height}")))
}
