//! Shared helpers for the amp_sanitizer integration tests

use amp_sanitizer::sanitizer::dom;
use amp_sanitizer::{AttributeSet, DimensionExtractor, SanitizerConfig, StubFetcher};
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::sync::Arc;

/// Encode a blank image of the given size in `format`
#[allow(dead_code)]
pub fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Cursor::new(Vec::new());
    RgbaImage::new(width, height)
        .write_to(&mut bytes, format)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Png)
}

#[allow(dead_code)]
pub fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Gif)
}

/// Extractor over a shared stub so tests can inspect request counts
#[allow(dead_code)]
pub fn stub_extractor(stub: &Arc<StubFetcher>, config: &SanitizerConfig) -> DimensionExtractor {
    DimensionExtractor::new(stub.clone(), config)
}

/// Attributes of every element matching `selector` in serialized output
#[allow(dead_code)]
pub fn attributes_of(html: &str, selector: &str) -> Vec<AttributeSet> {
    let document = dom::parse_html(html);
    dom::select_elements(&document, selector)
        .expect("Invalid test selector")
        .iter()
        .map(dom::attribute_set)
        .collect()
}

/// Attributes of the single element matching `selector`
#[allow(dead_code)]
pub fn single(html: &str, selector: &str) -> AttributeSet {
    let mut all = attributes_of(html, selector);
    assert_eq!(all.len(), 1, "expected one {selector} in {html}");
    all.remove(0)
}
