//! Layout attribute synthesis
//!
//! AMP sized elements need a `width`/`height`/`layout` combination. This
//! consumes already-resolved values and never performs I/O. Rules, first
//! match wins:
//!
//! 1. An explicit `layout` is kept and nothing is inferred.
//! 2. Concrete pixel width and height give `layout="intrinsic"`.
//! 3. A known height with `auto` or absent width gives
//!    `layout="fixed-height"` and `width="auto"`.
//! 4. Anything else means the fallback stage failed to fill dimensions.

use crate::attributes::AttributeSet;
use crate::error::{SanitizeError, SanitizeResult};

pub const LAYOUT_INTRINSIC: &str = "intrinsic";
pub const LAYOUT_FIXED_HEIGHT: &str = "fixed-height";
pub const LAYOUT_RESPONSIVE: &str = "responsive";

fn is_pixel_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.parse::<u32>().is_ok_and(|n| n > 0))
}

/// Apply the layout decision table to a filtered attribute set
pub fn synthesize_layout(mut attrs: AttributeSet) -> SanitizeResult<AttributeSet> {
    if attrs.contains("layout") {
        return Ok(attrs);
    }

    let width = attrs.get("width");
    let height = attrs.get("height");

    if is_pixel_value(width) && is_pixel_value(height) {
        attrs.insert("layout", LAYOUT_INTRINSIC);
        return Ok(attrs);
    }

    let width_open = width.is_none_or(|w| w == "auto");
    if width_open && is_pixel_value(height) {
        attrs.insert("width", "auto");
        attrs.insert("layout", LAYOUT_FIXED_HEIGHT);
        return Ok(attrs);
    }

    Err(SanitizeError::InvariantViolation(format!(
        "no usable dimensions after fallback (width={:?}, height={:?})",
        attrs.get("width"),
        attrs.get("height")
    )))
}
