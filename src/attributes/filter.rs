//! Per-tag-family attribute allow-lists
//!
//! Each [`TagFamily`] carries its own allow-list table; dispatch is by family
//! tag. Attributes outside the table are dropped without error, `width` and
//! `height` are normalized, and the author layout hint is renamed to `layout`.

use super::dimension::{normalize_dimension, Axis};
use super::set::AttributeSet;
use crate::config::SanitizerConfig;
use crate::utils::LAYOUT_HINT_ATTRIBUTE;

/// Tag families the filter has allow-lists for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagFamily {
    Img,
    Anim,
    Imgur,
    YouTube,
    Vimeo,
    Instagram,
    Twitter,
    /// Any family without a registered table; everything is dropped
    Unknown,
}

const IMG_ATTRIBUTES: &[&str] = &[
    "src",
    "alt",
    "class",
    "srcset",
    "sizes",
    "on",
    "attribution",
    "width",
    "height",
];

const IMGUR_ATTRIBUTES: &[&str] = &["width", "height", "data-imgur-id"];
const VIDEO_ATTRIBUTES: &[&str] = &["width", "height", "data-videoid"];
const INSTAGRAM_ATTRIBUTES: &[&str] = &["width", "height", "data-shortcode", "data-captioned"];
const TWITTER_ATTRIBUTES: &[&str] = &["width", "height", "data-tweetid", "data-cards"];

impl TagFamily {
    /// Map an output element name to its family
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "img" | "amp-img" => TagFamily::Img,
            "amp-anim" => TagFamily::Anim,
            "amp-imgur" => TagFamily::Imgur,
            "amp-youtube" => TagFamily::YouTube,
            "amp-vimeo" => TagFamily::Vimeo,
            "amp-instagram" => TagFamily::Instagram,
            "amp-twitter" => TagFamily::Twitter,
            _ => TagFamily::Unknown,
        }
    }

    /// Names passed through (after normalization for `width`/`height`)
    #[must_use]
    pub fn allowed_attributes(self) -> &'static [&'static str] {
        match self {
            TagFamily::Img | TagFamily::Anim => IMG_ATTRIBUTES,
            TagFamily::Imgur => IMGUR_ATTRIBUTES,
            TagFamily::YouTube | TagFamily::Vimeo => VIDEO_ATTRIBUTES,
            TagFamily::Instagram => INSTAGRAM_ATTRIBUTES,
            TagFamily::Twitter => TWITTER_ATTRIBUTES,
            TagFamily::Unknown => &[],
        }
    }

    /// Whether the author layout hint is honored for this family
    #[must_use]
    pub fn accepts_layout_hint(self) -> bool {
        !matches!(self, TagFamily::Unknown)
    }

    #[must_use]
    pub fn allows(self, name: &str) -> bool {
        self.allowed_attributes().contains(&name)
    }
}

/// Pure attribute filter; the only state is the content width that
/// percentage widths resolve against
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeFilter {
    content_max_width: Option<u32>,
}

impl AttributeFilter {
    #[must_use]
    pub fn new(content_max_width: Option<u32>) -> Self {
        Self { content_max_width }
    }

    #[must_use]
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self::new(config.content_max_width())
    }

    /// Normalize a raw `width`/`height` value for this filter
    #[must_use]
    pub fn normalize(&self, value: &str, axis: Axis) -> Option<u32> {
        normalize_dimension(value, axis, self.content_max_width)
    }

    /// Produce the sanctioned attribute set for `family`
    #[must_use]
    pub fn filter_attributes(&self, family: TagFamily, attrs: &AttributeSet) -> AttributeSet {
        if family == TagFamily::Unknown {
            log::debug!(
                "No allow-list registered for tag family; dropping {} attributes",
                attrs.len()
            );
            return AttributeSet::new();
        }

        let mut out = AttributeSet::new();
        for (name, value) in attrs.iter() {
            if name == LAYOUT_HINT_ATTRIBUTE {
                if family.accepts_layout_hint() && !value.trim().is_empty() {
                    out.insert("layout", value.trim());
                }
                continue;
            }

            if !family.allows(name) {
                continue;
            }

            match Axis::from_attribute(name) {
                Some(axis) => {
                    if let Some(pixels) = self.normalize(value, axis) {
                        out.insert(name, pixels.to_string());
                    }
                }
                None => out.insert(name, value),
            }
        }
        out
    }
}
