//! Shared plumbing for provider handlers: size scraping, fallback sizing and
//! custom element rendering

use once_cell::sync::Lazy;
use regex::Regex;

use crate::attributes::{AttributeFilter, AttributeSet, Axis, TagFamily};
use crate::config::SanitizerConfig;
use crate::layout::synthesize_layout;
use crate::utils::{FALLBACK_HEIGHT, FALLBACK_WIDTH, LAYOUT_HINT_ATTRIBUTE};

static WIDTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\swidth\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("Invalid embed width regex")
});

static HEIGHT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\sheight\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("Invalid embed height regex")
});

/// Raw `width`/`height` attribute value from provider markup
#[must_use]
pub fn scrape_attribute(html: &str, axis: Axis) -> Option<&str> {
    let regex = match axis {
        Axis::Width => &*WIDTH_REGEX,
        Axis::Height => &*HEIGHT_REGEX,
    };
    let caps = regex.captures(html)?;
    (1..=3).find_map(|i| caps.get(i)).map(|m| m.as_str())
}

/// Pixel `width`/`height` from provider markup, normalized like author values
///
/// Percentages and unit-suffixed values follow [`AttributeFilter::normalize`],
/// so anything it rejects counts as absent.
#[must_use]
pub fn scrape_dimension(html: &str, axis: Axis, filter: &AttributeFilter) -> Option<u32> {
    scrape_attribute(html, axis).and_then(|value| filter.normalize(value, axis))
}

/// Fallback sizes and normalization shared by every handler
#[derive(Debug, Clone, Copy)]
pub struct EmbedSizing {
    pub filter: AttributeFilter,
    pub fallback_width: u32,
    pub fallback_height: u32,
}

impl Default for EmbedSizing {
    fn default() -> Self {
        Self {
            filter: AttributeFilter::default(),
            fallback_width: FALLBACK_WIDTH,
            fallback_height: FALLBACK_HEIGHT,
        }
    }
}

impl EmbedSizing {
    #[must_use]
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self {
            filter: AttributeFilter::from_config(config),
            fallback_width: config.fallback_width(),
            fallback_height: config.fallback_height(),
        }
    }

    /// Markup first, then author attributes, then fallbacks
    ///
    /// A height-only result keeps width open unless `fill_width` is set;
    /// responsive layouts need both sides for their aspect ratio.
    #[must_use]
    pub fn resolve(
        &self,
        html: &str,
        author_attrs: &AttributeSet,
        fill_width: bool,
    ) -> (Option<u32>, u32) {
        let dimension = |axis: Axis| {
            scrape_dimension(html, axis, &self.filter).or_else(|| {
                author_attrs
                    .get(axis.attribute())
                    .and_then(|value| self.filter.normalize(value, axis))
            })
        };

        let width = dimension(Axis::Width);
        let height = dimension(Axis::Height);

        match (width, height) {
            (Some(width), Some(height)) => (Some(width), height),
            (Some(width), None) => (Some(width), self.fallback_height),
            (None, Some(height)) if fill_width => (Some(self.fallback_width), height),
            (None, Some(height)) => (None, height),
            (None, None) => (Some(self.fallback_width), self.fallback_height),
        }
    }
}

/// What a provider handler contributes to the rendered element
pub struct EmbedElement<'a> {
    pub family: TagFamily,
    pub tag: &'a str,
    pub id_attribute: &'a str,
    pub id: &'a str,
    pub layout_hint: Option<&'a str>,
    pub extra: &'a [(&'a str, &'a str)],
}

/// Render the provider custom element for `html`
///
/// Returns `None` when no sized attribute set could be produced; callers pass
/// the original markup through in that case.
#[must_use]
pub fn render_embed(
    sizing: &EmbedSizing,
    element: &EmbedElement<'_>,
    html: &str,
    author_attrs: &AttributeSet,
) -> Option<String> {
    let layout_hint = author_attrs
        .get(LAYOUT_HINT_ATTRIBUTE)
        .filter(|hint| !hint.trim().is_empty())
        .or(element.layout_hint);

    let (width, height) = sizing.resolve(html, author_attrs, layout_hint.is_some());

    let mut attrs = AttributeSet::new();
    if let Some(width) = width {
        attrs.insert("width", width.to_string());
    }
    attrs.insert("height", height.to_string());
    attrs.insert(element.id_attribute, element.id);
    for (name, value) in element.extra {
        attrs.insert(*name, *value);
    }
    if let Some(hint) = layout_hint {
        attrs.insert(LAYOUT_HINT_ATTRIBUTE, hint);
    }

    let mut filtered = sizing.filter.filter_attributes(element.family, &attrs);

    if !filtered.contains("width") {
        filtered = match synthesize_layout(filtered) {
            Ok(attrs) => attrs,
            Err(e) => {
                log::debug!("Leaving {} markup unchanged: {e}", element.tag);
                return None;
            }
        };
    }

    Some(build_tag(element.tag, &filtered))
}

/// Serialize `<tag attrs...></tag>` with attributes in insertion order
#[must_use]
pub fn build_tag(tag: &str, attrs: &AttributeSet) -> String {
    let mut out = format!("<{tag}");
    for (name, value) in attrs.iter() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push_str("></");
    out.push_str(tag);
    out.push('>');
    out
}

/// Path segments of `url`, empty segments skipped
#[must_use]
pub fn path_segments(url: &url::Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

/// Host of `url` lowercased, with any `www.` / `m.` prefix removed
#[must_use]
pub fn bare_host(url: &url::Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .unwrap_or(&host)
        .to_string();
    Some(host)
}

/// Parse `url` and check its bare host against `hosts`
#[must_use]
pub fn parse_for_hosts(url: &str, hosts: &[&str]) -> Option<url::Url> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    let host = bare_host(&parsed)?;
    hosts.contains(&host.as_str()).then_some(parsed)
}
