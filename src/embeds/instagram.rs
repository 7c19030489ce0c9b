//! Instagram posts as `amp-instagram`

use super::util::{parse_for_hosts, path_segments, render_embed, EmbedElement, EmbedSizing};
use super::EmbedHandler;
use crate::attributes::{AttributeSet, TagFamily};
use crate::layout::LAYOUT_RESPONSIVE;

const HOSTS: &[&str] = &["instagram.com", "instagr.am"];

/// Marker the Instagram embed script uses for captioned posts
const CAPTIONED_MARKER: &str = "data-instgrm-captioned";

#[derive(Debug, Clone, Copy, Default)]
pub struct InstagramEmbed {
    sizing: EmbedSizing,
}

impl InstagramEmbed {
    #[must_use]
    pub fn new(sizing: EmbedSizing) -> Self {
        Self { sizing }
    }

    #[must_use]
    pub fn shortcode(url: &str) -> Option<String> {
        let parsed = parse_for_hosts(url, HOSTS)?;
        let segments = path_segments(&parsed);
        let code = match segments.as_slice() {
            ["p" | "reel" | "tv", code, ..] => *code,
            [_user, "p" | "reel", code, ..] => *code,
            _ => return None,
        };
        code.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            .then(|| code.to_string())
    }
}

impl EmbedHandler for InstagramEmbed {
    fn name(&self) -> &'static str {
        "instagram"
    }

    fn matches(&self, url: &str) -> bool {
        parse_for_hosts(url, HOSTS).is_some()
    }

    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let Some(shortcode) = Self::shortcode(url) else {
            log::debug!("Unrecognized Instagram URL shape, leaving markup unchanged: {url}");
            return html.to_string();
        };

        let extra: &[(&str, &str)] = if html.contains(CAPTIONED_MARKER) {
            &[("data-captioned", "")]
        } else {
            &[]
        };

        let element = EmbedElement {
            family: TagFamily::Instagram,
            tag: "amp-instagram",
            id_attribute: "data-shortcode",
            id: &shortcode,
            layout_hint: Some(LAYOUT_RESPONSIVE),
            extra,
        };
        render_embed(&self.sizing, &element, html, author_attrs)
            .unwrap_or_else(|| html.to_string())
    }

    fn script(&self) -> &'static str {
        "amp-instagram"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcode_shapes() {
        let code = |url: &str| InstagramEmbed::shortcode(url);
        assert_eq!(
            code("https://www.instagram.com/p/B8Xy_z-1/").as_deref(),
            Some("B8Xy_z-1")
        );
        assert_eq!(code("https://instagr.am/p/abc").as_deref(), Some("abc"));
        assert_eq!(code("https://www.instagram.com/reel/Cx1").as_deref(), Some("Cx1"));
        assert_eq!(code("https://www.instagram.com/someuser/"), None);
    }

    #[test]
    fn test_captioned_flag_carried() {
        let handler = InstagramEmbed::default();
        let out = handler.transform(
            r#"<blockquote class="instagram-media" data-instgrm-captioned></blockquote>"#,
            "https://www.instagram.com/p/abc/",
            &AttributeSet::new(),
        );
        assert_eq!(
            out,
            r#"<amp-instagram width="600" height="400" data-shortcode="abc" data-captioned="" layout="responsive"></amp-instagram>"#
        );
    }
}
