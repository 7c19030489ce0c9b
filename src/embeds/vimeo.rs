//! Vimeo videos as `amp-vimeo`

use super::util::{parse_for_hosts, path_segments, render_embed, EmbedElement, EmbedSizing};
use super::EmbedHandler;
use crate::attributes::{AttributeSet, TagFamily};
use crate::layout::LAYOUT_RESPONSIVE;

const HOSTS: &[&str] = &["vimeo.com", "player.vimeo.com"];

#[derive(Debug, Clone, Copy, Default)]
pub struct VimeoEmbed {
    sizing: EmbedSizing,
}

impl VimeoEmbed {
    #[must_use]
    pub fn new(sizing: EmbedSizing) -> Self {
        Self { sizing }
    }

    /// First all-digit path segment: `/{id}`, `/video/{id}`, `/channels/x/{id}`
    #[must_use]
    pub fn video_id(url: &str) -> Option<String> {
        let parsed = parse_for_hosts(url, HOSTS)?;
        path_segments(&parsed)
            .into_iter()
            .find(|segment| segment.chars().all(|c| c.is_ascii_digit()))
            .map(str::to_string)
    }
}

impl EmbedHandler for VimeoEmbed {
    fn name(&self) -> &'static str {
        "vimeo"
    }

    fn matches(&self, url: &str) -> bool {
        parse_for_hosts(url, HOSTS).is_some()
    }

    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let Some(id) = Self::video_id(url) else {
            log::debug!("Unrecognized Vimeo URL shape, leaving markup unchanged: {url}");
            return html.to_string();
        };

        let element = EmbedElement {
            family: TagFamily::Vimeo,
            tag: "amp-vimeo",
            id_attribute: "data-videoid",
            id: &id,
            layout_hint: Some(LAYOUT_RESPONSIVE),
            extra: &[],
        };
        render_embed(&self.sizing, &element, html, author_attrs)
            .unwrap_or_else(|| html.to_string())
    }

    fn script(&self) -> &'static str {
        "amp-vimeo"
    }
}
