//! YouTube videos as `amp-youtube`

use super::util::{parse_for_hosts, path_segments, render_embed, EmbedElement, EmbedSizing};
use super::EmbedHandler;
use crate::attributes::{AttributeSet, TagFamily};
use crate::layout::LAYOUT_RESPONSIVE;

const HOSTS: &[&str] = &["youtube.com", "youtu.be", "youtube-nocookie.com"];

#[derive(Debug, Clone, Copy, Default)]
pub struct YouTubeEmbed {
    sizing: EmbedSizing,
}

impl YouTubeEmbed {
    #[must_use]
    pub fn new(sizing: EmbedSizing) -> Self {
        Self { sizing }
    }

    #[must_use]
    pub fn video_id(url: &str) -> Option<String> {
        let parsed = parse_for_hosts(url, HOSTS)?;
        let segments = path_segments(&parsed);

        let id = if parsed.host_str().is_some_and(|h| h.eq_ignore_ascii_case("youtu.be")) {
            segments.first().map(|s| (*s).to_string())
        } else {
            match segments.as_slice() {
                ["watch", ..] => parsed
                    .query_pairs()
                    .find(|(key, _)| key == "v")
                    .map(|(_, value)| value.into_owned()),
                ["embed" | "shorts" | "v" | "live", id, ..] => Some((*id).to_string()),
                _ => None,
            }
        };

        let id = id?;
        is_video_id(&id).then_some(id)
    }
}

fn is_video_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl EmbedHandler for YouTubeEmbed {
    fn name(&self) -> &'static str {
        "youtube"
    }

    fn matches(&self, url: &str) -> bool {
        parse_for_hosts(url, HOSTS).is_some()
    }

    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let Some(id) = Self::video_id(url) else {
            log::debug!("Unrecognized YouTube URL shape, leaving markup unchanged: {url}");
            return html.to_string();
        };

        let element = EmbedElement {
            family: TagFamily::YouTube,
            tag: "amp-youtube",
            id_attribute: "data-videoid",
            id: &id,
            layout_hint: Some(LAYOUT_RESPONSIVE),
            extra: &[],
        };
        render_embed(&self.sizing, &element, html, author_attrs)
            .unwrap_or_else(|| html.to_string())
    }

    fn script(&self) -> &'static str {
        "amp-youtube"
    }
}
