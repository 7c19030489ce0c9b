//! Imgur posts, galleries and albums as `amp-imgur`

use super::util::{parse_for_hosts, path_segments, render_embed, EmbedElement, EmbedSizing};
use super::EmbedHandler;
use crate::attributes::{AttributeSet, TagFamily};

const HOSTS: &[&str] = &["imgur.com"];
const RESERVED_PATHS: &[&str] = &["gallery", "a", "t", "r", "user", "upload"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ImgurEmbed {
    sizing: EmbedSizing,
}

impl ImgurEmbed {
    #[must_use]
    pub fn new(sizing: EmbedSizing) -> Self {
        Self { sizing }
    }

    /// `gallery/{id}` and `{id}` give the bare id, albums give `a/{id}`
    #[must_use]
    pub fn imgur_id(url: &str) -> Option<String> {
        let parsed = parse_for_hosts(url, HOSTS)?;
        let segments = path_segments(&parsed);

        let id = match segments.as_slice() {
            ["gallery", id, ..] => (*id).to_string(),
            ["a", id, ..] if is_imgur_id(id) => format!("a/{id}"),
            [id] if !RESERVED_PATHS.contains(id) => (*id).to_string(),
            _ => return None,
        };

        let bare = id.strip_prefix("a/").unwrap_or(&id);
        is_imgur_id(bare).then_some(id)
    }
}

fn is_imgur_id(candidate: &str) -> bool {
    !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_alphanumeric())
}

impl EmbedHandler for ImgurEmbed {
    fn name(&self) -> &'static str {
        "imgur"
    }

    fn matches(&self, url: &str) -> bool {
        parse_for_hosts(url, HOSTS).is_some()
    }

    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let Some(id) = Self::imgur_id(url) else {
            log::debug!("Unrecognized imgur URL shape, leaving markup unchanged: {url}");
            return html.to_string();
        };

        let element = EmbedElement {
            family: TagFamily::Imgur,
            tag: "amp-imgur",
            id_attribute: "data-imgur-id",
            id: &id,
            layout_hint: None,
            extra: &[],
        };
        render_embed(&self.sizing, &element, html, author_attrs)
            .unwrap_or_else(|| html.to_string())
    }

    fn script(&self) -> &'static str {
        "amp-imgur"
    }
}
