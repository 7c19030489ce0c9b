//! Tweets as `amp-twitter`; `x.com` URLs are the same provider

use super::util::{parse_for_hosts, path_segments, render_embed, EmbedElement, EmbedSizing};
use super::EmbedHandler;
use crate::attributes::{AttributeSet, TagFamily};
use crate::layout::LAYOUT_RESPONSIVE;

const HOSTS: &[&str] = &["twitter.com", "mobile.twitter.com", "x.com"];

#[derive(Debug, Clone, Copy, Default)]
pub struct TwitterEmbed {
    sizing: EmbedSizing,
}

impl TwitterEmbed {
    #[must_use]
    pub fn new(sizing: EmbedSizing) -> Self {
        Self { sizing }
    }

    #[must_use]
    pub fn tweet_id(url: &str) -> Option<String> {
        let parsed = parse_for_hosts(url, HOSTS)?;
        let segments = path_segments(&parsed);
        match segments.as_slice() {
            [_user, "status" | "statuses", id, ..] if id.chars().all(|c| c.is_ascii_digit()) => {
                Some((*id).to_string())
            }
            _ => None,
        }
    }
}

impl EmbedHandler for TwitterEmbed {
    fn name(&self) -> &'static str {
        "twitter"
    }

    fn matches(&self, url: &str) -> bool {
        parse_for_hosts(url, HOSTS).is_some()
    }

    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let Some(id) = Self::tweet_id(url) else {
            log::debug!("Unrecognized tweet URL shape, leaving markup unchanged: {url}");
            return html.to_string();
        };

        let element = EmbedElement {
            family: TagFamily::Twitter,
            tag: "amp-twitter",
            id_attribute: "data-tweetid",
            id: &id,
            layout_hint: Some(LAYOUT_RESPONSIVE),
            extra: &[],
        };
        render_embed(&self.sizing, &element, html, author_attrs)
            .unwrap_or_else(|| html.to_string())
    }

    fn script(&self) -> &'static str {
        "amp-twitter"
    }
}
