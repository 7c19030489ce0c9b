//! Provider embed handlers
//!
//! Each handler recognizes one provider's URL shapes and rewrites the
//! provider's rendered oEmbed markup into the matching AMP custom element.
//! Handlers are registered against an [`EmbedRegistry`] that lives for one
//! document-processing session.

pub mod imgur;
pub mod instagram;
pub mod twitter;
pub mod util;
pub mod vimeo;
pub mod youtube;

use dashmap::DashSet;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::attributes::AttributeSet;
use crate::config::SanitizerConfig;
use crate::sanitizer::component_script_url;

pub use imgur::ImgurEmbed;
pub use instagram::InstagramEmbed;
pub use twitter::TwitterEmbed;
pub use util::EmbedSizing;
pub use vimeo::VimeoEmbed;
pub use youtube::YouTubeEmbed;

/// Priority used by [`EmbedRegistry::with_default_handlers`]
pub const DEFAULT_PRIORITY: i32 = 10;

/// One provider's oEmbed rewrite
pub trait EmbedHandler: Send + Sync {
    /// Stable identity; the registry deduplicates on it
    fn name(&self) -> &'static str;

    /// Cheap host/path check, case-insensitive
    fn matches(&self, url: &str) -> bool;

    /// Rewrite `html` for `url`
    ///
    /// Unrecognized URL shapes return `html` unchanged.
    fn transform(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String;

    /// AMP component the rewritten markup depends on
    fn script(&self) -> &'static str;
}

struct Registration {
    handler: Arc<dyn EmbedHandler>,
    priority: i32,
    sequence: u64,
}

/// Session-scoped set of active embed handlers
///
/// Iteration is deterministic: ascending priority, then registration order.
#[derive(Default)]
pub struct EmbedRegistry {
    handlers: BTreeMap<&'static str, Registration>,
    next_sequence: u64,
    /// Components whose handlers rewrote markup this session
    used_scripts: DashSet<&'static str>,
}

impl EmbedRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in provider, sized from `config`
    #[must_use]
    pub fn with_default_handlers(config: &SanitizerConfig) -> Self {
        let sizing = EmbedSizing::from_config(config);
        let mut registry = Self::new();
        registry.register(Arc::new(ImgurEmbed::new(sizing)), DEFAULT_PRIORITY);
        registry.register(Arc::new(YouTubeEmbed::new(sizing)), DEFAULT_PRIORITY);
        registry.register(Arc::new(VimeoEmbed::new(sizing)), DEFAULT_PRIORITY);
        registry.register(Arc::new(InstagramEmbed::new(sizing)), DEFAULT_PRIORITY);
        registry.register(Arc::new(TwitterEmbed::new(sizing)), DEFAULT_PRIORITY);
        registry
    }

    /// Add `handler`, replacing any handler with the same name
    ///
    /// A replacement keeps its original registration slot.
    pub fn register(&mut self, handler: Arc<dyn EmbedHandler>, priority: i32) {
        let name = handler.name();
        if let Some(existing) = self.handlers.get_mut(name) {
            log::debug!("Replacing embed handler {name} (priority {priority})");
            existing.handler = handler;
            existing.priority = priority;
            return;
        }

        log::debug!("Registering embed handler {name} (priority {priority})");
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.handlers.insert(
            name,
            Registration {
                handler,
                priority,
                sequence,
            },
        );
    }

    /// Remove the handler named `name`; returns whether one was registered
    pub fn unregister(&mut self, name: &str) -> bool {
        let removed = self.handlers.remove(name);
        if let Some(registration) = &removed {
            self.used_scripts.remove(registration.handler.script());
            log::debug!("Unregistered embed handler {name}");
        }
        removed.is_some()
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Handler names in dispatch order
    #[must_use]
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.ordered().map(|r| r.handler.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler matching `url` over `html`, in dispatch order
    pub fn filter_oembed_html(&self, html: &str, url: &str, author_attrs: &AttributeSet) -> String {
        let mut output = html.to_string();
        for registration in self.ordered() {
            let handler = &registration.handler;
            if !handler.matches(url) {
                continue;
            }
            let rewritten = handler.transform(&output, url, author_attrs);
            if rewritten != output {
                log::debug!("Embed handler {} rewrote markup for {url}", handler.name());
                self.used_scripts.insert(handler.script());
                output = rewritten;
            }
        }
        output
    }

    /// Component name -> script URL for every handler that rewrote markup
    #[must_use]
    pub fn required_scripts(&self) -> BTreeMap<String, String> {
        self.used_scripts
            .iter()
            .map(|entry| {
                let component: &str = *entry;
                (component.to_string(), component_script_url(component))
            })
            .collect()
    }

    /// Drop every handler and the session's script record
    pub fn clear(&mut self) {
        self.handlers.clear();
        self.used_scripts.clear();
        self.next_sequence = 0;
    }

    fn ordered(&self) -> impl Iterator<Item = &Registration> {
        let mut registrations: Vec<&Registration> = self.handlers.values().collect();
        registrations.sort_by_key(|r| (r.priority, r.sequence));
        registrations.into_iter()
    }
}

impl std::fmt::Debug for EmbedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbedRegistry")
            .field("handlers", &self.handler_names())
            .finish()
    }
}
