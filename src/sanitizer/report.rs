//! Per-pass outcome: counts, non-fatal diagnostics, required AMP scripts

use std::collections::BTreeMap;

use crate::utils::AMP_CDN_BASE;

/// Which dimension(s) fell back to defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingDimension {
    Both,
    Width,
    Height,
}

/// Non-fatal conditions met during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// `img` without a usable `src`; the node was removed
    InvalidNode { reason: String },
    /// No size could be determined for `url`; fallback sizing was applied
    UnresolvedDimension { url: String, missing: MissingDimension },
}

/// Result of one sanitize pass
#[derive(Debug, Clone, Default)]
pub struct SanitizeReport {
    pub converted: usize,
    pub removed: usize,
    /// Distinct URLs handed to the dimension extractor
    pub probed_urls: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
    /// AMP component name -> script URL the output depends on
    pub scripts: BTreeMap<String, String>,
}

impl SanitizeReport {
    pub fn require_script(&mut self, component: &str) {
        self.scripts
            .entry(component.to_string())
            .or_insert_with(|| component_script_url(component));
    }

    /// Number of nodes that fell back to default sizing
    #[must_use]
    pub fn unresolved(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Diagnostic::UnresolvedDimension { .. }))
            .count()
    }

    /// Render the `<script custom-element>` tags the output needs
    #[must_use]
    pub fn script_tags(&self) -> Vec<String> {
        self.scripts
            .iter()
            .map(|(component, src)| {
                format!("<script async custom-element=\"{component}\" src=\"{src}\"></script>")
            })
            .collect()
    }
}

/// CDN URL of an AMP component script
#[must_use]
pub fn component_script_url(component: &str) -> String {
    format!("{AMP_CDN_BASE}/{component}-0.1.js")
}
