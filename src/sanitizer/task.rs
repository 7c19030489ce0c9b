//! Nodes waiting on dimension lookup, grouped by source URL

use kuchiki::{ElementData, NodeDataRef};
use std::collections::BTreeMap;

/// An `img` that lacked one or both valid dimensions at scan time
pub struct PendingNode {
    pub element: NodeDataRef<ElementData>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `url -> nodes` mapping for one pass; consumed when the pass finalizes
#[derive(Default)]
pub struct SanitizationTask {
    by_url: BTreeMap<String, Vec<PendingNode>>,
}

impl SanitizationTask {
    pub fn push(&mut self, url: String, node: PendingNode) {
        self.by_url.entry(url).or_default().push(node);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_url.is_empty()
    }

    /// Number of pending nodes across all URLs
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.by_url.values().map(Vec::len).sum()
    }

    /// Distinct URLs, sorted
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.by_url.keys().cloned().collect()
    }

    pub fn into_groups(self) -> impl Iterator<Item = (String, Vec<PendingNode>)> {
        self.by_url.into_iter()
    }
}
