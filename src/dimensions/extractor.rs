//! Batched dimension extraction
//!
//! This module resolves sizes for a whole pass worth of image URLs in one
//! call. URLs are deduplicated, probes run concurrently up to the configured
//! limit, and a failed probe only affects its own URL.

use dashmap::DashMap;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use super::fetcher::{HttpFetcher, RemoteFetcher};
use super::probe::probe_dimensions;
use super::types::Dimensions;
use super::url_hints::dimensions_from_url;
use crate::config::SanitizerConfig;
use crate::error::{SanitizeError, SanitizeResult};
use crate::utils::fetchable_url;

/// Resolves image dimensions from URL hints or remote probes
pub struct DimensionExtractor {
    fetcher: Arc<dyn RemoteFetcher>,
    base_url: Option<String>,
    infer_from_filename: bool,
    max_concurrent_fetches: usize,
    /// Probe outcomes keyed by fetch URL, `None` for unresolved; shared
    /// across passes
    cache: Option<DashMap<String, Option<Dimensions>>>,
}

impl DimensionExtractor {
    #[must_use]
    pub fn new(fetcher: Arc<dyn RemoteFetcher>, config: &SanitizerConfig) -> Self {
        Self {
            fetcher,
            base_url: config.base_url().map(str::to_string),
            infer_from_filename: config.infer_from_filename(),
            max_concurrent_fetches: config.max_concurrent_fetches().max(1),
            cache: config.cache_dimensions().then(DashMap::new),
        }
    }

    /// Extractor backed by a real HTTP client
    #[must_use]
    pub fn http(config: &SanitizerConfig) -> Self {
        Self::new(Arc::new(HttpFetcher::new(config)), config)
    }

    /// Number of URLs currently remembered by the cache, resolved or not
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.as_ref().map_or(0, DashMap::len)
    }

    /// Resolve dimensions for every distinct URL in `urls`
    ///
    /// The result is keyed by the URL strings as passed in. A URL missing from
    /// the result is unresolved and the caller must apply its fallback. Only a
    /// fetcher configuration error aborts the batch.
    pub async fn extract<I, S>(&self, urls: I) -> SanitizeResult<HashMap<String, Dimensions>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let requested: BTreeSet<String> = urls.into_iter().map(Into::into).collect();
        let mut resolved = HashMap::new();

        // fetch URL -> every requested spelling that normalizes to it
        let mut pending: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for url in requested {
            if self.infer_from_filename
                && let Some(dimensions) = dimensions_from_url(&url)
            {
                log::debug!("Dimensions {dimensions} read from file name: {url}");
                resolved.insert(url, dimensions);
                continue;
            }

            let Some(fetch_url) = fetchable_url(&url, self.base_url.as_deref()) else {
                log::debug!("Image URL is not fetchable, leaving unresolved: {url}");
                continue;
            };

            if let Some(cache) = &self.cache
                && let Some(cached) = cache.get(&fetch_url)
            {
                match *cached {
                    Some(dimensions) => {
                        resolved.insert(url, dimensions);
                    }
                    None => log::debug!("Cached as unresolved, skipping probe: {url}"),
                }
                continue;
            }

            pending.entry(fetch_url).or_default().push(url);
        }

        if pending.is_empty() {
            return Ok(resolved);
        }

        log::debug!("Probing {} image URLs for dimensions", pending.len());

        let probes: Vec<(String, Option<Dimensions>)> = stream::iter(pending.keys().cloned())
            .map(|fetch_url| self.probe(fetch_url))
            .buffer_unordered(self.max_concurrent_fetches)
            .try_collect()
            .await?;

        for (fetch_url, dimensions) in probes {
            if let Some(cache) = &self.cache {
                cache.insert(fetch_url.clone(), dimensions);
            }
            let Some(dimensions) = dimensions else {
                continue;
            };
            if let Some(originals) = pending.get(&fetch_url) {
                for original in originals {
                    resolved.insert(original.clone(), dimensions);
                }
            }
        }

        Ok(resolved)
    }

    async fn probe(&self, fetch_url: String) -> SanitizeResult<(String, Option<Dimensions>)> {
        match self.fetcher.get(&fetch_url).await {
            Ok(bytes) => match probe_dimensions(&fetch_url, &bytes) {
                Ok(dimensions) => {
                    log::debug!("Probed {fetch_url}: {dimensions}");
                    Ok((fetch_url, Some(dimensions)))
                }
                Err(e) => {
                    log::warn!("Failed to read image dimensions: {e}");
                    Ok((fetch_url, None))
                }
            },
            Err(e) if e.is_configuration() => Err(SanitizeError::from(e)),
            Err(e) => {
                log::warn!("Failed to fetch image for dimensions: {e}");
                Ok((fetch_url, None))
            }
        }
    }
}

impl std::fmt::Debug for DimensionExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionExtractor")
            .field("base_url", &self.base_url)
            .field("infer_from_filename", &self.infer_from_filename)
            .field("max_concurrent_fetches", &self.max_concurrent_fetches)
            .field("cached", &self.cached_len())
            .finish()
    }
}
