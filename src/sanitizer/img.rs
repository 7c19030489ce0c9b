//! `<img>` to `amp-img` / `amp-anim` conversion
//!
//! One pass runs scan → classify → resolve → fallback → finalize:
//!
//! - Every `img` under the root is snapshotted and visited once, last first.
//!   Nodes without a `src` are removed.
//! - Nodes with two valid dimensions are finalized immediately; the rest are
//!   grouped by URL and sized by a single batched extractor call.
//! - Whatever the extractor could not resolve gets fallback sizing plus a
//!   diagnostic class, so finalize always sees usable dimensions.
//!
//! Finalize (`adjust_and_replace`) filters attributes, synthesizes the layout,
//! appends `amp-wp-enforced-sizes` and swaps the node for the new element.

use kuchiki::{ElementData, NodeDataRef, NodeRef};

use super::dom;
use super::report::{Diagnostic, MissingDimension, SanitizeReport};
use super::task::{PendingNode, SanitizationTask};
use crate::attributes::{AttributeFilter, Axis, TagFamily};
use crate::config::SanitizerConfig;
use crate::dimensions::{DimensionExtractor, Dimensions};
use crate::error::SanitizeResult;
use crate::layout::synthesize_layout;
use crate::utils::{
    path_extension, ENFORCED_SIZES_CLASS, UNKNOWN_HEIGHT_CLASS, UNKNOWN_SIZE_CLASS,
    UNKNOWN_WIDTH_CLASS,
};

const AMP_IMG: &str = "amp-img";
const AMP_ANIM: &str = "amp-anim";

/// Converts `img` elements of a parsed tree into AMP image elements
pub struct ImgSanitizer<'a> {
    config: &'a SanitizerConfig,
    extractor: &'a DimensionExtractor,
    filter: AttributeFilter,
}

impl<'a> ImgSanitizer<'a> {
    #[must_use]
    pub fn new(config: &'a SanitizerConfig, extractor: &'a DimensionExtractor) -> Self {
        Self {
            config,
            extractor,
            filter: AttributeFilter::from_config(config),
        }
    }

    /// Run one pass over every `img` under `root`
    ///
    /// The tree is only touched synchronously; the single await is the
    /// extractor batch. Dropping the future there leaves pending nodes in
    /// their original form.
    pub async fn sanitize(&self, root: &NodeRef) -> SanitizeResult<SanitizeReport> {
        let mut report = SanitizeReport::default();
        let mut task = SanitizationTask::default();

        let nodes = dom::select_elements(root, "img")?;

        for element in nodes.into_iter().rev() {
            let attrs = dom::attribute_set(&element);
            let src = attrs.get("src").map(str::trim).unwrap_or_default();

            if src.is_empty() {
                log::debug!("Removing img without src");
                element.as_node().detach();
                report.removed += 1;
                report.diagnostics.push(Diagnostic::InvalidNode {
                    reason: "missing or empty src".to_string(),
                });
                continue;
            }

            let width = attrs
                .get("width")
                .and_then(|value| self.filter.normalize(value, Axis::Width));
            let height = attrs
                .get("height")
                .and_then(|value| self.filter.normalize(value, Axis::Height));

            if width.is_some() && height.is_some() {
                self.adjust_and_replace(&element, &mut report)?;
            } else {
                task.push(
                    src.to_string(),
                    PendingNode {
                        element,
                        width,
                        height,
                    },
                );
            }
        }

        if task.is_empty() {
            log::debug!("Converted {} images, none needed dimensions", report.converted);
            return Ok(report);
        }

        report.probed_urls = task.urls();
        log::debug!(
            "{} images across {} URLs need dimensions",
            task.node_count(),
            report.probed_urls.len()
        );

        let resolved = self.extractor.extract(report.probed_urls.clone()).await?;

        for (url, pending_nodes) in task.into_groups() {
            let dimensions = resolved.get(&url).copied();
            for pending in pending_nodes {
                self.apply_dimensions(&url, &pending, dimensions, &mut report);
                self.adjust_and_replace(&pending.element, &mut report)?;
            }
        }

        log::info!(
            "Sanitized images: {} converted, {} removed, {} with fallback sizes",
            report.converted,
            report.removed,
            report.unresolved()
        );

        Ok(report)
    }

    /// Parse `html`, run a pass and serialize the body back out
    pub async fn sanitize_html(&self, html: &str) -> SanitizeResult<(String, SanitizeReport)> {
        let document = dom::parse_html(html);
        let report = self.sanitize(&document).await?;
        let output = dom::serialize_body(&document)?;
        Ok((output, report))
    }

    /// Write resolved or fallback dimensions onto a pending node
    fn apply_dimensions(
        &self,
        url: &str,
        pending: &PendingNode,
        dimensions: Option<Dimensions>,
        report: &mut SanitizeReport,
    ) {
        let element = &pending.element;

        if let Some(dimensions) = dimensions {
            dom::set_attribute(element, "width", dimensions.width.to_string());
            dom::set_attribute(element, "height", dimensions.height.to_string());
            return;
        }

        let (width, height, class, missing) = match (pending.width, pending.height) {
            (Some(width), _) => (
                width.to_string(),
                self.config.fallback_height().to_string(),
                UNKNOWN_HEIGHT_CLASS,
                MissingDimension::Height,
            ),
            (None, Some(height)) => (
                "auto".to_string(),
                height.to_string(),
                UNKNOWN_WIDTH_CLASS,
                MissingDimension::Width,
            ),
            (None, None) => (
                self.config.unknown_image_width().to_string(),
                self.config.fallback_height().to_string(),
                UNKNOWN_SIZE_CLASS,
                MissingDimension::Both,
            ),
        };

        dom::set_attribute(element, "width", width);
        dom::set_attribute(element, "height", height);
        prepend_class(element, class);

        log::debug!("No dimensions for {url}; applied fallback ({class})");
        report.diagnostics.push(Diagnostic::UnresolvedDimension {
            url: url.to_string(),
            missing,
        });
    }

    fn adjust_and_replace(
        &self,
        element: &NodeDataRef<ElementData>,
        report: &mut SanitizeReport,
    ) -> SanitizeResult<()> {
        let old_attributes = dom::attribute_set(element);
        let family = match old_attributes.get("src") {
            Some(src) if is_gif_url(src) => TagFamily::Anim,
            _ => TagFamily::Img,
        };

        let filtered = self.filter.filter_attributes(family, &old_attributes);
        let mut new_attributes = synthesize_layout(filtered)?;
        new_attributes.append_class(ENFORCED_SIZES_CLASS);

        let tag = match family {
            TagFamily::Anim => {
                report.require_script(AMP_ANIM);
                AMP_ANIM
            }
            _ => AMP_IMG,
        };

        let new_node = dom::create_element(tag, &new_attributes);
        dom::replace_node(element.as_node(), new_node);
        report.converted += 1;
        Ok(())
    }
}

fn prepend_class(element: &NodeDataRef<ElementData>, token: &str) {
    let mut attrs = dom::attribute_set(element);
    attrs.prepend_class(token);
    if let Some(class) = attrs.get("class") {
        dom::set_attribute(element, "class", class);
    }
}

/// `.gif` path extension selects the animated variant
#[must_use]
pub fn is_gif_url(url: &str) -> bool {
    path_extension(url).as_deref() == Some("gif")
}
