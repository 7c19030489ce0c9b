//! kuchiki tree helpers: attribute snapshots, element construction and
//! in-place replacement

use html5ever::{LocalName, Namespace, QualName};
use kuchiki::traits::TendrilSink;
use kuchiki::{Attribute, ElementData, ExpandedName, NodeDataRef, NodeRef};

use crate::attributes::AttributeSet;
use crate::error::{SanitizeError, SanitizeResult};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Snapshot every element matching `selector` under `root`, in document order
///
/// Must collect before mutating: replacing or detaching nodes while a
/// `select()` iterator is live would skip siblings.
pub fn select_elements(
    root: &NodeRef,
    selector: &str,
) -> SanitizeResult<Vec<NodeDataRef<ElementData>>> {
    Ok(root
        .select(selector)
        .map_err(|()| SanitizeError::Selector(selector.to_string()))?
        .collect())
}

/// Copy an element's attributes into an [`AttributeSet`]
#[must_use]
pub fn attribute_set(element: &NodeDataRef<ElementData>) -> AttributeSet {
    let attrs = element.attributes.borrow();
    attrs
        .map
        .iter()
        .map(|(name, attr)| (name.local.to_string(), attr.value.clone()))
        .collect()
}

/// Set (or overwrite) a single attribute on an element
pub fn set_attribute(element: &NodeDataRef<ElementData>, name: &str, value: impl Into<String>) {
    element.attributes.borrow_mut().insert(name, value.into());
}

/// Build a detached HTML element carrying `attrs`
#[must_use]
pub fn create_element(tag: &str, attrs: &AttributeSet) -> NodeRef {
    let name = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag));
    let attributes = attrs.iter().map(|(name, value)| {
        (
            ExpandedName::new(Namespace::from(""), LocalName::from(name)),
            Attribute {
                prefix: None,
                value: value.to_string(),
            },
        )
    });
    NodeRef::new_element(name, attributes)
}

/// Put `replacement` at `original`'s position and detach `original`
///
/// Insert happens first, so the parent never observes a gap.
pub fn replace_node(original: &NodeRef, replacement: NodeRef) {
    original.insert_before(replacement);
    original.detach();
}

/// Parse an HTML document or fragment into a tree
#[must_use]
pub fn parse_html(html: &str) -> NodeRef {
    kuchiki::parse_html().one(html)
}

/// Serialize the children of `<body>`, or the whole document when there is none
pub fn serialize_body(document: &NodeRef) -> SanitizeResult<String> {
    let mut html_output = Vec::new();
    match document.select_first("body") {
        Ok(body) => {
            for child in body.as_node().children() {
                child.serialize(&mut html_output)?;
            }
        }
        Err(()) => document.serialize(&mut html_output)?,
    }
    Ok(String::from_utf8(html_output)?)
}
