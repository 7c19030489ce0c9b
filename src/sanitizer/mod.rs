//! Tag sanitizer
//!
//! Walks a parsed HTML tree and replaces `<img>` elements with AMP-valid
//! `amp-img` / `amp-anim` elements carrying a width, height and layout.

pub mod dom;
pub mod img;
pub mod report;
pub mod task;

pub use dom::{parse_html, serialize_body};
pub use img::{is_gif_url, ImgSanitizer};
pub use report::{component_script_url, Diagnostic, MissingDimension, SanitizeReport};
pub use task::{PendingNode, SanitizationTask};
