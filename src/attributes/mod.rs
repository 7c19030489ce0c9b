//! Attribute allow-listing and value normalization

pub mod dimension;
pub mod filter;
pub mod set;

pub use dimension::{normalize_dimension, Axis};
pub use filter::{AttributeFilter, TagFamily};
pub use set::AttributeSet;
