//! Configuration module for sanitize passes
//!
//! This module provides the `SanitizerConfig` struct and its builder for
//! configuring fallback sizing and dimension probing with validation and
//! sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::SanitizerConfigBuilder;
pub use types::SanitizerConfig;
