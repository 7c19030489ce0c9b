//! Image dimension extraction
//!
//! Resolves width/height for image URLs that arrive without them, either from
//! size hints in the file name or by fetching the bytes and reading the image
//! header. Absence from the result means "unresolved".

// Sub-modules
pub mod extractor;
pub mod fetcher;
pub mod probe;
pub mod types;
pub mod url_hints;

// Re-exports for public API
pub use extractor::DimensionExtractor;
pub use fetcher::{HttpFetcher, RemoteFetcher, StubFetcher};
pub use probe::probe_dimensions;
pub use types::{Dimensions, FetchFuture};
pub use url_hints::dimensions_from_url;
