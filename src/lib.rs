pub mod attributes;
pub mod config;
pub mod dimensions;
pub mod embeds;
pub mod error;
pub mod layout;
pub mod sanitizer;
pub mod utils;

pub use attributes::{AttributeFilter, AttributeSet, Axis, TagFamily, normalize_dimension};
pub use config::{SanitizerConfig, SanitizerConfigBuilder};
pub use dimensions::{
    DimensionExtractor, Dimensions, HttpFetcher, RemoteFetcher, StubFetcher, probe_dimensions,
};
pub use embeds::{
    EmbedHandler, EmbedRegistry, ImgurEmbed, InstagramEmbed, TwitterEmbed, VimeoEmbed,
    YouTubeEmbed,
};
pub use error::{FetchError, SanitizeError, SanitizeResult};
pub use layout::synthesize_layout;
pub use sanitizer::{Diagnostic, ImgSanitizer, MissingDimension, SanitizeReport};

/// Convert every `<img>` in `html` using a real HTTP fetcher for unknown sizes
pub async fn sanitize_html(
    html: &str,
    config: &SanitizerConfig,
) -> SanitizeResult<(String, SanitizeReport)> {
    let extractor = DimensionExtractor::http(config);
    ImgSanitizer::new(config, &extractor).sanitize_html(html).await
}
