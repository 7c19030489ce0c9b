// amp-sanitize: convert HTML images and oEmbed markup to AMP elements.
//
// Reads a document from a file or stdin and writes the converted markup to
// stdout. Required AMP component scripts are logged at info.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

use amp_sanitizer::{
    AttributeSet, DimensionExtractor, EmbedRegistry, ImgSanitizer, SanitizerConfig,
};

#[derive(Debug, Parser)]
#[command(name = "amp-sanitize", version, about = "Convert HTML images and embeds to AMP markup")]
struct Cli {
    /// HTML input file; reads stdin when omitted
    input: Option<PathBuf>,

    /// JSON file with sanitizer settings
    #[arg(long, env = "AMP_SANITIZE_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL for resolving relative image sources
    #[arg(long)]
    base_url: Option<String>,

    /// Content column width; resolves percentage widths and unknown sizes
    #[arg(long)]
    content_max_width: Option<u32>,

    /// Treat the input as oEmbed HTML for this URL
    #[arg(long)]
    embed_url: Option<String>,
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut html = String::new();
            std::io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read stdin")?;
            Ok(html)
        }
    }
}

fn load_config(cli: &Cli) -> Result<SanitizerConfig> {
    let mut builder = match &cli.config {
        Some(path) => SanitizerConfig::from_json_file(path)?.to_builder(),
        None => SanitizerConfig::builder(),
    };
    if let Some(base_url) = &cli.base_url {
        builder = builder.base_url(base_url.clone());
    }
    if cli.content_max_width.is_some() {
        builder = builder.content_max_width(cli.content_max_width);
    }
    builder.build()
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let html = read_input(cli.input.as_ref())?;

    let (output, scripts) = match &cli.embed_url {
        Some(url) => {
            let mut registry = EmbedRegistry::with_default_handlers(&config);
            let output = registry.filter_oembed_html(&html, url, &AttributeSet::new());
            let scripts = registry.required_scripts();
            registry.clear();
            (output, scripts)
        }
        None => {
            let extractor = DimensionExtractor::http(&config);
            let (output, report) = ImgSanitizer::new(&config, &extractor)
                .sanitize_html(&html)
                .await?;
            for diagnostic in &report.diagnostics {
                log::debug!("{diagnostic:?}");
            }
            (output, report.scripts)
        }
    };

    for (component, src) in &scripts {
        log::info!("Requires {component}: {src}");
    }

    println!("{output}");
    Ok(())
}
