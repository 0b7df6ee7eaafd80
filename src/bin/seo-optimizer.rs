//! seo-optimizer -- standalone MCP content optimization server.
//!
//! Usage: seo-optimizer --store <path>
//!
//! The AI backend is configured through the environment:
//! `SEO_OPTIMIZER_PROVIDER` (openai | grok | anthropic | gemini),
//! `SEO_OPTIMIZER_API_KEY`, and optionally `SEO_OPTIMIZER_MODEL`.
//! Without a key, AI-backed operations return a configuration error.

use seo_optimizer::ai::{GeneratorConfig, Provider};
use seo_optimizer::server::ServerConfig;

fn main() -> anyhow::Result<()> {
    // Initialize tracing to stderr so it does not interfere with MCP stdio.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store_root = std::env::args()
        .skip_while(|a| a != "--store")
        .nth(1)
        .unwrap_or_else(|| ".".to_string());

    let store_root = std::path::Path::new(&store_root).canonicalize()?;

    let config = ServerConfig {
        store_root,
        generator: generator_from_env()?,
    };

    seo_optimizer::run_server(config)
}

fn generator_from_env() -> anyhow::Result<Option<GeneratorConfig>> {
    let Ok(api_key) = std::env::var("SEO_OPTIMIZER_API_KEY") else {
        return Ok(None);
    };
    let provider: Provider = std::env::var("SEO_OPTIMIZER_PROVIDER")
        .unwrap_or_else(|_| "openai".to_string())
        .parse()
        .map_err(anyhow::Error::msg)?;
    let model_id = std::env::var("SEO_OPTIMIZER_MODEL").ok();

    Ok(Some(GeneratorConfig {
        provider,
        api_key,
        model_id,
    }))
}
