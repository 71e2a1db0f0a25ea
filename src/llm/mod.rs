pub mod client;
pub mod gemini;
pub mod types;

pub use client::*;
pub use gemini::GeminiClient;
pub use types::*;

use crate::{Error, Result, config::LlmConfig};
use std::sync::Arc;
use tracing::{info, warn};

/// Builds the model client named by `config.provider`.
///
/// A missing API key is only logged here; the client reports it on first use
/// so the routes still come up.
pub fn create_model_client(config: &LlmConfig) -> Result<Arc<dyn ModelClient>> {
    if config.api_key.trim().is_empty() {
        warn!("GEMINI_API_KEY is not set; model requests will fail until it is configured");
    }

    info!(
        "Using {} provider with model {}",
        config.provider, config.model
    );

    match config.provider.as_str() {
        "gemini" => Ok(Arc::new(GeminiClient::new(config.clone())?)),
        "openai" => Ok(Arc::new(OpenAiClient::new(config.clone())?)),
        other => Err(Error::config(format!(
            "Unknown LLM provider: '{}'. Valid providers: gemini, openai",
            other
        ))),
    }
}
