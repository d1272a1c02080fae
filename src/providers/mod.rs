// Hosted model providers
//
// A provider performs exactly one outbound call per prompt and hands back the
// raw text. Nothing here retries or overrides the SDK/HTTP client timeouts.

pub mod anthropic;
pub mod bedrock;
pub mod stream;

pub use anthropic::{AnthropicConfig, AnthropicProvider};
pub use bedrock::{BedrockConfig, BedrockProvider};
pub use stream::{accumulate_chunks, StreamAccumulator, StreamedText};

use crate::config::Settings;
use crate::error::ProviderError;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Raw model reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelOutput {
    pub text: String,
    /// Stream chunks dropped during reassembly (always 0 for single-shot calls)
    pub skipped_chunks: usize,
}

impl ModelOutput {
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            skipped_chunks: 0,
        }
    }
}

impl From<StreamedText> for ModelOutput {
    fn from(streamed: StreamedText) -> Self {
        Self {
            text: streamed.text,
            skipped_chunks: streamed.skipped_chunks,
        }
    }
}

/// A hosted generative model
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send one prompt, return the model's text
    async fn invoke(&self, prompt: &str) -> Result<ModelOutput, ProviderError>;

    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Shared, read-only provider handle
pub type SharedProvider = Arc<dyn ModelProvider>;

/// Which provider to talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    Bedrock,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Anthropic => f.write_str("anthropic"),
            ProviderKind::Bedrock => f.write_str("bedrock"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "bedrock" | "nova" => Ok(ProviderKind::Bedrock),
            other => Err(format!("Unknown provider: {}", other)),
        }
    }
}

/// Build the process-wide provider handle from settings.
///
/// Missing credentials are a configuration error and should end the process.
pub async fn create_provider(kind: ProviderKind, settings: &Settings) -> Result<SharedProvider> {
    match kind {
        ProviderKind::Anthropic => {
            let api_key = crate::config::resolve_anthropic_api_key(settings.secrets_file.as_deref())?;
            let config = AnthropicConfig {
                api_key,
                ..settings.anthropic.clone()
            };
            let provider = AnthropicProvider::new(config)
                .map_err(|e| anyhow!("Failed to initialize Anthropic client: {}", e))?;
            log::info!(
                "Anthropic client initialized (model {})",
                provider.model_name()
            );
            Ok(Arc::new(provider))
        }
        ProviderKind::Bedrock => {
            let provider = BedrockProvider::from_env(settings.bedrock.clone()).await?;
            log::info!(
                "Bedrock client initialized (model {}, region {})",
                provider.model_name(),
                settings.bedrock.region
            );
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("anthropic".parse::<ProviderKind>(), Ok(ProviderKind::Anthropic));
        assert_eq!("Bedrock".parse::<ProviderKind>(), Ok(ProviderKind::Bedrock));
        assert_eq!("nova".parse::<ProviderKind>(), Ok(ProviderKind::Bedrock));
        assert!("openai".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_model_output_from_stream() {
        let out: ModelOutput = StreamedText {
            text: "abc".to_string(),
            skipped_chunks: 2,
            decoded_chunks: 5,
        }
        .into();
        assert_eq!(out.text, "abc");
        assert_eq!(out.skipped_chunks, 2);
    }
}
