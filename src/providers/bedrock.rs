// AWS Bedrock provider for Amazon Nova Micro (streaming)

use super::stream::StreamAccumulator;
use super::{ModelOutput, ModelProvider};
use crate::error::ProviderError;
use anyhow::Result;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::DisplayErrorContext;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::types::ResponseStream;
use aws_sdk_bedrockruntime::Client;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_MODEL_ID: &str = "apac.amazon.nova-micro-v1:0";
const PROVIDER_NAME: &str = "Bedrock";

/// Configuration for the Bedrock provider. Credentials come from the
/// standard AWS environment/profile chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BedrockConfig {
    pub region: String,
    /// Model id or inference profile ARN
    pub model_id: String,
    pub max_new_tokens: u32,
}

impl Default for BedrockConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            max_new_tokens: 1200,
        }
    }
}

/// Nova Micro over Bedrock's response stream API
pub struct BedrockProvider {
    config: BedrockConfig,
    client: Client,
}

impl BedrockProvider {
    pub fn new(config: BedrockConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// Load AWS configuration from the environment for the configured region
    pub async fn from_env(config: BedrockConfig) -> Result<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;
        let client = Client::new(&sdk_config);
        Ok(Self::new(config, client))
    }

    /// Serialized Nova request body for a prompt
    pub fn request_body(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let body = NovaRequest {
            inference_config: InferenceConfig {
                max_new_tokens: self.config.max_new_tokens,
            },
            messages: vec![NovaMessage {
                role: "user".to_string(),
                content: vec![NovaContent {
                    text: prompt.to_string(),
                }],
            }],
        };
        serde_json::to_vec(&body)
            .map_err(|e| ProviderError::new(PROVIDER_NAME, format!("Failed to encode request: {}", e)))
    }
}

#[async_trait]
impl ModelProvider for BedrockProvider {
    async fn invoke(&self, prompt: &str) -> Result<ModelOutput, ProviderError> {
        let body = self.request_body(prompt)?;

        log::debug!(
            "Invoking {} in {} with {} byte prompt",
            self.config.model_id,
            self.config.region,
            prompt.len()
        );

        let mut output = self
            .client
            .invoke_model_with_response_stream()
            .model_id(&self.config.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| ProviderError::new(PROVIDER_NAME, DisplayErrorContext(&e).to_string()))?;

        let mut acc = StreamAccumulator::new();
        loop {
            match output.body.recv().await {
                Ok(Some(ResponseStream::Chunk(part))) => match part.bytes() {
                    Some(bytes) => acc.push_chunk(bytes.as_ref()),
                    None => acc.push_chunk(&[]),
                },
                Ok(Some(other)) => {
                    log::trace!("Ignoring non-chunk stream event: {:?}", other);
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(ProviderError::new(
                        PROVIDER_NAME,
                        format!("Stream error: {}", DisplayErrorContext(&e)),
                    ));
                }
            }
        }

        let streamed = acc.finish();
        log::debug!(
            "Stream finished: {} chars, {} chunks decoded, {} skipped",
            streamed.text.len(),
            streamed.decoded_chunks,
            streamed.skipped_chunks
        );

        Ok(streamed.into())
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn model_name(&self) -> &str {
        &self.config.model_id
    }
}

// Nova request types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NovaRequest {
    inference_config: InferenceConfig,
    messages: Vec<NovaMessage>,
}

#[derive(Debug, Serialize)]
struct InferenceConfig {
    max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
struct NovaMessage {
    role: String,
    content: Vec<NovaContent>,
}

#[derive(Debug, Serialize)]
struct NovaContent {
    text: String,
}
