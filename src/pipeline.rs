// Lens selector pipeline
//
// One linear pass per request: build prompt, invoke the model once, extract and
// validate the reply, summarize. The provider handle is injected and shared;
// nothing else outlives a request.

use crate::error::{LensError, LensResult};
use crate::models::{AnalysisResult, Idea, LensAssessment};
use crate::parsers::{decode_lens_array, validate_assessments};
use crate::prompt::{PromptBuilder, PromptStyle};
use crate::providers::{ModelOutput, SharedProvider};
use crate::report;
use anyhow::Result;
use serde_json::Value;

/// A model reply that passed validation
#[derive(Debug, Clone)]
pub struct ValidatedReply {
    /// The decoded array as the model sent it, extra keys included
    pub value: Value,
    pub assessments: Vec<LensAssessment>,
}

pub struct LensSelector {
    provider: SharedProvider,
    prompts: PromptBuilder,
}

impl LensSelector {
    pub fn new(provider: SharedProvider, style: PromptStyle) -> Result<Self> {
        Ok(Self {
            provider,
            prompts: PromptBuilder::new(style)?,
        })
    }

    pub fn style(&self) -> PromptStyle {
        self.prompts.style()
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.provider_name()
    }

    /// Render the prompt for an idea at a stage
    pub fn build_prompt(&self, idea: &Idea, stage: &str) -> LensResult<String> {
        self.prompts
            .build(idea, stage)
            .map_err(|e| LensError::Prompt(e.to_string()))
    }

    /// Send the prompt to the provider, exactly once
    pub async fn invoke_model(&self, prompt: &str) -> LensResult<ModelOutput> {
        log::info!(
            "Calling {} ({})",
            self.provider.provider_name(),
            self.provider.model_name()
        );

        let output = self.provider.invoke(prompt).await?;

        if output.skipped_chunks > 0 {
            log::warn!(
                "Skipped {} undecodable stream chunk(s) from {}",
                output.skipped_chunks,
                self.provider.provider_name()
            );
        }
        log::debug!("Model returned {} chars", output.text.len());

        Ok(output)
    }

    /// Pull the JSON array out of a raw reply and check it
    pub fn extract_and_validate(&self, raw: &str) -> LensResult<ValidatedReply> {
        let decoded = decode_lens_array(raw)?;
        if decoded.repaired {
            log::debug!("Decoded after repair: {}", decoded.json);
        }
        let assessments =
            validate_assessments(&decoded.value, self.prompts.style().required_fields())?;
        Ok(ValidatedReply {
            value: decoded.value,
            assessments,
        })
    }

    /// Run the whole pipeline. Input is checked before any model call.
    ///
    /// Parse failures come back as `LensError::Unparsed` carrying the reply text.
    pub async fn analyze(&self, idea: &Idea, stage: &str) -> LensResult<AnalysisResult> {
        idea.validate()?;

        let prompt = self.build_prompt(idea, stage)?;
        let output = self.invoke_model(&prompt).await?;
        let checked = self.extract_and_validate(&output.text);
        let reply = match checked {
            Ok(reply) => reply,
            Err(error) => {
                return Err(LensError::Unparsed {
                    raw: output.text,
                    error: Box::new(error),
                })
            }
        };

        Ok(report::build_result(reply.assessments, stage))
    }
}
