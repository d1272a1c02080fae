// Prompt construction for lens ranking requests

pub mod builtin;
pub mod engine;

pub use engine::{LensCatalogueEntry, PromptContext, TemplateEngine, LENS_CATALOGUE};

use crate::models::Idea;
use crate::stages::{self, StageInfo};
use anyhow::Result;

/// Fields every element must carry in the detailed variant
pub const DETAILED_REQUIRED_FIELDS: &[&str] = &[
    "lens",
    "rank",
    "reason",
    "confidence",
    "pros",
    "cons",
    "stageRelevance",
];

/// Fields every element must carry in the compact (service) variant
pub const COMPACT_REQUIRED_FIELDS: &[&str] = &["lens", "rank", "reason", "confidence", "pros", "cons"];

/// Which prompt template and field set a pipeline uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    /// Five lifecycle stages, full lens catalogue, `stageRelevance` required
    Detailed,
    /// Three service stages, short catalogue
    Compact,
}

impl PromptStyle {
    pub fn template_name(&self) -> &'static str {
        match self {
            PromptStyle::Detailed => builtin::LENS_ANALYSIS,
            PromptStyle::Compact => builtin::LENS_RANKING,
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            PromptStyle::Detailed => DETAILED_REQUIRED_FIELDS,
            PromptStyle::Compact => COMPACT_REQUIRED_FIELDS,
        }
    }

    fn lookup_stage(&self, stage: &str) -> Option<&'static StageInfo> {
        match self {
            PromptStyle::Detailed => stages::lookup(stage),
            PromptStyle::Compact => stages::lookup_service(stage),
        }
    }
}

/// Renders prompts from the built-in templates. Immutable once built, so it
/// can be shared between concurrent requests.
pub struct PromptBuilder {
    engine: TemplateEngine,
    style: PromptStyle,
}

impl PromptBuilder {
    pub fn new(style: PromptStyle) -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::with_builtins()?,
            style,
        })
    }

    pub fn style(&self) -> PromptStyle {
        self.style
    }

    /// Build the context for an idea at a stage. Unknown stages get empty guidance.
    pub fn context_for(&self, idea: &Idea, stage: &str) -> PromptContext {
        let info = self.style.lookup_stage(stage);
        if info.is_none() {
            log::debug!("No guidance for stage '{}', rendering without it", stage);
        }

        PromptContext {
            title: idea.title.clone(),
            description: idea.description.clone(),
            tags: idea.joined_tags(),
            stage: stage.to_string(),
            stage_context: info.map(|s| s.context.to_string()).unwrap_or_default(),
            key_questions: info
                .map(|s| s.key_questions.iter().map(|q| q.to_string()).collect())
                .unwrap_or_default(),
            focus_areas: info
                .map(|s| s.focus_areas.iter().map(|f| f.to_string()).collect())
                .unwrap_or_default(),
        }
    }

    /// Render the prompt text
    pub fn build(&self, idea: &Idea, stage: &str) -> Result<String> {
        let context = self.context_for(idea, stage);
        self.engine.render(self.style.template_name(), &context)
    }
}

/// Convenience function to render a prompt with a throwaway builder
pub fn build_prompt(idea: &Idea, stage: &str, style: PromptStyle) -> Result<String> {
    PromptBuilder::new(style)?.build(idea, stage)
}
