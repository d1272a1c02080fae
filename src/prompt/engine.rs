// Template rendering engine using Tera

use super::builtin;
use anyhow::{anyhow, Result};
use serde::Serialize;
use tera::{Context, Tera};

/// Catalogue entry describing one research lens to the model
#[derive(Debug, Clone, Serialize)]
pub struct LensCatalogueEntry {
    pub name: &'static str,
    pub title: &'static str,
    /// One-line description for the compact template
    pub short: &'static str,
    pub what: &'static str,
    pub provides: &'static str,
    pub best_when: &'static str,
}

/// Static description of the four lenses and their typical strengths
pub static LENS_CATALOGUE: &[LensCatalogueEntry] = &[
    LensCatalogueEntry {
        name: "SME",
        title: "Subject Matter Expert Research",
        short: "interviews with experts",
        what: "Direct interviews with domain experts, industry veterans, technical specialists, regulatory experts",
        provides: "Deep technical validation, industry standards, regulatory requirements, feasibility assessment",
        best_when: "Complex technical challenges, regulated industries, specialized knowledge gaps, feasibility questions",
    },
    LensCatalogueEntry {
        name: "Peer",
        title: "Peer-to-Peer Research",
        short: "calls with fellow founders",
        what: "Conversations with fellow entrepreneurs, startup founders, business leaders who've faced similar challenges",
        provides: "Business model validation, go-to-market strategies, operational insights, scaling experiences",
        best_when: "Business strategy questions, operational challenges, fundraising, scaling decisions",
    },
    LensCatalogueEntry {
        name: "Survey",
        title: "Quantitative Research",
        short: "structured questions to users",
        what: "Structured questionnaires to collect statistical data from target users/customers",
        provides: "Market size validation, feature prioritization, pricing insights, user preference quantification",
        best_when: "Large addressable markets, consumer products, statistical validation needed, pricing decisions",
    },
    LensCatalogueEntry {
        name: "Social",
        title: "Social Media Analysis",
        short: "Reddit/Quora/Discord sentiment scraping",
        what: "Mining social platforms, forums, communities for organic conversations, sentiment, trends",
        provides: "Brand perception, competitive intelligence, market trends, organic user feedback",
        best_when: "Consumer brands, trend-dependent products, competitive analysis, brand-sensitive markets",
    },
];

/// Values interpolated into a prompt template
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptContext {
    pub title: String,
    pub description: String,
    pub tags: String,
    pub stage: String,
    pub stage_context: String,
    pub key_questions: Vec<String>,
    pub focus_areas: Vec<String>,
}

impl PromptContext {
    /// Convert to Tera context, adding the static catalogue and stage table
    pub fn to_tera_context(&self) -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", &self.title);
        ctx.insert("description", &self.description);
        ctx.insert("tags", &self.tags);
        ctx.insert("stage", &self.stage);
        ctx.insert("stage_context", &self.stage_context);
        ctx.insert("key_questions", &self.key_questions);
        ctx.insert("focus_areas", &self.focus_areas);
        ctx.insert("catalogue", LENS_CATALOGUE);
        ctx.insert("stages", crate::stages::STARTUP_STAGES);
        ctx
    }
}

/// Template engine for rendering prompts
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create an empty template engine
    pub fn new() -> Self {
        Self {
            tera: Tera::default(),
        }
    }

    /// Create an engine with every built-in template registered
    pub fn with_builtins() -> Result<Self> {
        let mut engine = Self::new();
        for (name, content) in builtin::get_builtin_templates() {
            engine.add_template(&name, &content)?;
        }
        Ok(engine)
    }

    /// Add a template from string
    pub fn add_template(&mut self, name: &str, template: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, template)
            .map_err(|e| anyhow!("Failed to add template '{}': {}", name, e))
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, context: &PromptContext) -> Result<String> {
        self.tera
            .render(template_name, &context.to_tera_context())
            .map_err(|e| anyhow!("Failed to render template '{}': {}", template_name, e))
    }

    /// Check if a template exists
    pub fn has_template(&self, name: &str) -> bool {
        self.tera.get_template_names().any(|n| n == name)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
