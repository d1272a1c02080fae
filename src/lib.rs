//! Research lens selector
//!
//! Ranks four research lenses (SME, Peer, Survey, Social) for a startup idea
//! at a lifecycle stage by asking a hosted model, then checks and summarizes
//! the reply.

// Module declarations
pub mod config;
pub mod error;
pub mod models;
pub mod parsers;
pub mod pipeline;
pub mod prompt;
pub mod providers;
pub mod report;
pub mod shutdown;
pub mod stages;

// Server module (HTTP API)
pub mod server;

pub use error::{InputError, LensError, LensResult, ProviderError, ShapeError};
pub use models::{AnalysisResult, AnalysisSummary, Idea, Lens, LensAssessment};
pub use pipeline::LensSelector;
pub use prompt::PromptStyle;
pub use providers::{ModelOutput, ModelProvider, SharedProvider};
