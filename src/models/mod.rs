// Data models shared by the CLI and the HTTP service

use crate::error::InputError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lenses with confidence strictly above this value are called out in the summary
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.7;

/// One of the four research methods the model ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lens {
    #[serde(rename = "SME")]
    Sme,
    Peer,
    Survey,
    Social,
}

impl Lens {
    /// Catalogue order, as presented to the model
    pub const ALL: [Lens; 4] = [Lens::Sme, Lens::Peer, Lens::Survey, Lens::Social];

    pub fn as_str(&self) -> &'static str {
        match self {
            Lens::Sme => "SME",
            Lens::Peer => "Peer",
            Lens::Survey => "Survey",
            Lens::Social => "Social",
        }
    }

    /// Parse the exact lens name used in model output
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lens| lens.as_str() == name)
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup idea under analysis. Lives for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl Idea {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            tags,
        }
    }

    /// Build an idea from raw form input, where tags are free text
    /// separated by newlines or commas
    pub fn from_form(title: &str, description: &str, tags_text: &str) -> Result<Self, InputError> {
        if title.trim().is_empty() {
            return Err(InputError::EmptyTitle);
        }
        if description.trim().is_empty() {
            return Err(InputError::EmptyDescription);
        }
        if tags_text.trim().is_empty() {
            return Err(InputError::EmptyTags);
        }

        let tags = split_tags(tags_text);
        if tags.is_empty() {
            return Err(InputError::NoUsableTags);
        }

        Ok(Self::new(title.trim(), description.trim(), tags))
    }

    /// Check the required fields are non-empty
    pub fn validate(&self) -> Result<(), InputError> {
        if self.title.trim().is_empty() {
            return Err(InputError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(InputError::EmptyDescription);
        }
        if self.tags.is_empty() {
            return Err(InputError::EmptyTags);
        }
        if self.tags.iter().all(|t| t.trim().is_empty()) {
            return Err(InputError::NoUsableTags);
        }
        Ok(())
    }

    /// Tags joined the way they appear in the prompt
    pub fn joined_tags(&self) -> String {
        self.tags.join(", ")
    }
}

/// Split free-text tags on newlines and commas, dropping blanks
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// The model's verdict on a single lens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensAssessment {
    pub lens: Lens,
    /// 1 = most useful; the four ranks in one reply form a permutation of 1..=4
    pub rank: u8,
    pub reason: String,
    /// Nominally 0..=1
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence_basis: Option<String>,
    #[serde(default)]
    pub pros: Vec<String>,
    #[serde(default)]
    pub cons: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage_relevance: Option<f64>,
}

/// Derived statistics over the four assessments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub average_confidence: f64,
    pub high_confidence_lenses: Vec<Lens>,
    pub top_recommendation: Option<Lens>,
    pub stage: String,
}

/// Full analysis output: the validated assessments plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub results: Vec<LensAssessment>,
    pub summary: AnalysisSummary,
}

/// Request body for the lens selector endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LensSelectorRequest {
    pub study_id: String,
    pub idea: Idea,
    /// "idea", "prototype" or "beta"
    pub stage: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lens_serialization_names() {
        assert_eq!(serde_json::to_string(&Lens::Sme).unwrap(), "\"SME\"");
        assert_eq!(serde_json::to_string(&Lens::Social).unwrap(), "\"Social\"");
        let lens: Lens = serde_json::from_str("\"Peer\"").unwrap();
        assert_eq!(lens, Lens::Peer);
        assert!(serde_json::from_str::<Lens>("\"sme\"").is_err());
    }

    #[test]
    fn test_lens_from_name() {
        assert_eq!(Lens::from_name("Survey"), Some(Lens::Survey));
        assert_eq!(Lens::from_name("Expert"), None);
    }

    #[test]
    fn test_split_tags_newlines_and_commas() {
        let tags = split_tags("AI\nSaaS, Healthtech\n\n , mobile");
        assert_eq!(tags, vec!["AI", "SaaS", "Healthtech", "mobile"]);
    }

    #[test]
    fn test_from_form_rejects_each_empty_field() {
        assert_eq!(
            Idea::from_form("  ", "desc", "AI"),
            Err(InputError::EmptyTitle)
        );
        assert_eq!(
            Idea::from_form("PlantPal", "", "AI"),
            Err(InputError::EmptyDescription)
        );
        assert_eq!(
            Idea::from_form("PlantPal", "desc", " \n "),
            Err(InputError::EmptyTags)
        );
        assert_eq!(
            Idea::from_form("PlantPal", "desc", ",,\n,"),
            Err(InputError::NoUsableTags)
        );
    }

    #[test]
    fn test_from_form_trims() {
        let idea = Idea::from_form(" PlantPal ", " AI plant care app ", "AI\nconsumer").unwrap();
        assert_eq!(idea.title, "PlantPal");
        assert_eq!(idea.description, "AI plant care app");
        assert_eq!(idea.joined_tags(), "AI, consumer");
    }

    #[test]
    fn test_assessment_camel_case() {
        let json = r#"{
            "lens": "SME",
            "rank": 1,
            "reason": "experts",
            "confidence": 0.8,
            "confidenceBasis": "domain",
            "pros": ["a"],
            "cons": ["b"],
            "stageRelevance": 0.9
        }"#;
        let a: LensAssessment = serde_json::from_str(json).unwrap();
        assert_eq!(a.lens, Lens::Sme);
        assert_eq!(a.confidence_basis.as_deref(), Some("domain"));
        assert_eq!(a.stage_relevance, Some(0.9));

        let back = serde_json::to_value(&a).unwrap();
        assert_eq!(back["stageRelevance"], 0.9);
        assert_eq!(back["confidenceBasis"], "domain");
    }

    #[test]
    fn test_request_body_shape() {
        let body = r#"{
            "studyId": "s-1",
            "idea": {"title": "T", "description": "D", "tags": ["x"]},
            "stage": "beta"
        }"#;
        let req: LensSelectorRequest = serde_json::from_str(body).unwrap();
        assert_eq!(req.study_id, "s-1");
        assert_eq!(req.idea.tags, vec!["x"]);
        assert_eq!(req.stage, "beta");
    }
}
