// Startup lifecycle stages and the static guidance injected into prompts
//
// Stage labels are only ever interpolated into prompt text. Lookups are
// exact-match and an unknown label simply yields no guidance.

use serde::Serialize;

/// Reference data for one lifecycle stage
#[derive(Debug, Clone, Serialize)]
pub struct StageInfo {
    /// Label shown to users and interpolated into the prompt
    pub label: &'static str,
    pub key_questions: &'static [&'static str],
    pub focus_areas: &'static [&'static str],
    /// Paragraph describing what matters at this stage
    pub context: &'static str,
    /// "If X → lens" rules listed in the ranking logic section
    pub ranking_heuristics: &'static [&'static str],
}

/// The five stages offered by the interactive front-end
pub static STARTUP_STAGES: &[StageInfo] = &[
    StageInfo {
        label: "IDEATION & PLANNING",
        key_questions: &[
            "Why are you building this prototype?",
            "What are your key objectives?",
            "What defines success for this prototype?",
            "What type of prototype do you need (low/high fidelity)?",
            "Who is your target audience and what do they need?",
            "How are they solving this problem today?",
            "What pain points exist in current solutions?",
        ],
        focus_areas: &[
            "Idea validation",
            "Market research",
            "User needs analysis",
            "Prototype planning",
        ],
        context: "Early stage focusing on idea validation, market research, and planning. \
At this stage, you need to validate core assumptions and understand market needs. \
SME insights help validate technical feasibility, Peer insights provide business model validation, \
Survey helps quantify market demand, Social reveals organic market conversations.",
        ranking_heuristics: &[
            "If highly technical/regulated → SME likely most valuable",
            "If business model unclear → Peer insights crucial",
            "If large consumer market → Survey for demand validation",
            "If trend/brand dependent → Social for market signals",
        ],
    },
    StageInfo {
        label: "PROTOTYPE DEVELOPMENT",
        key_questions: &[
            "Why are you building this prototype?",
            "What are your key objectives?",
            "What defines success for this prototype?",
            "What type of prototype is needed (low/high fidelity)?",
            "Who is your target audience and what do they need?",
            "How are users solving this problem currently?",
            "What pain points exist in current solutions?",
            "How easy is it for users to navigate and complete tasks?",
        ],
        focus_areas: &[
            "MVP development",
            "Team role clarity",
            "Task delegation",
            "User experience testing",
        ],
        context: "Building MVP stage focusing on product development and team coordination. \
At this stage, you need technical validation and user experience feedback. \
SME insights crucial for technical decisions, Peer insights for development best practices, \
Survey for feature prioritization, Social for competitive analysis.",
        ranking_heuristics: &[
            "If technical complexity high → SME for development guidance",
            "If user experience critical → Survey for user testing",
            "If business model validation needed → Peer for strategy",
            "If competitive landscape active → Social for positioning",
        ],
    },
    StageInfo {
        label: "VALIDATION & ITERATION",
        key_questions: &[
            "What problem does this prototype solve for you?",
            "What did you expect to see that was missing?",
            "How easy was it to navigate the prototype?",
            "Could you easily find what you were looking for?",
            "Did you encounter any difficulties while using the prototype?",
        ],
        focus_areas: &[
            "User feedback collection",
            "Usability testing",
            "Feature validation",
            "Market validation",
        ],
        context: "Testing and refining stage focusing on user feedback and usability. \
At this stage, direct user insights and iteration guidance are critical. \
Survey and Social become more valuable for user feedback, SME for technical optimization, \
Peer for scaling challenges.",
        ranking_heuristics: &[
            "If user feedback critical → Survey typically #1",
            "If technical optimization needed → SME for advanced insights",
            "If business model pivoting → Peer for strategic guidance",
            "If market positioning unclear → Social for perception",
        ],
    },
    StageInfo {
        label: "LAUNCH & SCALING",
        key_questions: &[
            "What's the launch market?",
            "How will you market?",
            "What's the revenue goal?",
            "What's the scaling strategy?",
        ],
        focus_areas: &[
            "Go-to-market strategy",
            "Customer acquisition",
            "Revenue generation",
            "Market expansion",
        ],
        context: "Go-to-market stage focusing on customer acquisition and scaling. \
At this stage, market strategy and growth insights are paramount. \
Peer insights for go-to-market strategies, Survey for pricing/positioning, \
Social for brand awareness, SME for operational scaling.",
        ranking_heuristics: &[
            "If go-to-market strategy unclear → Peer for execution insights",
            "If market sizing needed → Survey for demand quantification",
            "If brand building critical → Social for awareness strategies",
            "If operational scaling → SME for infrastructure",
        ],
    },
    StageInfo {
        label: "GROWTH & OPTIMIZATION",
        key_questions: &[
            "How will you reach your target market?",
            "What are your key distribution channels?",
            "What are your expected user/customer acquisition costs?",
            "How will you attract and retain customers?",
            "What are your key metrics for success?",
            "Who are your main competitors, and how do you differentiate yourself?",
            "How many people are on your team, and are they sufficient for your growth plans?",
        ],
        focus_areas: &[
            "Market penetration",
            "Customer retention",
            "Competitive analysis",
            "Team scaling",
            "Financial optimization",
        ],
        context: "Mature scaling stage focusing on optimization and expansion. \
At this stage, competitive intelligence and growth optimization are key. \
Survey for market expansion research, Social for competitive intelligence, \
Peer for scaling strategies, SME for advanced optimizations.",
        ranking_heuristics: &[
            "If competitive intelligence needed → Social for market dynamics",
            "If expansion planning → Survey for new market validation",
            "If operational optimization → SME for advanced systems",
            "If strategic pivoting → Peer for scaling experiences",
        ],
    },
];

/// The three stages accepted by the HTTP service
pub static SERVICE_STAGES: &[StageInfo] = &[
    StageInfo {
        label: "idea",
        key_questions: &[
            "Is the problem real and painful?",
            "Who has it most acutely?",
        ],
        focus_areas: &["Problem validation", "Market research"],
        context: "Pre-product stage. Favor methods that validate the problem and the market \
before anything is built.",
        ranking_heuristics: &[],
    },
    StageInfo {
        label: "prototype",
        key_questions: &[
            "Does the prototype solve the problem?",
            "Is it technically feasible to build?",
        ],
        focus_areas: &["Feasibility", "Usability feedback"],
        context: "A prototype exists. Favor methods that test feasibility and early usability \
with a small number of people.",
        ranking_heuristics: &[],
    },
    StageInfo {
        label: "beta",
        key_questions: &[
            "Do users keep coming back?",
            "What stops them from paying?",
        ],
        focus_areas: &["Retention", "Pricing", "Positioning"],
        context: "Real users are on the product. Favor methods that reach many users and \
capture organic sentiment at scale.",
        ranking_heuristics: &[],
    },
];

/// Exact-match lookup in the interactive stage table
pub fn lookup(label: &str) -> Option<&'static StageInfo> {
    STARTUP_STAGES.iter().find(|s| s.label == label)
}

/// Exact-match lookup in the service stage table
pub fn lookup_service(label: &str) -> Option<&'static StageInfo> {
    SERVICE_STAGES.iter().find(|s| s.label == label)
}

/// All interactive stage labels, in lifecycle order
pub fn stage_labels() -> Vec<&'static str> {
    STARTUP_STAGES.iter().map(|s| s.label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_exact_match() {
        let stage = lookup("LAUNCH & SCALING").unwrap();
        assert_eq!(stage.key_questions.len(), 4);
        assert!(lookup("launch & scaling").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_every_stage_has_guidance() {
        for stage in STARTUP_STAGES.iter().chain(SERVICE_STAGES) {
            assert!(!stage.context.is_empty(), "{} has no context", stage.label);
            assert!(!stage.focus_areas.is_empty());
            assert!(!stage.key_questions.is_empty());
        }
        for stage in STARTUP_STAGES {
            assert_eq!(stage.ranking_heuristics.len(), 4);
        }
    }

    #[test]
    fn test_service_stage_labels() {
        assert!(lookup_service("idea").is_some());
        assert!(lookup_service("prototype").is_some());
        assert!(lookup_service("beta").is_some());
        assert!(lookup_service("IDEATION & PLANNING").is_none());
    }

    #[test]
    fn test_stage_labels_order() {
        let labels = stage_labels();
        assert_eq!(labels.len(), 5);
        assert_eq!(labels[0], "IDEATION & PLANNING");
        assert_eq!(labels[4], "GROWTH & OPTIMIZATION");
    }
}
