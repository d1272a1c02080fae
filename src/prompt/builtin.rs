// Built-in prompt templates (Tera syntax)

use std::collections::HashMap;

/// Built-in template names
pub const LENS_ANALYSIS: &str = "lens_analysis";
pub const LENS_RANKING: &str = "lens_ranking";

/// Get all built-in templates
pub fn get_builtin_templates() -> HashMap<String, String> {
    let mut templates = HashMap::new();
    templates.insert(LENS_ANALYSIS.to_string(), LENS_ANALYSIS_TEMPLATE.to_string());
    templates.insert(LENS_RANKING.to_string(), LENS_RANKING_TEMPLATE.to_string());
    templates
}

/// Get a specific built-in template
pub fn get_builtin_template(name: &str) -> Option<&'static str> {
    match name {
        LENS_ANALYSIS => Some(LENS_ANALYSIS_TEMPLATE),
        LENS_RANKING => Some(LENS_RANKING_TEMPLATE),
        _ => None,
    }
}

/// Full analysis prompt used by the interactive front-end
const LENS_ANALYSIS_TEMPLATE: &str = r#"
You are an expert startup advisor with deep knowledge of research methodologies. Analyze this startup and determine which research method would provide the MOST actionable insights at this specific stage.

STARTUP CONTEXT:
- Title: {{ title }}
- Description: {{ description }}
- Tags: {{ tags }}
- Current Stage: {{ stage }}

STAGE CONTEXT: {{ stage_context }}
{% if key_questions %}
KEY QUESTIONS AT THIS STAGE:
{% for question in key_questions %}- {{ question }}
{% endfor %}
FOCUS AREAS: {{ focus_areas | join(sep=", ") }}
{% endif %}
RESEARCH LENSES TO ANALYZE:
{% for lens in catalogue %}
{{ lens.name }} ({{ lens.title }}):
- What: {{ lens.what }}
- Provides: {{ lens.provides }}
- Best when: {{ lens.best_when }}
{% endfor %}
CRITICAL RANKING LOGIC:
{% for s in stages %}
For {{ s.label }} stage:
{% for rule in s.ranking_heuristics %}- {{ rule }}
{% endfor %}{% endfor %}
RANKING REQUIREMENTS:
1. Assign ranks 1-4 where 1 = most valuable, 4 = least valuable
2. Each lens must have a UNIQUE rank (no ties)
3. Rank based on which method provides the MOST ACTIONABLE insights for this specific startup at this stage
4. Consider: stage needs + domain complexity + target market + business model + title specifics + description details + tag implications
5. Rankings must vary significantly across different contexts - avoid defaulting to same patterns
6. CRITICAL: Analyze the COMPLETE startup context (title + description + tags + stage) to determine rankings

CONTEXT ANALYSIS REQUIREMENTS:
- Analyze the startup TITLE for business model clues
- Analyze the DESCRIPTION for technical complexity, target market, and value proposition
- Analyze the TAGS for domain, technology stack, and market type
- Analyze the STAGE for specific research needs at this phase
- Combine ALL these factors to determine optimal research lens ranking

Return ONLY a valid JSON array with this exact structure:
[
{% for lens in catalogue %}  {
    "lens": "{{ lens.name }}",
    "rank": [1, 2, 3, or 4 - calculated based on value for this specific context],
    "reason": "Brief explanation why this rank for this specific startup/stage considering title, description, tags, and stage",
    "confidence": [0.1_TO_1.0],
    "confidenceBasis": "Why you're confident/uncertain about this ranking",
    "pros": ["Advantage 1 for this context", "Advantage 2 for this context"],
    "cons": ["Limitation 1 for this context", "Limitation 2 for this context"],
    "stageRelevance": [0.1_TO_1.0]
  }{% if not loop.last %},{% endif %}
{% endfor %}]

IMPORTANT: Analyze the specific context deeply and rank based on maximum actionable value. Different startups with different titles, descriptions, tags, and stages should get significantly different rankings. Rankings must be context-sensitive and vary meaningfully.
"#;

/// Short ranking prompt used by the HTTP service
const LENS_RANKING_TEMPLATE: &str = r#"
You are an AI research strategist helping a startup choose the best validation methods.

Given:
- Idea Title: {{ title }}
- Description: {{ description }}
- Tags: {{ tags }}
- Stage: {{ stage }}
{% if stage_context %}
Stage guidance: {{ stage_context }}
{% endif %}
Available research lenses:
{% for lens in catalogue %}- {{ lens.name }} ({{ lens.short }})
{% endfor %}
Your job:
1. Rank the 4 lenses (1 = most useful).
2. For each lens, provide:
   - rank
   - confidence (0–1)
   - reason (why it's useful or not)
   - confidenceBasis (how you derived the score)
   - pros (1–2 bullets)
   - cons (1–2 bullets)

Format the output as a JSON array like this:
[
  {
    "lens": "SME",
    "rank": 1,
    "reason": "...",
    "confidence": 0.85,
    "confidenceBasis": "...",
    "pros": ["...", "..."],
    "cons": ["...", "..."]
  },
  ...
]

Return ONLY valid JSON with 4 entries.
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert!(get_builtin_template(LENS_ANALYSIS).is_some());
        assert!(get_builtin_template(LENS_RANKING).is_some());
        assert!(get_builtin_template("missing").is_none());
        assert_eq!(get_builtin_templates().len(), 2);
    }
}
