// Lens output parser - pulls the JSON array out of a model reply and checks its shape
//
// Decoding is strict first. Only when strict decoding fails is the reply run
// through a best-effort repair pass (single quotes and Python literals) and
// decoded again. The repair pass rewrites every apostrophe, so text fields
// containing one can still come out mangled or fail to decode. That is a known
// limitation of repairing near-JSON and is reported as a decode error.

use crate::error::{LensError, LensResult, ShapeError};
use crate::models::{Lens, LensAssessment};
use regex::Regex;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Number of lenses a reply must rank
pub const EXPECTED_ASSESSMENTS: usize = 4;

/// Result of decoding a model reply
#[derive(Debug, Clone)]
pub struct DecodedOutput {
    pub value: Value,
    /// The JSON text that was finally decoded
    pub json: String,
    /// Whether the repair pass was needed
    pub repaired: bool,
}

/// Slice from the first `[` through the last `]`. Replies without a
/// bracketed section come back trimmed but otherwise untouched.
pub fn extract_json_array(raw: &str) -> &str {
    let json_start = raw.find('[');
    let json_end = raw.rfind(']');

    match (json_start, json_end) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw.trim(),
    }
}

fn python_literal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(True|False|None)\b").expect("valid literal regex"))
}

/// Best-effort rewrite of near-JSON into JSON
pub fn repair_json(text: &str) -> String {
    let quoted = text.replace('\'', "\"");
    python_literal_re()
        .replace_all(&quoted, |caps: &regex::Captures| match &caps[1] {
            "True" => "true",
            "False" => "false",
            _ => "null",
        })
        .into_owned()
}

/// Extract and decode the JSON payload of a model reply
pub fn decode_lens_array(raw: &str) -> LensResult<DecodedOutput> {
    let json = extract_json_array(raw);

    let strict_err = match serde_json::from_str::<Value>(json) {
        Ok(value) => {
            return Ok(DecodedOutput {
                value,
                json: json.to_string(),
                repaired: false,
            })
        }
        Err(e) => e,
    };

    log::debug!("Strict decode failed ({}), trying repair pass", strict_err);

    let repaired = repair_json(json);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => {
            log::warn!("Model reply needed quote/literal repair before decoding");
            Ok(DecodedOutput {
                value,
                json: repaired,
                repaired: true,
            })
        }
        Err(_) => Err(LensError::Decode {
            message: strict_err.to_string(),
            raw: raw.to_string(),
        }),
    }
}

/// Read a rank as an integer, accepting integral floats like `2.0`
fn rank_of(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

/// JSON type a known field must carry when present
#[derive(Clone, Copy)]
enum FieldKind {
    Text,
    Number,
    TextList,
}

impl FieldKind {
    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::TextList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            FieldKind::Text => "expected a string",
            FieldKind::Number => "expected a number",
            FieldKind::TextList => "expected an array of strings",
        }
    }
}

/// Typed fields other than `lens` and `rank`. `null` is allowed for the optional ones.
const FIELD_KINDS: &[(&str, FieldKind, bool)] = &[
    ("reason", FieldKind::Text, false),
    ("confidence", FieldKind::Number, false),
    ("confidenceBasis", FieldKind::Text, true),
    ("pros", FieldKind::TextList, false),
    ("cons", FieldKind::TextList, false),
    ("stageRelevance", FieldKind::Number, true),
];

fn check_field_kinds(
    index: usize,
    object: &serde_json::Map<String, Value>,
) -> Result<(), ShapeError> {
    for &(field, kind, nullable) in FIELD_KINDS {
        let Some(value) = object.get(field) else {
            continue;
        };
        if (nullable && value.is_null()) || kind.matches(value) {
            continue;
        }
        return Err(ShapeError::InvalidField {
            index,
            field,
            message: format!("{}, got {}", kind.expected(), value),
        });
    }
    Ok(())
}

/// Check the decoded reply is four complete lens objects, one per lens, with
/// ranks 1..=4
///
/// Shape problems are reported before ranking problems, so a reply missing
/// `rank` entirely is a `MissingField`, not `InvalidRanks`.
pub fn validate_assessments(
    value: &Value,
    required_fields: &[&'static str],
) -> LensResult<Vec<LensAssessment>> {
    let items = value.as_array().ok_or(ShapeError::NotAnArray)?;
    if items.len() != EXPECTED_ASSESSMENTS {
        return Err(ShapeError::WrongLength(items.len()).into());
    }

    let mut seen = HashSet::with_capacity(EXPECTED_ASSESSMENTS);
    for (index, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or(ShapeError::NotAnObject { index })?;
        for &field in required_fields {
            if !object.contains_key(field) {
                return Err(ShapeError::MissingField { index, field }.into());
            }
        }
        if let Some(lens) = object.get("lens") {
            let name = lens.as_str().map(str::to_string).unwrap_or_else(|| lens.to_string());
            match lens.as_str().and_then(Lens::from_name) {
                None => return Err(ShapeError::UnknownLens { index, name }.into()),
                // Four items and no repeats means every lens appears exactly once
                Some(known) if !seen.insert(known) => {
                    return Err(ShapeError::DuplicateLens { index, name }.into());
                }
                Some(_) => {}
            }
        }
        check_field_kinds(index, object)?;
    }

    let mut ranks = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let rank = item.get("rank").and_then(rank_of).ok_or_else(|| ShapeError::InvalidField {
            index,
            field: "rank",
            message: "expected an integer".to_string(),
        })?;
        ranks.push(rank);
    }
    let mut sorted = ranks.clone();
    sorted.sort_unstable();
    if sorted != [1, 2, 3, 4] {
        return Err(LensError::InvalidRanks { ranks });
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let mut item = item.clone();
            // Integral float ranks were accepted above; normalize before typed decode
            if let Some(rank) = item.get("rank").and_then(rank_of) {
                item["rank"] = Value::from(rank);
            }
            serde_json::from_value::<LensAssessment>(item).map_err(|e| {
                LensError::from(ShapeError::InvalidField {
                    index,
                    field: "item",
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

/// Extract, decode and validate in one step
pub fn parse_lens_output(
    raw: &str,
    required_fields: &[&'static str],
) -> LensResult<Vec<LensAssessment>> {
    let decoded = decode_lens_array(raw)?;
    validate_assessments(&decoded.value, required_fields)
}
