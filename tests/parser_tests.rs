// Integration tests for lens output parsing
// These exercise extraction, decoding and validation through the public API only

#[cfg(test)]
mod parser_integration_tests {
    use lens_selector_lib::parsers::{decode_lens_array, extract_json_array, parse_lens_output};
    use lens_selector_lib::prompt::{COMPACT_REQUIRED_FIELDS, DETAILED_REQUIRED_FIELDS};
    use lens_selector_lib::{LensError, ShapeError};
    use serde_json::{json, Value};

    fn reply_with_ranks(ranks: &[i64]) -> Value {
        let lenses = ["SME", "Peer", "Survey", "Social"];
        Value::Array(
            ranks
                .iter()
                .zip(lenses.iter())
                .map(|(rank, lens)| {
                    json!({
                        "lens": lens,
                        "rank": rank,
                        "reason": "because",
                        "confidence": 0.5,
                        "confidenceBasis": "gut",
                        "pros": ["a"],
                        "cons": ["b"],
                        "stageRelevance": 0.6
                    })
                })
                .collect(),
        )
    }

    #[test]
    fn test_array_survives_surrounding_prose() {
        let array = reply_with_ranks(&[3, 1, 4, 2]);
        let prefixes = ["", "Sure! ", "Here is the ranking you asked for:\n\n", "```json\n"];
        let suffixes = ["", "\nLet me know if you need more.", "\n```", " (ranked by fit)"];

        for prefix in prefixes {
            for suffix in suffixes {
                let raw = format!("{}{}{}", prefix, serde_json::to_string_pretty(&array).unwrap(), suffix);
                let decoded = decode_lens_array(&raw).unwrap();
                assert_eq!(decoded.value, array, "prefix {:?} suffix {:?}", prefix, suffix);
                assert!(!decoded.repaired);
            }
        }
    }

    #[test]
    fn test_ranks_in_any_order_accepted() {
        for ranks in [[1, 2, 3, 4], [4, 3, 2, 1], [2, 1, 3, 4], [3, 4, 1, 2]] {
            let raw = reply_with_ranks(&ranks).to_string();
            let results = parse_lens_output(&raw, DETAILED_REQUIRED_FIELDS).unwrap();
            let got: Vec<i64> = results.iter().map(|a| a.rank as i64).collect();
            assert_eq!(got, ranks.to_vec());
        }
    }

    #[test]
    fn test_bad_rank_sets_rejected() {
        let dup = reply_with_ranks(&[1, 1, 2, 3]).to_string();
        assert!(matches!(
            parse_lens_output(&dup, DETAILED_REQUIRED_FIELDS),
            Err(LensError::InvalidRanks { .. })
        ));

        let zero = reply_with_ranks(&[0, 1, 2, 3]).to_string();
        assert!(matches!(
            parse_lens_output(&zero, DETAILED_REQUIRED_FIELDS),
            Err(LensError::InvalidRanks { .. })
        ));

        let three = reply_with_ranks(&[1, 2, 3]).to_string();
        assert!(matches!(
            parse_lens_output(&three, DETAILED_REQUIRED_FIELDS),
            Err(LensError::Shape(ShapeError::WrongLength(3)))
        ));
    }

    #[test]
    fn test_missing_field_named() {
        let mut value = reply_with_ranks(&[1, 2, 3, 4]);
        value[2].as_object_mut().unwrap().remove("cons");
        let err = parse_lens_output(&value.to_string(), COMPACT_REQUIRED_FIELDS).unwrap_err();
        assert!(matches!(
            err,
            LensError::Shape(ShapeError::MissingField { index: 2, field: "cons" })
        ));
    }

    #[test]
    fn test_python_style_reply_is_repaired() {
        let raw = "[{'lens': 'SME', 'rank': 1, 'reason': 'x', 'confidence': 0.9, 'pros': [], 'cons': [], 'extra': True}, \
                   {'lens': 'Peer', 'rank': 2, 'reason': 'x', 'confidence': 0.8, 'pros': [], 'cons': [], 'extra': None}, \
                   {'lens': 'Survey', 'rank': 3, 'reason': 'x', 'confidence': 0.7, 'pros': [], 'cons': [], 'extra': False}, \
                   {'lens': 'Social', 'rank': 4, 'reason': 'x', 'confidence': 0.6, 'pros': [], 'cons': []}]";
        let decoded = decode_lens_array(raw).unwrap();
        assert!(decoded.repaired);
        assert_eq!(decoded.value[0]["extra"], true);
        assert!(decoded.value[1]["extra"].is_null());

        let results = parse_lens_output(raw, COMPACT_REQUIRED_FIELDS).unwrap();
        assert_eq!(results.len(), 4);
    }

    #[test]
    fn test_undecodable_reply_keeps_raw_text() {
        let raw = "I cannot rank these lenses [sorry]";
        match decode_lens_array(raw) {
            Err(LensError::Decode { raw: kept, .. }) => assert_eq!(kept, raw),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_no_brackets_returns_trimmed_text() {
        assert_eq!(extract_json_array("  no json here \n"), "no json here");
    }
}
