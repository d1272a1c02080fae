// Integration tests for streamed reply reassembly feeding the lens parser

#[cfg(test)]
mod streaming_integration_tests {
    use lens_selector_lib::parsers::parse_lens_output;
    use lens_selector_lib::prompt::COMPACT_REQUIRED_FIELDS;
    use lens_selector_lib::providers::{accumulate_chunks, ModelOutput};
    use lens_selector_lib::Lens;
    use serde_json::json;

    fn delta(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({ "contentBlockDelta": { "delta": { "text": text } } }))
            .unwrap()
    }

    #[test]
    fn test_reply_split_across_chunks_still_parses() {
        let reply = r#"Ranking:
[{"lens": "Survey", "rank": 1, "reason": "r", "confidence": 0.9, "pros": [], "cons": []},
 {"lens": "SME", "rank": 2, "reason": "r", "confidence": 0.8, "pros": [], "cons": []},
 {"lens": "Peer", "rank": 3, "reason": "r", "confidence": 0.4, "pros": [], "cons": []},
 {"lens": "Social", "rank": 4, "reason": "r", "confidence": 0.3, "pros": [], "cons": []}]"#;

        // Split into uneven pieces, with stream noise in between
        let mut chunks: Vec<Vec<u8>> = vec![
            serde_json::to_vec(&json!({ "messageStart": { "role": "assistant" } })).unwrap(),
        ];
        let bytes: Vec<char> = reply.chars().collect();
        for (i, piece) in bytes.chunks(17).enumerate() {
            chunks.push(delta(&piece.iter().collect::<String>()));
            if i == 3 {
                chunks.push(b"{not json".to_vec());
            }
            if i == 5 {
                chunks.push(Vec::new());
            }
        }
        chunks.push(serde_json::to_vec(&json!({ "messageStop": { "stopReason": "end_turn" } })).unwrap());

        let streamed = accumulate_chunks(&chunks);
        assert_eq!(streamed.text, reply);
        assert_eq!(streamed.skipped_chunks, 2);

        let output: ModelOutput = streamed.into();
        let results = parse_lens_output(&output.text, COMPACT_REQUIRED_FIELDS).unwrap();
        assert_eq!(results[0].lens, Lens::Survey);
        assert_eq!(results[0].rank, 1);
    }

    #[test]
    fn test_undecodable_chunk_keeps_order_of_remaining_deltas() {
        let chunks = vec![delta("alpha "), vec![0xff, 0xfe], delta("beta "), delta("gamma")];
        let streamed = accumulate_chunks(chunks);
        assert_eq!(streamed.text, "alpha beta gamma");
        assert_eq!(streamed.skipped_chunks, 1);
        assert_eq!(streamed.decoded_chunks, 3);
    }
}
