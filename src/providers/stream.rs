// Reassembly of streamed model output
//
// Each chunk is a standalone JSON event. Text arrives in
// `contentBlockDelta.delta.text`; every other event type carries no text.
// A chunk that is empty or cannot be decoded is skipped and counted, and
// accumulation continues with the next one.

use serde_json::Value;

/// Concatenated text from a finished stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamedText {
    pub text: String,
    /// Chunks that were empty or failed to decode
    pub skipped_chunks: usize,
    /// Chunks that decoded, with or without a text delta
    pub decoded_chunks: usize,
}

/// Accumulates text deltas from a sequence of raw stream chunks
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    output: StreamedText,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw chunk
    pub fn push_chunk(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            self.output.skipped_chunks += 1;
            log::debug!("Skipping empty stream chunk");
            return;
        }

        let payload = match std::str::from_utf8(bytes)
            .map_err(|e| e.to_string())
            .and_then(|s| serde_json::from_str::<Value>(s).map_err(|e| e.to_string()))
        {
            Ok(payload) => payload,
            Err(e) => {
                self.output.skipped_chunks += 1;
                log::debug!("Skipping undecodable stream chunk ({} bytes): {}", bytes.len(), e);
                return;
            }
        };

        self.output.decoded_chunks += 1;
        if let Some(delta) = text_delta(&payload) {
            self.output.text.push_str(delta);
        }
    }

    /// Text accumulated so far
    pub fn text(&self) -> &str {
        &self.output.text
    }

    pub fn finish(self) -> StreamedText {
        self.output
    }
}

/// Pull the text delta out of a decoded stream event
pub fn text_delta(payload: &Value) -> Option<&str> {
    payload
        .get("contentBlockDelta")?
        .get("delta")?
        .get("text")?
        .as_str()
}

/// Accumulate a complete sequence of chunks
pub fn accumulate_chunks<I, B>(chunks: I) -> StreamedText
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut acc = StreamAccumulator::new();
    for chunk in chunks {
        acc.push_chunk(chunk.as_ref());
    }
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(text: &str) -> Vec<u8> {
        serde_json::json!({
            "contentBlockDelta": { "delta": { "text": text }, "contentBlockIndex": 0 }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn test_concatenates_deltas_in_order() {
        let out = accumulate_chunks(vec![delta("[{"), delta("\"a\":"), delta("1}]")]);
        assert_eq!(out.text, "[{\"a\":1}]");
        assert_eq!(out.skipped_chunks, 0);
        assert_eq!(out.decoded_chunks, 3);
    }

    #[test]
    fn test_skips_undecodable_chunk_and_continues() {
        let chunks = vec![
            delta("Hello"),
            b"{not json".to_vec(),
            delta(", "),
            vec![0xff, 0xfe, 0x00],
            delta("world"),
        ];
        let out = accumulate_chunks(chunks);
        assert_eq!(out.text, "Hello, world");
        assert_eq!(out.skipped_chunks, 2);
    }

    #[test]
    fn test_empty_chunk_counted_as_skipped() {
        let out = accumulate_chunks(vec![Vec::new(), delta("x")]);
        assert_eq!(out.text, "x");
        assert_eq!(out.skipped_chunks, 1);
    }

    #[test]
    fn test_events_without_text_are_not_skips() {
        let start = br#"{"messageStart":{"role":"assistant"}}"#.to_vec();
        let stop = br#"{"messageStop":{"stopReason":"end_turn"}}"#.to_vec();
        let out = accumulate_chunks(vec![start, delta("ok"), stop]);
        assert_eq!(out.text, "ok");
        assert_eq!(out.skipped_chunks, 0);
        assert_eq!(out.decoded_chunks, 3);
    }
}
