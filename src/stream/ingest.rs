//! Chunk decoding and line assembly for the chat stream
//!
//! The backend frames events as `data: <json>\n` records, but the network
//! hands us arbitrary byte chunks: a multi-byte character or a record can
//! be split across reads. [`ChunkDecoder`] holds back an incomplete UTF-8
//! sequence until the rest arrives, and [`LineAssembler`] holds back a
//! trailing partial line until its newline arrives. Together they make
//! ingestion independent of where the network happens to cut the stream.

use crate::stream::events::{parse_record, StreamEvent};

/// Prefix marking a line as carrying an event payload.
const DATA_PREFIX: &str = "data: ";

/// Payload value signaling end of stream.
const DONE_SENTINEL: &str = "[DONE]";

/// Classification of a single complete line from the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordLine<'a> {
    /// A `data: ` line carrying a record payload
    Payload(&'a str),
    /// The `data: [DONE]` terminal sentinel
    Done,
    /// Blank line or noise, ignored
    Skip,
}

/// Classify a complete line (without its trailing newline).
pub fn classify_line(line: &str) -> RecordLine<'_> {
    match line.strip_prefix(DATA_PREFIX) {
        Some(DONE_SENTINEL) => RecordLine::Done,
        Some(payload) => RecordLine::Payload(payload),
        None => RecordLine::Skip,
    }
}

/// Incremental UTF-8 decoder that tolerates chunk boundaries inside a
/// multi-byte character.
///
/// An incomplete trailing sequence is buffered until the next chunk; a
/// genuinely invalid sequence is replaced with U+FFFD so a corrupt byte
/// cannot take down the whole stream.
#[derive(Debug, Default)]
pub struct ChunkDecoder {
    pending: Vec<u8>,
}

impl ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid_up_to = e.valid_up_to();
                    // Safe: from_utf8 vouched for this prefix
                    out.push_str(std::str::from_utf8(&self.pending[..valid_up_to]).unwrap_or(""));

                    match e.error_len() {
                        None => {
                            // Incomplete sequence at the end - wait for more bytes
                            self.pending.drain(..valid_up_to);
                            return out;
                        }
                        Some(invalid_len) => {
                            out.push('\u{FFFD}');
                            self.pending.drain(..valid_up_to + invalid_len);
                        }
                    }
                }
            }
        }
    }

    /// Flush any buffered bytes at end of stream.
    ///
    /// A dangling incomplete sequence at this point is truly invalid and
    /// is replaced rather than dropped silently.
    pub fn flush(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let text = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        text
    }
}

/// Accumulates decoded text and yields complete newline-terminated lines.
///
/// A trailing segment with no newline is carried over and prefixed to the
/// next chunk's text instead of being processed prematurely.
#[derive(Debug, Default)]
pub struct LineAssembler {
    partial: String,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append decoded text, returning every line completed by it.
    /// Trailing carriage returns are stripped.
    pub fn push(&mut self, text: &str) -> Vec<String> {
        self.partial.push_str(text);

        let mut lines = Vec::new();
        while let Some(newline_pos) = self.partial.find('\n') {
            let line = self.partial[..newline_pos].trim_end_matches('\r').to_string();
            self.partial.drain(..=newline_pos);
            lines.push(line);
        }
        lines
    }

    /// Take the held-over partial line at end of stream, if any.
    pub fn flush(&mut self) -> Option<String> {
        if self.partial.is_empty() {
            return None;
        }
        let line = self.partial.trim_end_matches('\r').to_string();
        self.partial.clear();
        Some(line)
    }
}

/// Stateful ingestor turning raw response bytes into [`StreamEvent`]s.
///
/// Feed it chunks as they arrive; it emits complete events in order and
/// stops at the terminal sentinel. Malformed records are logged at `warn`
/// and skipped, never surfaced as errors. After [`StreamEvent::Done`] has
/// been emitted, further input is ignored even if bytes remain unread.
#[derive(Debug, Default)]
pub struct StreamIngestor {
    decoder: ChunkDecoder,
    lines: LineAssembler,
    done: bool,
}

impl StreamIngestor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the terminal sentinel has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk of bytes, returning all events it completed.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<StreamEvent> {
        if self.done {
            return Vec::new();
        }

        let text = self.decoder.decode(chunk);
        let mut events = Vec::new();
        for line in self.lines.push(&text) {
            self.ingest_line(&line, &mut events);
            if self.done {
                break;
            }
        }
        events
    }

    /// Signal end of stream, flushing any held-over partial line.
    ///
    /// The stream closing without `[DONE]` is an implicit completion, so
    /// no `Done` event is synthesized here.
    pub fn finish(&mut self) -> Vec<StreamEvent> {
        if self.done {
            return Vec::new();
        }

        let mut events = Vec::new();
        let tail = self.decoder.flush();
        for line in self.lines.push(&tail) {
            self.ingest_line(&line, &mut events);
            if self.done {
                return events;
            }
        }
        if let Some(line) = self.lines.flush() {
            self.ingest_line(&line, &mut events);
        }
        events
    }

    fn ingest_line(&mut self, line: &str, events: &mut Vec<StreamEvent>) {
        match classify_line(line) {
            RecordLine::Done => {
                self.done = true;
                events.push(StreamEvent::Done);
            }
            RecordLine::Payload(payload) => match parse_record(payload) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {
                    tracing::debug!(payload, "ignoring record with unrecognized type");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed stream record");
                }
            },
            RecordLine::Skip => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_payload_line() {
        assert_eq!(
            classify_line(r#"data: {"type": "status"}"#),
            RecordLine::Payload(r#"{"type": "status"}"#)
        );
    }

    #[test]
    fn test_classify_done_line() {
        assert_eq!(classify_line("data: [DONE]"), RecordLine::Done);
    }

    #[test]
    fn test_classify_noise_lines() {
        assert_eq!(classify_line(""), RecordLine::Skip);
        assert_eq!(classify_line("event: something"), RecordLine::Skip);
        // No space after the colon is not the sentinel prefix
        assert_eq!(classify_line("data:[DONE]"), RecordLine::Skip);
    }

    #[test]
    fn test_chunk_decoder_whole_chunk() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode("hello".as_bytes()), "hello");
        assert_eq!(decoder.flush(), "");
    }

    #[test]
    fn test_chunk_decoder_split_multibyte() {
        // "é" is 0xC3 0xA9
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&[b'a', 0xC3]), "a");
        assert_eq!(decoder.decode(&[0xA9, b'b']), "éb");
    }

    #[test]
    fn test_chunk_decoder_split_four_byte_emoji() {
        let bytes = "🎯".as_bytes();
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&bytes[..1]), "");
        assert_eq!(decoder.decode(&bytes[1..3]), "");
        assert_eq!(decoder.decode(&bytes[3..]), "🎯");
    }

    #[test]
    fn test_chunk_decoder_invalid_sequence_replaced() {
        let mut decoder = ChunkDecoder::new();
        // 0xFF can never start a UTF-8 sequence
        assert_eq!(decoder.decode(&[b'a', 0xFF, b'b']), "a\u{FFFD}b");
    }

    #[test]
    fn test_chunk_decoder_flush_dangling_sequence() {
        let mut decoder = ChunkDecoder::new();
        assert_eq!(decoder.decode(&[0xC3]), "");
        assert_eq!(decoder.flush(), "\u{FFFD}");
    }

    #[test]
    fn test_line_assembler_carries_partial_line() {
        let mut lines = LineAssembler::new();
        assert_eq!(lines.push("data: {\"ty"), Vec::<String>::new());
        assert_eq!(lines.push("pe\": \"x\"}\n"), vec![r#"data: {"type": "x"}"#]);
        assert_eq!(lines.flush(), None);
    }

    #[test]
    fn test_line_assembler_multiple_lines_one_push() {
        let mut lines = LineAssembler::new();
        assert_eq!(lines.push("a\nb\nc"), vec!["a", "b"]);
        assert_eq!(lines.flush(), Some("c".to_string()));
    }

    #[test]
    fn test_line_assembler_strips_carriage_return() {
        let mut lines = LineAssembler::new();
        assert_eq!(lines.push("a\r\n"), vec!["a"]);
    }

    #[test]
    fn test_ingestor_stops_at_done() {
        let mut ingestor = StreamIngestor::new();
        let events = ingestor.feed(
            b"data: {\"type\": \"status\", \"message\": \"a\"}\ndata: [DONE]\ndata: {\"type\": \"status\", \"message\": \"b\"}\n",
        );
        assert_eq!(
            events,
            vec![
                StreamEvent::Status {
                    message: "a".to_string()
                },
                StreamEvent::Done,
            ]
        );
        assert!(ingestor.is_done());
        // Everything after the sentinel is ignored
        assert!(ingestor.feed(b"data: {\"type\": \"status\", \"message\": \"c\"}\n").is_empty());
        assert!(ingestor.finish().is_empty());
    }

    #[test]
    fn test_ingestor_malformed_record_skipped() {
        let mut ingestor = StreamIngestor::new();
        let events = ingestor.feed(
            b"data: {oops\ndata: {\"type\": \"status\", \"message\": \"ok\"}\n",
        );
        assert_eq!(
            events,
            vec![StreamEvent::Status {
                message: "ok".to_string()
            }]
        );
    }

    #[test]
    fn test_ingestor_finish_without_done() {
        let mut ingestor = StreamIngestor::new();
        assert!(ingestor.feed(b"data: {\"type\": \"summary\", \"message\": \"s\"}").is_empty());
        // Stream ends mid-line: the carried-over segment is still parsed
        assert_eq!(
            ingestor.finish(),
            vec![StreamEvent::Summary {
                message: "s".to_string()
            }]
        );
        assert!(!ingestor.is_done());
    }
}
