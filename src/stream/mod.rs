//! Streamed chat response parsing
//!
//! Parses the newline-delimited record stream from the backend chat API.
//! Each record is framed as:
//! - `data: <json>` - an event payload with a `type` discriminator
//! - `data: [DONE]` - terminal sentinel, end of stream
//! - Anything else - noise, ignored
//!
//! # Module structure
//! - `events` - Event type definitions (StreamEvent enum, RecordParseError)
//! - `ingest` - Chunk decoding and line assembly (StreamIngestor)

mod events;
mod ingest;

// Re-export public types
pub use events::{parse_record, RecordParseError, StreamEvent};
pub use ingest::{classify_line, ChunkDecoder, LineAssembler, RecordLine, StreamIngestor};
