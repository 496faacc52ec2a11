//! Stream event types and record classification
//!
//! Contains the StreamEvent enum with all event variants emitted by the
//! backend chat streaming API, plus the per-record parsing logic.

use serde_json::Value;

/// Typed events decoded from the chat stream.
///
/// The recommendation payload is carried as raw JSON: the ingestion layer
/// never interprets or reshapes its fields. A typed view for rendering
/// lives in [`crate::models::Recommendation`].
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// Progress update while the backend works
    Status { message: String },
    /// A generated campaign recommendation, payload passed through verbatim
    Recommendation { data: Value },
    /// Final summary once all recommendations have been produced
    Summary { message: String },
    /// Terminal sentinel, no further events follow
    Done,
}

/// Record parsing errors.
///
/// These are never fatal to ingestion: a malformed record is logged and
/// skipped, and the stream continues with the next record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordParseError {
    /// Payload was not valid JSON
    InvalidJson { source: String },
    /// Recognized record type but a required field is missing or mistyped
    MissingField {
        record_type: String,
        field: &'static str,
    },
}

impl std::fmt::Display for RecordParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordParseError::InvalidJson { source } => {
                write!(f, "Invalid JSON in stream record: {}", source)
            }
            RecordParseError::MissingField { record_type, field } => {
                write!(f, "Record '{}' missing field '{}'", record_type, field)
            }
        }
    }
}

impl std::error::Error for RecordParseError {}

/// Parse one record payload into a typed event.
///
/// Returns:
/// - `Ok(Some(event))` - payload carried a recognized record type
/// - `Ok(None)` - valid JSON but the `type` is absent or unrecognized
/// - `Err(error)` - payload was malformed
///
/// An unrecognized `type` is deliberately not an error: the backend may
/// add record types this client does not know about yet.
pub fn parse_record(payload: &str) -> Result<Option<StreamEvent>, RecordParseError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| RecordParseError::InvalidJson {
            source: e.to_string(),
        })?;

    let Some(record_type) = value.get("type").and_then(|v| v.as_str()) else {
        return Ok(None);
    };

    match record_type {
        "status" => {
            let message = require_str(&value, record_type, "message")?;
            Ok(Some(StreamEvent::Status { message }))
        }
        "summary" => {
            let message = require_str(&value, record_type, "message")?;
            Ok(Some(StreamEvent::Summary { message }))
        }
        "recommendation" => {
            let data = value
                .get("data")
                .cloned()
                .ok_or_else(|| RecordParseError::MissingField {
                    record_type: record_type.to_string(),
                    field: "data",
                })?;
            Ok(Some(StreamEvent::Recommendation { data }))
        }
        _ => Ok(None),
    }
}

fn require_str(
    value: &Value,
    record_type: &str,
    field: &'static str,
) -> Result<String, RecordParseError> {
    value
        .get(field)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| RecordParseError::MissingField {
            record_type: record_type.to_string(),
            field,
        })
}
