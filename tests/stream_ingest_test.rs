//! Chunking-invariance tests for the stream ingestion path.
//!
//! The backend frames events as `data: <json>\n` records, but the network
//! delivers arbitrary byte chunks. Whatever the chunk boundaries - even
//! inside a JSON payload or inside a multi-byte character - the decoded
//! event sequence must be identical.

use bytes::Bytes;
use campaign_tui::api::{event_stream, ApiError};
use campaign_tui::stream::StreamEvent;
use futures_util::{stream, StreamExt};
use serde_json::json;

/// Build the wire form of a reference session: two status updates around
/// a recommendation, a summary, then the terminal sentinel.
fn reference_wire() -> Vec<u8> {
    let rec = json!({
        "campaign_id": "c-1",
        "channel": "email",
        "confidence_score": 87.5,
        "audience_segment": "Café régulars 🎯",
        "message": "20% off your next purchase",
        "timing": "Tomorrow 9 AM",
        "data_insights": {"shopify": {"orders": 412}}
    });
    let mut wire = String::new();
    wire.push_str(&format!(
        "data: {}\n",
        json!({"type": "status", "message": "a"})
    ));
    wire.push_str(&format!(
        "data: {}\n",
        json!({"type": "recommendation", "data": rec})
    ));
    wire.push_str(&format!(
        "data: {}\n",
        json!({"type": "status", "message": "b"})
    ));
    wire.push_str(&format!(
        "data: {}\n",
        json!({"type": "summary", "message": "done"})
    ));
    wire.push_str("data: [DONE]\n");
    wire.into_bytes()
}

fn expected_events() -> Vec<StreamEvent> {
    let rec = json!({
        "campaign_id": "c-1",
        "channel": "email",
        "confidence_score": 87.5,
        "audience_segment": "Café régulars 🎯",
        "message": "20% off your next purchase",
        "timing": "Tomorrow 9 AM",
        "data_insights": {"shopify": {"orders": 412}}
    });
    vec![
        StreamEvent::Status {
            message: "a".to_string(),
        },
        StreamEvent::Recommendation { data: rec },
        StreamEvent::Status {
            message: "b".to_string(),
        },
        StreamEvent::Summary {
            message: "done".to_string(),
        },
        StreamEvent::Done,
    ]
}

/// Split `wire` into chunks of at most `size` bytes and run it through
/// the ingestion stream.
async fn ingest_chunked(wire: &[u8], size: usize) -> Vec<StreamEvent> {
    let chunks: Vec<Result<Bytes, ApiError>> = wire
        .chunks(size)
        .map(|c| Ok(Bytes::copy_from_slice(c)))
        .collect();
    let mut events = event_stream(stream::iter(chunks), None);

    let mut out = Vec::new();
    while let Some(item) = events.next().await {
        out.push(item.expect("no transport errors in this test"));
    }
    out
}

#[tokio::test]
async fn chunking_does_not_change_the_event_sequence() {
    let wire = reference_wire();
    let expected = expected_events();

    // One byte at a time splits every JSON payload and every multi-byte
    // character; the other sizes cover assorted awkward boundaries.
    for size in [1, 2, 3, 7, 16, 64, wire.len()] {
        let events = ingest_chunked(&wire, size).await;
        assert_eq!(events, expected, "chunk size {} changed the output", size);
    }
}

#[tokio::test]
async fn split_exactly_at_every_boundary_of_one_record() {
    let wire = b"data: {\"type\": \"status\", \"message\": \"hello\"}\n".to_vec();
    let expected = vec![StreamEvent::Status {
        message: "hello".to_string(),
    }];

    for split in 0..=wire.len() {
        let chunks: Vec<Result<Bytes, ApiError>> = vec![
            Ok(Bytes::copy_from_slice(&wire[..split])),
            Ok(Bytes::copy_from_slice(&wire[split..])),
        ];
        let mut events = event_stream(stream::iter(chunks), None);
        let mut out = Vec::new();
        while let Some(item) = events.next().await {
            out.push(item.unwrap());
        }
        assert_eq!(out, expected, "split at byte {} changed the output", split);
    }
}

#[tokio::test]
async fn unknown_record_type_is_dropped_without_halting() {
    let wire = b"data: {\"type\": \"telemetry\", \"x\": 1}\n\
                 data: {\"no_type\": true}\n\
                 data: {\"type\": \"status\", \"message\": \"still here\"}\n"
        .to_vec();
    let events = ingest_chunked(&wire, 5).await;
    assert_eq!(
        events,
        vec![StreamEvent::Status {
            message: "still here".to_string()
        }]
    );
}

#[tokio::test]
async fn malformed_record_is_dropped_without_halting() {
    let wire = b"data: {definitely not json\n\
                 data: {\"type\": \"summary\", \"message\": \"recovered\"}\n\
                 data: [DONE]\n"
        .to_vec();
    let events = ingest_chunked(&wire, 9).await;
    assert_eq!(
        events,
        vec![
            StreamEvent::Summary {
                message: "recovered".to_string()
            },
            StreamEvent::Done,
        ]
    );
}

#[tokio::test]
async fn stream_end_without_sentinel_completes_without_done() {
    let wire = b"data: {\"type\": \"status\", \"message\": \"a\"}\n".to_vec();
    let events = ingest_chunked(&wire, 4).await;
    assert_eq!(
        events,
        vec![StreamEvent::Status {
            message: "a".to_string()
        }]
    );
    // No Done event and no error: stream-closed is implicit completion.
}

#[tokio::test]
async fn nothing_is_emitted_after_the_sentinel() {
    let wire = b"data: [DONE]\n\
                 data: {\"type\": \"status\", \"message\": \"late\"}\n"
        .to_vec();
    let events = ingest_chunked(&wire, 3).await;
    assert_eq!(events, vec![StreamEvent::Done]);
}

#[tokio::test]
async fn non_data_lines_are_ignored() {
    let wire = b"\n: keepalive comment\n\
                 event: noise\n\
                 data: {\"type\": \"status\", \"message\": \"ok\"}\n\n"
        .to_vec();
    let events = ingest_chunked(&wire, 11).await;
    assert_eq!(
        events,
        vec![StreamEvent::Status {
            message: "ok".to_string()
        }]
    );
}
