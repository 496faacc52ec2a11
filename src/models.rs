use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Helper to deserialize a boolean from whatever the backend sends.
///
/// The list endpoints are not strict about `connected`/`enabled`: a bool,
/// a number, a string, or null have all been observed. Coerce to a strict
/// bool here so the rest of the app never sees a truthy-but-not-bool value.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct TruthyVisitor;

    impl<'de> Visitor<'de> for TruthyVisitor {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean-like value")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0)
        }

        fn visit_u64<E>(self, value: u64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0)
        }

        fn visit_f64<E>(self, value: f64) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(value != 0.0)
        }

        fn visit_str<E>(self, value: &str) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(!value.is_empty() && value != "false" && value != "0")
        }

        fn visit_unit<E>(self) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_none<E>(self) -> Result<bool, E>
        where
            E: de::Error,
        {
            Ok(false)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<bool, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(TruthyVisitor)
        }
    }

    deserializer.deserialize_any(TruthyVisitor)
}

/// A data source integration as returned by `GET /data-sources`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataSource {
    /// Machine identifier, e.g. "shopify"
    #[serde(rename = "type")]
    pub source_type: String,
    /// Human-readable name, e.g. "Shopify"
    pub name: String,
    /// Whether the source is currently connected
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub connected: bool,
}

/// A delivery channel as returned by `GET /channels`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Channel {
    /// Machine identifier, e.g. "email"
    #[serde(rename = "type")]
    pub channel_type: String,
    /// Human-readable name, e.g. "Email"
    pub name: String,
    /// Whether the channel is currently enabled
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub enabled: bool,
}

/// Request body for `POST /chat/stream`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub message: String,
    pub data_sources: Vec<String>,
    pub channels: Vec<String>,
}

impl ChatRequest {
    pub fn new(
        message: impl Into<String>,
        data_sources: Vec<String>,
        channels: Vec<String>,
    ) -> Self {
        Self {
            message: message.into(),
            data_sources,
            channels,
        }
    }
}

/// Typed view of a recommendation payload, used for rendering only.
///
/// The ingestion path stores the raw JSON on the message untouched; this
/// struct is derived from it at render time and is deliberately lenient
/// so a missing field degrades to an empty cell rather than a lost card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Recommendation {
    #[serde(default)]
    pub campaign_id: String,
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub audience_segment: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub timing: String,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub data_insights: Option<Value>,
}

impl Recommendation {
    /// Derive the typed view from a raw payload.
    pub fn from_payload(payload: &Value) -> Self {
        serde_json::from_value(payload.clone()).unwrap_or_default()
    }
}

/// Response body from `POST /campaigns/execute/{campaign_id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecuteResponse {
    pub campaign_id: String,
    pub status: String,
    #[serde(default)]
    pub estimated_reach: Option<u64>,
    #[serde(default)]
    pub estimated_completion: Option<String>,
}

/// Role of an entry in the conversation log
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Recommendation,
}

/// One entry in the user-visible conversation log.
///
/// Entries are append-only: once created they are never mutated or
/// removed. Recommendation entries carry the raw event payload in `data`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    #[serde(default)]
    pub data: Option<Value>,
    pub timestamp: DateTime<Utc>,
}

impl DisplayMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            data: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_data(role: MessageRole, content: impl Into<String>, data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            data: Some(data),
            timestamp: Utc::now(),
        }
    }
}
