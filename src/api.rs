//! Campaign API client for backend communication.
//!
//! This module provides the HTTP client for the Marketing Campaign AI
//! backend: the data-source and channel toggle endpoints, campaign
//! execution, and the streamed chat endpoint decoded into
//! [`StreamEvent`]s.

use crate::models::{Channel, ChatRequest, DataSource, ExecuteResponse};
use crate::stream::{StreamEvent, StreamIngestor};
use bytes::Bytes;
use futures_util::stream::{self, Stream};
use futures_util::StreamExt;
use reqwest::Client;
use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default inactivity timeout for the chat stream. Expiry behaves like a
/// transport error: the operation aborts and one notice is surfaced.
pub const DEFAULT_STREAM_TIMEOUT: Duration = Duration::from_secs(120);

/// A stream of decoded chat events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, ApiError>> + Send>>;

/// Error type for Campaign API client operations
#[derive(Debug)]
pub enum ApiError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// JSON deserialization failed
    Json(serde_json::Error),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// No bytes arrived within the inactivity timeout
    Timeout,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {}", e),
            ApiError::Json(e) => write!(f, "JSON error: {}", e),
            ApiError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            ApiError::Timeout => write!(f, "Stream timed out waiting for data"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Http(e) => Some(e),
            ApiError::Json(e) => Some(e),
            ApiError::ServerError { .. } | ApiError::Timeout => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Http(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}

/// Client for the Marketing Campaign AI backend API.
///
/// Provides the data-source and channel endpoints, campaign execution,
/// a health probe, and the streamed chat endpoint.
pub struct CampaignClient {
    /// Base URL for the backend API
    pub base_url: String,
    /// Reusable HTTP client
    client: Client,
    /// Inactivity timeout applied between chunk reads on the chat stream
    stream_timeout: Option<Duration>,
}

impl CampaignClient {
    /// Create a new CampaignClient with the default base URL.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a new CampaignClient with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            client: Client::new(),
            stream_timeout: Some(DEFAULT_STREAM_TIMEOUT),
        }
    }

    /// Set the stream inactivity timeout. `None` disables it.
    pub fn with_stream_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stream_timeout = timeout;
        self
    }

    /// Check that the backend is reachable.
    ///
    /// # Returns
    /// `true` if the root endpoint answers with a success status
    pub async fn health_check(&self) -> Result<bool, ApiError> {
        let url = format!("{}/", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }

    /// Fetch the list of data sources with their connection state.
    pub async fn fetch_data_sources(&self) -> Result<Vec<DataSource>, ApiError> {
        let url = format!("{}/data-sources", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Connect a data source. Callers refetch the list afterward rather
    /// than trusting the response body.
    pub async fn connect_data_source(&self, source_type: &str) -> Result<(), ApiError> {
        self.toggle(&format!("/data-sources/{}/connect", source_type))
            .await
    }

    /// Disconnect a data source.
    pub async fn disconnect_data_source(&self, source_type: &str) -> Result<(), ApiError> {
        self.toggle(&format!("/data-sources/{}/disconnect", source_type))
            .await
    }

    /// Fetch the list of delivery channels with their enabled state.
    pub async fn fetch_channels(&self) -> Result<Vec<Channel>, ApiError> {
        let url = format!("{}/channels", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Enable a delivery channel.
    pub async fn enable_channel(&self, channel_type: &str) -> Result<(), ApiError> {
        self.toggle(&format!("/channels/{}/enable", channel_type))
            .await
    }

    /// Disable a delivery channel.
    pub async fn disable_channel(&self, channel_type: &str) -> Result<(), ApiError> {
        self.toggle(&format!("/channels/{}/disable", channel_type))
            .await
    }

    /// Execute a generated campaign recommendation.
    pub async fn execute_campaign(&self, campaign_id: &str) -> Result<ExecuteResponse, ApiError> {
        let url = format!("{}/campaigns/execute/{}", self.base_url, campaign_id);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Stream campaign recommendations for a chat message.
    ///
    /// Sends a POST request to `/chat/stream` and returns a stream of
    /// decoded events. The stream is fused: nothing is emitted after
    /// [`StreamEvent::Done`], an error, or the connection closing.
    pub async fn stream(&self, request: &ChatRequest) -> Result<EventStream, ApiError> {
        let url = format!("{}/chat/stream", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiError::ServerError { status, message });
        }

        let bytes_stream = response.bytes_stream().map(|r| r.map_err(ApiError::Http));
        Ok(event_stream(bytes_stream, self.stream_timeout))
    }

    /// POST to a toggle endpoint, succeeding on any 2xx.
    async fn toggle(&self, path: &str) -> Result<(), ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::ServerError { status, message })
    }
}

impl Default for CampaignClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapt a byte stream into a stream of decoded events.
///
/// Transport-independent so ingestion behavior can be exercised against
/// arbitrary chunkings without a socket. Guarantees:
/// - events are emitted in record order, regardless of chunk boundaries
/// - nothing is emitted after `Done`, even if unread bytes remain
/// - stream end without `Done` completes normally (implicit completion)
/// - a transport error or timeout is the final item
pub fn event_stream<S>(bytes: S, idle_timeout: Option<Duration>) -> EventStream
where
    S: Stream<Item = Result<Bytes, ApiError>> + Send + Unpin + 'static,
{
    let state = (bytes, StreamIngestor::new(), VecDeque::new(), false);

    let events = stream::unfold(
        state,
        move |(mut bytes, mut ingestor, mut queue, mut finished)| async move {
            loop {
                if let Some(event) = queue.pop_front() {
                    if matches!(event, StreamEvent::Done) {
                        finished = true;
                    }
                    return Some((Ok(event), (bytes, ingestor, queue, finished)));
                }

                if finished {
                    return None;
                }

                let next = match idle_timeout {
                    Some(limit) => match tokio::time::timeout(limit, bytes.next()).await {
                        Ok(item) => item,
                        Err(_elapsed) => {
                            return Some((Err(ApiError::Timeout), (bytes, ingestor, queue, true)));
                        }
                    },
                    None => bytes.next().await,
                };

                match next {
                    Some(Ok(chunk)) => {
                        queue.extend(ingestor.feed(&chunk));
                    }
                    Some(Err(e)) => {
                        return Some((Err(e), (bytes, ingestor, queue, true)));
                    }
                    None => {
                        queue.extend(ingestor.finish());
                        finished = true;
                    }
                }
            }
        },
    );

    Box::pin(events)
}
