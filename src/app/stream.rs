//! Chat submission and stream event processing for the App.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::mpsc;

use crate::api::EventStream;
use crate::models::{ChatRequest, MessageRole, Recommendation};
use crate::stream::StreamEvent;

use super::{App, AppMessage};

impl App {
    /// Submit the current input as a chat request and spawn the stream.
    ///
    /// Validation happens before any network call: at least one data
    /// source must be connected and at least one channel enabled, and no
    /// stream may already be in flight. A validation failure appends a
    /// system notice and issues no request.
    pub fn submit_input(&mut self) {
        let content = self.input.trim().to_string();
        if content.is_empty() {
            return;
        }

        // One stream at a time per conversation
        if self.is_streaming {
            return;
        }

        let data_sources = self.connected_source_types();
        if data_sources.is_empty() {
            self.add_message(
                MessageRole::System,
                "⚠️ Please connect at least one data source first.",
            );
            return;
        }

        let channels = self.enabled_channel_types();
        if channels.is_empty() {
            self.add_message(
                MessageRole::System,
                "⚠️ Please enable at least one channel first.",
            );
            return;
        }

        self.add_message(MessageRole::User, content.clone());
        self.input.clear();
        self.is_streaming = true;
        self.current_recommendations.clear();

        let request = ChatRequest::new(content, data_sources, channels);
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            match client.stream(&request).await {
                Ok(mut events) => {
                    Self::process_stream(&mut events, &tx).await;
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::StreamFailed {
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    /// Forward decoded events from the stream to the app.
    ///
    /// Stops after `Done` or the first error; a stream that closes
    /// without the sentinel is reported as `StreamEnded`.
    pub(super) async fn process_stream(
        events: &mut EventStream,
        tx: &mpsc::UnboundedSender<AppMessage>,
    ) {
        while let Some(result) = events.next().await {
            match result {
                Ok(event) => {
                    let done = matches!(event, StreamEvent::Done);
                    let _ = tx.send(AppMessage::StreamEvent(event));
                    if done {
                        return;
                    }
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::StreamFailed {
                        error: e.to_string(),
                    });
                    return;
                }
            }
        }
        let _ = tx.send(AppMessage::StreamEnded);
    }

    /// Apply one message from an async task to the app state.
    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::SourcesLoaded(sources) => {
                self.data_sources = sources;
                if self.selected_source >= self.data_sources.len() {
                    self.selected_source = self.data_sources.len().saturating_sub(1);
                }
            }
            AppMessage::ChannelsLoaded(channels) => {
                self.channels = channels;
                if self.selected_channel >= self.channels.len() {
                    self.selected_channel = self.channels.len().saturating_sub(1);
                }
            }
            AppMessage::Notice(text) => {
                self.add_message(MessageRole::System, text);
            }
            AppMessage::StreamEvent(event) => self.handle_stream_event(event),
            AppMessage::StreamEnded => {
                // Stream closed without the sentinel: implicit completion
                self.is_streaming = false;
            }
            AppMessage::StreamFailed { error } => {
                tracing::error!(error = %error, "chat stream failed");
                self.is_streaming = false;
                self.add_message(
                    MessageRole::System,
                    "❌ Error generating recommendations. Please try again.",
                );
            }
            AppMessage::HealthChecked(online) => {
                self.backend_online = online;
                if !online {
                    self.add_message(
                        MessageRole::System,
                        "⚠️ Backend is unreachable. Check that the server is running.",
                    );
                }
            }
            AppMessage::CampaignExecuted(response) => {
                let reach = response
                    .estimated_reach
                    .map(|r| format!(", estimated reach {}", r))
                    .unwrap_or_default();
                self.add_message(
                    MessageRole::System,
                    format!(
                        "🚀 Campaign {} is {}{}",
                        response.campaign_id, response.status, reach
                    ),
                );
            }
            AppMessage::CampaignExecuteFailed { campaign_id, error } => {
                tracing::warn!(campaign_id = %campaign_id, error = %error, "execute failed");
                self.add_message(
                    MessageRole::System,
                    format!("❌ Failed to execute campaign {}", campaign_id),
                );
            }
        }
    }

    fn handle_stream_event(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Status { message } => {
                self.add_message(MessageRole::Assistant, format!("🔄 {}", message));
            }
            StreamEvent::Recommendation { data } => {
                self.current_recommendations.push(data.clone());
                self.add_message_with_data(
                    MessageRole::Recommendation,
                    "New campaign recommendation generated",
                    data,
                );
            }
            StreamEvent::Summary { message } => {
                self.add_message(MessageRole::Assistant, format!("✅ {}", message));
            }
            StreamEvent::Done => {
                self.is_streaming = false;
            }
        }
    }

    /// Typed view of a recommendation message payload for rendering.
    pub fn recommendation_view(data: &serde_json::Value) -> Recommendation {
        Recommendation::from_payload(data)
    }
}
