//! Toggle and fetch actions spawned against the backend.
//!
//! Each action runs as a detached task and reports back through the
//! message channel. Toggles never mutate local state directly: on success
//! the list is refetched from the server, on failure a notice is appended
//! and the local state is left as it was.

use std::sync::Arc;

use super::{App, AppMessage, Focus};

impl App {
    /// Kick off the startup work: health probe plus both list fetches.
    pub fn load_initial_state(&self) {
        self.check_backend();
        self.refresh_data_sources();
        self.refresh_channels();
    }

    /// Probe the backend root endpoint.
    pub fn check_backend(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let online = client.health_check().await.unwrap_or(false);
            let _ = tx.send(AppMessage::HealthChecked(online));
        });
    }

    /// Refetch the data-source list.
    pub fn refresh_data_sources(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match client.fetch_data_sources().await {
                Ok(sources) => {
                    let _ = tx.send(AppMessage::SourcesLoaded(sources));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch data sources");
                }
            }
        });
    }

    /// Refetch the channel list.
    pub fn refresh_channels(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match client.fetch_channels().await {
                Ok(channels) => {
                    let _ = tx.send(AppMessage::ChannelsLoaded(channels));
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to fetch channels");
                }
            }
        });
    }

    /// Toggle the item under the cursor in whichever list has focus.
    pub fn toggle_selected(&mut self) {
        match self.focus {
            Focus::Sources => self.toggle_source(self.selected_source),
            Focus::Channels => self.toggle_channel(self.selected_channel),
            Focus::Input => {}
        }
    }

    fn toggle_source(&mut self, index: usize) {
        let Some(source) = self.data_sources.get(index).cloned() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let result = if source.connected {
                client.disconnect_data_source(&source.source_type).await
            } else {
                client.connect_data_source(&source.source_type).await
            };

            match result {
                Ok(()) => {
                    let verb = if source.connected {
                        "❌ Disconnected"
                    } else {
                        "✅ Connected"
                    };
                    let _ = tx.send(AppMessage::Notice(format!("{} {}", verb, source.name)));
                    if let Ok(sources) = client.fetch_data_sources().await {
                        let _ = tx.send(AppMessage::SourcesLoaded(sources));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, source = %source.source_type, "toggle failed");
                    let verb = if source.connected { "disconnect" } else { "connect" };
                    let _ = tx.send(AppMessage::Notice(format!(
                        "❌ Failed to {} {}",
                        verb, source.name
                    )));
                }
            }
        });
    }

    fn toggle_channel(&mut self, index: usize) {
        let Some(channel) = self.channels.get(index).cloned() else {
            return;
        };
        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let result = if channel.enabled {
                client.disable_channel(&channel.channel_type).await
            } else {
                client.enable_channel(&channel.channel_type).await
            };

            match result {
                Ok(()) => {
                    let verb = if channel.enabled {
                        "❌ Disabled"
                    } else {
                        "✅ Enabled"
                    };
                    let _ = tx.send(AppMessage::Notice(format!(
                        "{} {} channel",
                        verb, channel.name
                    )));
                    if let Ok(channels) = client.fetch_channels().await {
                        let _ = tx.send(AppMessage::ChannelsLoaded(channels));
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, channel = %channel.channel_type, "toggle failed");
                    let verb = if channel.enabled { "disable" } else { "enable" };
                    let _ = tx.send(AppMessage::Notice(format!(
                        "❌ Failed to {} {} channel",
                        verb, channel.name
                    )));
                }
            }
        });
    }

    /// Execute the most recently generated recommendation.
    pub fn execute_latest_recommendation(&mut self) {
        let campaign_id = self
            .current_recommendations
            .last()
            .and_then(|r| r.get("campaign_id"))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let Some(campaign_id) = campaign_id else {
            self.add_message(
                crate::models::MessageRole::System,
                "⚠️ No recommendation to execute yet.",
            );
            return;
        };

        let client = Arc::clone(&self.client);
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            match client.execute_campaign(&campaign_id).await {
                Ok(response) => {
                    let _ = tx.send(AppMessage::CampaignExecuted(response));
                }
                Err(e) => {
                    let _ = tx.send(AppMessage::CampaignExecuteFailed {
                        campaign_id,
                        error: e.to_string(),
                    });
                }
            }
        });
    }
}
