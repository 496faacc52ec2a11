//! AppMessage enum for async communication within the application.

use crate::models::{Channel, DataSource, ExecuteResponse};
use crate::stream::StreamEvent;

/// Messages received from async operations (streaming, toggles, fetches)
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// Fresh data-source list fetched from the backend
    SourcesLoaded(Vec<DataSource>),
    /// Fresh channel list fetched from the backend
    ChannelsLoaded(Vec<Channel>),
    /// A system notice to append to the conversation log
    Notice(String),
    /// A decoded event from the chat stream
    StreamEvent(StreamEvent),
    /// The chat stream closed without the terminal sentinel
    StreamEnded,
    /// The chat stream failed (transport error or timeout)
    StreamFailed { error: String },
    /// Result of the startup health probe
    HealthChecked(bool),
    /// A campaign execution request succeeded
    CampaignExecuted(ExecuteResponse),
    /// A campaign execution request failed
    CampaignExecuteFailed { campaign_id: String, error: String },
}
