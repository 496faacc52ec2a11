//! Application state and logic for the TUI.
//!
//! This module contains the core [`App`] struct and related types:
//! - [`Focus`] - Which UI component has focus
//! - [`AppMessage`] - Messages for async communication
//!
//! All state mutation flows through the transition methods defined here
//! and in the submodules; async tasks never touch state directly, they
//! send an [`AppMessage`] back over the channel instead.

mod actions;
mod handlers;
mod messages;
mod stream;

pub use messages::AppMessage;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::api::CampaignClient;
use crate::config::AppConfig;
use crate::models::{Channel, DataSource, DisplayMessage, MessageRole};

/// Which UI component has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The chat input line
    Input,
    /// The data-source list in the sidebar
    Sources,
    /// The channel list in the sidebar
    Channels,
}

impl Focus {
    /// Cycle focus: Input -> Sources -> Channels -> Input
    pub fn next(self) -> Self {
        match self {
            Focus::Input => Focus::Sources,
            Focus::Sources => Focus::Channels,
            Focus::Channels => Focus::Input,
        }
    }
}

/// Top-level application state.
///
/// Owns the toggle lists, the append-only conversation log, the input
/// buffer, and the streaming flag. Only one chat stream may be in flight
/// at a time; `is_streaming` gates submission.
pub struct App {
    /// Client configuration
    pub config: AppConfig,
    /// Shared API client for async tasks
    pub client: Arc<CampaignClient>,
    /// Data sources with connection state, server-fetched
    pub data_sources: Vec<DataSource>,
    /// Delivery channels with enabled state, server-fetched
    pub channels: Vec<Channel>,
    /// Conversation log, append-only
    pub messages: Vec<DisplayMessage>,
    /// Current input line
    pub input: String,
    /// Which component has focus
    pub focus: Focus,
    /// Selected row in the data-source list
    pub selected_source: usize,
    /// Selected row in the channel list
    pub selected_channel: usize,
    /// Whether a chat stream is in flight
    pub is_streaming: bool,
    /// Raw payloads of recommendations from the current stream
    pub current_recommendations: Vec<Value>,
    /// Whether the backend answered the startup health probe
    pub backend_online: bool,
    /// Set when the user asks to quit
    pub should_quit: bool,
    /// Spinner animation frame, advanced by the render tick
    pub spinner_frame: usize,
    /// Sender handed to async tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver drained by the main event loop; taken out of the app so
    /// the loop can poll it while handlers borrow the app mutably
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    /// Create the app with its API client and message channel.
    pub fn new(config: AppConfig) -> Self {
        let client = CampaignClient::with_base_url(config.base_url.clone())
            .with_stream_timeout(config.stream_timeout);
        let (message_tx, message_rx) = mpsc::unbounded_channel();

        let mut app = Self {
            config,
            client: Arc::new(client),
            data_sources: Vec::new(),
            channels: Vec::new(),
            messages: Vec::new(),
            input: String::new(),
            focus: Focus::Input,
            selected_source: 0,
            selected_channel: 0,
            is_streaming: false,
            current_recommendations: Vec::new(),
            backend_online: true,
            should_quit: false,
            spinner_frame: 0,
            message_tx,
            message_rx: Some(message_rx),
        };

        app.add_message(
            MessageRole::Assistant,
            "Welcome to your Marketing Campaign AI! Connect your data sources \
             and enable channels to get started.",
        );
        app
    }

    /// Append a message to the conversation log.
    pub fn add_message(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(DisplayMessage::new(role, content));
    }

    /// Append a message carrying a raw data payload.
    pub fn add_message_with_data(
        &mut self,
        role: MessageRole,
        content: impl Into<String>,
        data: Value,
    ) {
        self.messages
            .push(DisplayMessage::with_data(role, content, data));
    }

    /// Types of all currently connected data sources.
    pub fn connected_source_types(&self) -> Vec<String> {
        self.data_sources
            .iter()
            .filter(|s| s.connected)
            .map(|s| s.source_type.clone())
            .collect()
    }

    /// Types of all currently enabled channels.
    pub fn enabled_channel_types(&self) -> Vec<String> {
        self.channels
            .iter()
            .filter(|c| c.enabled)
            .map(|c| c.channel_type.clone())
            .collect()
    }

    /// Advance animation state; called on every render tick.
    pub fn tick(&mut self) {
        if self.is_streaming {
            self.spinner_frame = self.spinner_frame.wrapping_add(1);
        }
    }
}
