//! Color theme constants for the campaign UI
//!
//! Defines the minimal dark color palette used throughout the UI.

use ratatui::style::Color;

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Border color for the focused panel
pub const COLOR_BORDER_FOCUSED: Color = Color::White;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// User messages - blue
pub const COLOR_USER: Color = Color::Rgb(0, 122, 204);

/// System notices - yellow
pub const COLOR_SYSTEM: Color = Color::Yellow;

/// Connected/enabled toggles - green
pub const COLOR_ON: Color = Color::Rgb(4, 181, 117);

/// Recommendation card borders - cyan
pub const COLOR_RECOMMENDATION: Color = Color::Cyan;

/// Streaming indicator - light green
pub const COLOR_STREAMING: Color = Color::LightGreen;

/// Spinner frames for the streaming indicator
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
