//! Terminal rendering for the campaign client.
//!
//! Single-screen layout: a sidebar with the data-source and channel
//! toggles on the left, the conversation log and input line on the right.

mod conversation;
mod input;
mod sidebar;
mod theme;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;

/// Sidebar width in columns
const SIDEBAR_WIDTH: u16 = 34;

/// Render one frame of the UI.
pub fn render(frame: &mut Frame, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
        .split(frame.area());

    sidebar::render_sidebar(frame, app, columns[0]);

    let chat = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(columns[1]);

    conversation::render_conversation(frame, app, chat[0]);
    input::render_input(frame, app, chat[1]);
}
