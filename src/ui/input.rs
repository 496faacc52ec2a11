//! Input line rendering.

use ratatui::{
    layout::{Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Focus};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM};

pub fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Input;
    let border_color = if focused {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let title = if app.is_streaming {
        " Waiting for response... "
    } else {
        " Ask for campaign recommendations "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let content = if app.input.is_empty() && !focused {
        Line::from(Span::styled(
            "Tab to switch focus · Enter to send",
            Style::default().fg(COLOR_DIM),
        ))
    } else {
        Line::from(Span::styled(
            app.input.clone(),
            Style::default().fg(COLOR_ACCENT),
        ))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused && !app.is_streaming {
        let cursor_x = area.x + 1 + app.input.width() as u16;
        frame.set_cursor_position(Position::new(
            cursor_x.min(area.x + area.width.saturating_sub(2)),
            area.y + 1,
        ));
    }
}
