//! Sidebar rendering: data-source and channel toggle lists.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Focus};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_BORDER_FOCUSED, COLOR_DIM, COLOR_ON,
};

pub fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let source_rows: Vec<(String, bool)> = app
        .data_sources
        .iter()
        .map(|s| (s.name.clone(), s.connected))
        .collect();
    render_toggle_list(
        frame,
        sections[0],
        " Data Sources ",
        &source_rows,
        app.selected_source,
        app.focus == Focus::Sources,
    );

    let channel_rows: Vec<(String, bool)> = app
        .channels
        .iter()
        .map(|c| (c.name.clone(), c.enabled))
        .collect();
    render_toggle_list(
        frame,
        sections[1],
        " Channels ",
        &channel_rows,
        app.selected_channel,
        app.focus == Focus::Channels,
    );
}

fn render_toggle_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    rows: &[(String, bool)],
    selected: usize,
    focused: bool,
) {
    let border_color = if focused {
        COLOR_BORDER_FOCUSED
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title);

    let mut lines: Vec<Line> = Vec::new();
    if rows.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none loaded)",
            Style::default().fg(COLOR_DIM),
        )));
    }
    for (i, (name, on)) in rows.iter().enumerate() {
        let checkbox = if *on { "[x]" } else { "[ ]" };
        let checkbox_style = if *on {
            Style::default().fg(COLOR_ON)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        let name_style = if focused && i == selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_ACCENT)
        };
        let cursor = if focused && i == selected { "›" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(cursor.to_string(), name_style),
            Span::styled(format!("{} ", checkbox), checkbox_style),
            Span::styled(name.clone(), name_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
