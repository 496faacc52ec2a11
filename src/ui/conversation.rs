//! Conversation log rendering, including recommendation cards and the
//! streaming indicator.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{DisplayMessage, MessageRole, Recommendation};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_RECOMMENDATION, COLOR_STREAMING, COLOR_SYSTEM,
    COLOR_USER, SPINNER_FRAMES,
};

pub fn render_conversation(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Marketing Campaign AI ");

    let mut lines: Vec<Line> = Vec::new();
    for message in &app.messages {
        append_message_lines(&mut lines, message);
        lines.push(Line::from(""));
    }

    if app.is_streaming {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(COLOR_STREAMING)),
            Span::styled(
                "Generating recommendations...",
                Style::default().fg(COLOR_DIM),
            ),
        ]));
    }

    // Pin the view to the most recent messages
    let viewport_height = area.height.saturating_sub(2) as usize;
    let scroll = tail_scroll(lines.len(), viewport_height);

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((scroll, 0)),
        area,
    );
}

/// Scroll offset that keeps the last `viewport_height` lines visible.
/// Saturates at `u16::MAX` rather than wrapping on very long logs.
fn tail_scroll(total_lines: usize, viewport_height: usize) -> u16 {
    u16::try_from(total_lines.saturating_sub(viewport_height)).unwrap_or(u16::MAX)
}

fn append_message_lines(lines: &mut Vec<Line<'static>>, message: &DisplayMessage) {
    let timestamp = message.timestamp.format("%H:%M:%S").to_string();

    match message.role {
        MessageRole::User => {
            lines.push(Line::from(vec![
                Span::styled(
                    "you ".to_string(),
                    Style::default().fg(COLOR_USER).add_modifier(Modifier::BOLD),
                ),
                Span::styled(timestamp, Style::default().fg(COLOR_DIM)),
            ]));
            lines.push(Line::from(Span::styled(
                message.content.clone(),
                Style::default().fg(COLOR_ACCENT),
            )));
        }
        MessageRole::Assistant => {
            lines.push(Line::from(vec![
                Span::styled(
                    "assistant ".to_string(),
                    Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
                ),
                Span::styled(timestamp, Style::default().fg(COLOR_DIM)),
            ]));
            lines.push(Line::from(Span::styled(
                message.content.clone(),
                Style::default().fg(COLOR_ACCENT),
            )));
        }
        MessageRole::System => {
            lines.push(Line::from(Span::styled(
                message.content.clone(),
                Style::default().fg(COLOR_SYSTEM),
            )));
        }
        MessageRole::Recommendation => {
            let payload = message.data.clone().unwrap_or_default();
            append_recommendation_card(lines, &Recommendation::from_payload(&payload));
        }
    }
}

/// Render a recommendation payload as a bordered card.
fn append_recommendation_card(lines: &mut Vec<Line<'static>>, rec: &Recommendation) {
    let border = Style::default().fg(COLOR_RECOMMENDATION);
    let label = Style::default().fg(COLOR_DIM);
    let value = Style::default().fg(COLOR_ACCENT);

    lines.push(Line::from(Span::styled(
        format!(
            "┌─ {} · confidence {:.1}% ",
            rec.channel.to_uppercase(),
            rec.confidence_score
        ),
        border,
    )));
    lines.push(Line::from(vec![
        Span::styled("│ ".to_string(), border),
        Span::styled("Audience: ".to_string(), label),
        Span::styled(rec.audience_segment.clone(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("│ ".to_string(), border),
        Span::styled("Message:  ".to_string(), label),
        Span::styled(rec.message.clone(), value),
    ]));
    lines.push(Line::from(vec![
        Span::styled("│ ".to_string(), border),
        Span::styled("Timing:   ".to_string(), label),
        Span::styled(rec.timing.clone(), value),
    ]));
    if let Some(insights) = &rec.data_insights {
        let summary = insights
            .as_object()
            .map(|m| m.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        if !summary.is_empty() {
            lines.push(Line::from(vec![
                Span::styled("│ ".to_string(), border),
                Span::styled("Insights: ".to_string(), label),
                Span::styled(summary, value),
            ]));
        }
    }
    lines.push(Line::from(Span::styled(
        format!("└─ {} · Ctrl+E to execute ", rec.campaign_id),
        border,
    )));
}
