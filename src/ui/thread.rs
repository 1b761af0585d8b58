//! Thread detail: messages on the left, AI analysis on the right

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::theme::{Theme, borders};
use super::widgets::{sanitize_text, spinner_char};
use crate::api::types::{AiAnalysis, Message};
use crate::app::state::AppState;

pub fn render_thread(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(area);

    render_messages(frame, chunks[0], state);
    render_analysis(frame, chunks[1], state);
}

fn render_messages(frame: &mut Frame, area: Rect, state: &AppState) {
    let detail = &state.detail;
    let block = Block::default()
        .title(format!(" {} ", detail.title()))
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border_focused());

    let lines = if detail.messages_loading() {
        vec![Line::from(Span::styled(
            format!("{} Loading messages...", spinner_char()),
            Theme::text_muted(),
        ))]
    } else if detail.messages().is_empty() {
        vec![Line::from(Span::styled("No messages", Theme::text_muted()))]
    } else {
        detail.messages().iter().flat_map(message_lines).collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((detail.scroll, 0));
    frame.render_widget(paragraph, area);
}

fn message_lines(message: &Message) -> Vec<Line<'static>> {
    let name = if message.sender_name.is_empty() {
        "Unknown".to_string()
    } else {
        message.sender_name.clone()
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("[{}] ", message.initial()), Theme::text_accent()),
        Span::styled(name, Theme::text_bold()),
        Span::styled(
            format!("  {}", message.date.as_deref().unwrap_or("")),
            Theme::text_muted(),
        ),
    ])];

    let body = sanitize_text(message.body.as_deref().unwrap_or(""));
    lines.extend(
        body.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::text()))),
    );
    lines.push(Line::from(""));
    lines
}

fn render_analysis(frame: &mut Frame, area: Rect, state: &AppState) {
    let detail = &state.detail;
    let block = Block::default()
        .title(" AI Analysis ")
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border());

    let lines = match detail.analysis() {
        _ if detail.analysis_loading() => vec![Line::from(Span::styled(
            format!("{} Analyzing thread...", spinner_char()),
            Theme::text_muted(),
        ))],
        Some(analysis) => analysis_lines(analysis),
        None => vec![Line::from(Span::styled(
            "No analysis available",
            Theme::text_muted(),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn analysis_lines(analysis: &AiAnalysis) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut section = |heading: &'static str, value: &str| {
        if value.is_empty() {
            return;
        }
        lines.push(Line::from(Span::styled(heading, Theme::ai_heading())));
        lines.push(Line::from(Span::styled(value.to_string(), Theme::text())));
        lines.push(Line::from(""));
    };

    section("Summary", &analysis.summary);
    section("Status", &analysis.status);
    section("Next action", &analysis.next_action);
    section("Key person", &analysis.key_person);
    section("Sentiment", analysis.sentiment.as_deref().unwrap_or(""));
    section("Urgency", analysis.urgency.as_deref().unwrap_or(""));

    lines
}
