//! Modal overlays and the bottom input line

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use super::theme::{Theme, borders};
use super::widgets::centered_rect_constrained;
use crate::app::state::AppState;
use crate::command::{CommandHelp, CommandResult};
use crate::input::KeybindingEntry;

pub fn render_command_bar(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(result) = state.modal.command_result() {
        let (text, style) = match result {
            CommandResult::Success(msg) => (msg.clone(), Theme::text()),
            CommandResult::Error(msg) => (msg.clone(), Theme::error_bar()),
            CommandResult::ShowHelp(_) | CommandResult::ShowKeys(_) => {
                ("Esc to close".to_string(), Theme::text_muted())
            }
        };
        let paragraph = Paragraph::new(format!(" {} ", text)).style(style);
        frame.render_widget(paragraph, area);
        return;
    }

    let input = state.modal.command_input().unwrap_or("");
    let paragraph = Paragraph::new(format!(" :{}│ ", input)).style(Theme::status_bar());
    frame.render_widget(paragraph, area);
}

/// One-line prompt replacing the help bar (search query, import path)
pub fn render_prompt(frame: &mut Frame, area: Rect, label: &str, input: &str) {
    let line = Line::from(vec![
        Span::styled(format!(" {} ", label), Theme::help_key()),
        Span::styled(format!("{}│ ", input), Theme::status_bar()),
    ]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

pub fn render_notice(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let width = (message.chars().count() as u16 + 6).clamp(30, 70);
    let popup = centered_rect_constrained(area, 30, width, 5, 8);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_bottom(" Enter to dismiss ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());
    let paragraph = Paragraph::new(message.to_string())
        .style(Theme::text())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, popup);
}

/// Render the unified help popup (keybindings + commands)
pub fn render_help_popup(
    frame: &mut Frame,
    area: Rect,
    keys: &[KeybindingEntry],
    commands: &[CommandHelp],
    scroll: usize,
) {
    let mut categories: Vec<&str> = Vec::new();
    for key in keys {
        if categories.last() != Some(&key.category) {
            categories.push(key.category);
        }
    }

    let keybinding_lines = keys.len() + categories.len() * 2;
    let command_lines = commands.len() + 2; // header + blank line + entries
    let content_height = keybinding_lines + command_lines + 1;

    let popup_area = centered_rect_constrained(area, 36, 56, 10, content_height as u16 + 2);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Help ")
        .title_bottom(" j/k scroll │ ? or Esc close ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut items: Vec<ListItem> = Vec::new();
    let mut current_category: Option<&str> = None;
    let key_width = 14;

    for entry in keys {
        if current_category != Some(entry.category) {
            if current_category.is_some() {
                items.push(ListItem::new(Line::from("")));
            }
            items.push(ListItem::new(section_header(entry.category, inner.width)));
            current_category = Some(entry.category);
        }

        let key_display: String = if entry.key.chars().count() > key_width {
            entry.key.chars().take(key_width).collect()
        } else {
            format!("{:width$}", entry.key, width = key_width)
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(key_display, Theme::text_accent()),
            Span::styled(entry.description.as_str(), Theme::text()),
        ])));
    }

    if !commands.is_empty() {
        if !items.is_empty() {
            items.push(ListItem::new(Line::from("")));
        }
        items.push(ListItem::new(section_header("Commands", inner.width)));
    }

    let cmd_width = 16;
    for cmd in commands {
        let cmd_display = format!(":{:<width$}", cmd.name, width = cmd_width - 1);
        items.push(ListItem::new(Line::from(vec![
            Span::styled("  ", Style::default()),
            Span::styled(cmd_display, Theme::text_accent()),
            Span::styled(cmd.description, Theme::text()),
        ])));
    }

    let visible_items: Vec<ListItem> = items.into_iter().skip(scroll).collect();
    frame.render_widget(List::new(visible_items), inner);
}

fn section_header(title: &str, width: u16) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("── {} ", title),
            Theme::text_secondary().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "─".repeat(width.saturating_sub(title.len() as u16 + 4) as usize),
            Theme::border(),
        ),
    ])
}
