//! Settings panel: add form and the ignore list

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::theme::{Theme, borders, with_selection_bg};
use super::widgets::{centered_rect_constrained, spinner_char, truncate_string};
use crate::api::types::IgnoreKind;
use crate::app::state::{AppState, SettingsFocus};

pub fn render_settings(frame: &mut Frame, area: Rect, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Add form
            Constraint::Min(0),    // Ignore list
        ])
        .split(area);

    render_add_form(frame, chunks[0], state);
    render_ignore_list(frame, chunks[1], state);

    if let Some(item) = state.ignore.pending_removal() {
        render_confirm(frame, area, &item.value);
    }
}

fn render_add_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.settings_focus == SettingsFocus::Input;
    let block = Block::default()
        .title(" Add to ignore list ")
        .title_bottom(" Tab type │ Enter add ")
        .borders(Borders::ALL)
        .border_type(if focused { borders::popup() } else { borders::panel() })
        .border_style(if focused { Theme::border_focused() } else { Theme::border() });

    let kind_span = |kind: IgnoreKind| {
        let style = if state.ignore.kind() == kind {
            Theme::input_highlight()
        } else {
            Theme::text_muted()
        };
        Span::styled(format!(" {} ", kind), style)
    };

    let cursor = if focused { "│" } else { "" };
    let line = Line::from(vec![
        kind_span(IgnoreKind::Domain),
        kind_span(IgnoreKind::Email),
        Span::styled("  ", Theme::text()),
        Span::styled(format!("{}{}", state.ignore.input(), cursor), Theme::text()),
        Span::styled(
            if state.ignore.is_busy() {
                format!("  {}", spinner_char())
            } else {
                String::new()
            },
            Theme::text_muted(),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_ignore_list(frame: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.settings_focus == SettingsFocus::List;
    let title = format!(" Ignored ({}) ", state.ignore.items().len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(if focused { Theme::border_focused() } else { Theme::border() });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.ignore.items().is_empty() {
        let msg = if state.ignore.is_loading() {
            format!("{} Loading...", spinner_char())
        } else {
            "Nothing ignored yet".to_string()
        };
        let paragraph = Paragraph::new(msg)
            .style(Theme::text_muted())
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, inner);
        return;
    }

    let width = inner.width as usize;
    let visible = inner.height as usize;
    let skip = state.ignore.selected().saturating_sub(visible.saturating_sub(1));

    let items: Vec<ListItem> = state
        .ignore
        .items()
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, item)| {
            let selected = focused && i == state.ignore.selected();
            let base = if selected { Theme::selected() } else { Theme::text() };
            let kind = format!("{:<8}", item.kind);
            let value = truncate_string(&item.value, width.saturating_sub(kind.len() + 2));
            let padding = width.saturating_sub(kind.len() + 2 + value.chars().count());
            ListItem::new(Line::from(vec![
                Span::styled("  ", base),
                Span::styled(kind, with_selection_bg(Theme::text_accent(), selected)),
                Span::styled(value, base),
                Span::styled(" ".repeat(padding), base),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items), inner);
}

fn render_confirm(frame: &mut Frame, area: Rect, value: &str) {
    let popup = centered_rect_constrained(area, 30, 60, 5, 5);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Remove ")
        .borders(Borders::ALL)
        .border_type(borders::popup())
        .border_style(Theme::border_focused());
    let text = vec![
        Line::from(Span::styled(
            format!("Remove {} from the ignore list?", value),
            Theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", Theme::text_warning()),
            Span::styled(" yes   ", Theme::text_muted()),
            Span::styled("n", Theme::text_warning()),
            Span::styled(" no", Theme::text_muted()),
        ]),
    ];
    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, popup);
}
