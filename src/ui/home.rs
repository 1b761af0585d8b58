//! Home view: contact listing, or thread search results while a query is active

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::theme::{Theme, borders, symbols, with_selection_bg};
use super::widgets::{spinner_char, truncate_string};
use crate::api::types::{Contact, ThreadSearchResult, ThreadStub};
use crate::app::state::{AppState, ListingRow};

pub fn render_home(frame: &mut Frame, area: Rect, state: &AppState) {
    if state.is_searching() {
        render_search_results(frame, area, state);
    } else {
        render_listing(frame, area, state);
    }
}

fn render_listing(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Contacts ")
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let contacts = state.listing.contacts();
    if contacts.is_empty() {
        let msg = if state.listing.is_loading() {
            format!("{} Loading contacts...", spinner_char())
        } else {
            "No contacts".to_string()
        };
        render_placeholder(frame, inner, &msg);
        return;
    }

    let width = inner.width as usize;
    let rows = state.listing_rows();
    let mut items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let selected = i == state.selected;
            match *row {
                ListingRow::Contact(c) => contacts.get(c).map(|contact| {
                    contact_item(contact, state.is_expanded(contact), selected, width)
                }),
                ListingRow::Stub { contact, stub } => contacts
                    .get(contact)
                    .and_then(|c| c.threads.get(stub))
                    .map(|s| stub_item(s, selected, width)),
            }
        })
        .collect();

    if state.listing.is_loading() && !state.listing.is_reloading() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!("  {} Loading more...", spinner_char()),
            Theme::text_muted(),
        ))));
    }

    render_scrolled(frame, inner, items, state.selected);
}

fn contact_item(
    contact: &Contact,
    expanded: bool,
    selected: bool,
    width: usize,
) -> ListItem<'static> {
    let base = if selected { Theme::selected_bold() } else { Theme::text_bold() };
    let muted = with_selection_bg(Theme::text_muted(), selected);
    let score_style = with_selection_bg(Theme::score(), selected);

    let marker = if contact.threads.is_empty() {
        "  "
    } else if expanded {
        symbols::EXPANDED
    } else {
        symbols::COLLAPSED
    };

    let score = format!("{:>5.1}", contact.max_score);
    let meta = match (contact.first_active.as_deref(), contact.last_active.as_deref()) {
        (Some(first), Some(last)) if first != last => {
            format!("  {} threads  {} .. {}", contact.thread_count, first, last)
        }
        (_, last) => format!("  {} threads  {}", contact.thread_count, last.unwrap_or("-")),
    };
    let fixed = marker.chars().count() + score.len() + 1 + meta.chars().count();
    let name_width = width.saturating_sub(fixed);

    let name = format!("{} <{}>", contact.display_name(), contact.email);
    let name = truncate_string(&name, name_width);
    let padding = name_width.saturating_sub(name.chars().count());

    let mut lines = vec![Line::from(vec![
        Span::styled(marker, base),
        Span::styled(score, score_style),
        Span::styled(" ", base),
        Span::styled(name, base),
        Span::styled(" ".repeat(padding), base),
        Span::styled(meta, muted),
    ])];

    if let Some(title) = contact.top_thread_title.as_deref().filter(|t| !t.is_empty()) {
        let indent = "        ";
        lines.push(Line::from(vec![
            Span::styled(indent, muted),
            Span::styled(
                truncate_string(title, width.saturating_sub(indent.len())),
                muted,
            ),
        ]));
    }

    ListItem::new(lines)
}

fn stub_item(stub: &ThreadStub, selected: bool, width: usize) -> ListItem<'static> {
    let base = with_selection_bg(Theme::text_secondary(), selected);
    let muted = with_selection_bg(Theme::text_muted(), selected);
    let score_style = with_selection_bg(Theme::score(), selected);

    let score = format!("{:>5.1} ", stub.score);
    let meta = format!("  {} msgs  {}", stub.message_count, stub.last_message_at);
    let fixed = symbols::STUB.chars().count() + score.len() + meta.chars().count();
    let subject_width = width.saturating_sub(fixed);
    let subject = truncate_string(&stub.subject, subject_width);
    let padding = subject_width.saturating_sub(subject.chars().count());

    ListItem::new(Line::from(vec![
        Span::styled(symbols::STUB, muted),
        Span::styled(score, score_style),
        Span::styled(subject, base),
        Span::styled(" ".repeat(padding), base),
        Span::styled(meta, muted),
    ]))
}

fn render_search_results(frame: &mut Frame, area: Rect, state: &AppState) {
    let title = format!(
        " Search: \"{}\"  [{}] ",
        state.search.query(),
        state.search.sort().label()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(borders::panel())
        .border_style(Theme::border_focused());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let results = state.search.displayed();
    if results.is_empty() {
        let msg = if state.search.is_loading() {
            format!("{} Searching...", spinner_char())
        } else {
            "No matching threads".to_string()
        };
        render_placeholder(frame, inner, &msg);
        return;
    }

    let width = inner.width as usize;
    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, result)| search_item(result, i == state.search_selected, width))
        .collect();

    render_scrolled(frame, inner, items, state.search_selected);
}

fn search_item(result: &ThreadSearchResult, selected: bool, width: usize) -> ListItem<'static> {
    let base = if selected { Theme::selected_bold() } else { Theme::text_bold() };
    let muted = with_selection_bg(Theme::text_muted(), selected);
    let score_style = with_selection_bg(Theme::score(), selected);

    let score = match result.score {
        Some(score) => format!("{:>5.1} ", score),
        None => "    - ".to_string(),
    };
    let meta = format!("  {}  {}", result.sender, result.date);
    let subject_width = width.saturating_sub(score.len() + meta.chars().count());
    let subject = truncate_string(&result.subject, subject_width);
    let padding = subject_width.saturating_sub(subject.chars().count());

    let snippet: String = result.body.split_whitespace().collect::<Vec<_>>().join(" ");
    let snippet = truncate_string(&snippet, width.saturating_sub(6));

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(score, score_style),
            Span::styled(subject, base),
            Span::styled(" ".repeat(padding), base),
            Span::styled(meta, muted),
        ]),
        Line::from(vec![Span::styled("      ", muted), Span::styled(snippet, muted)]),
    ])
}

/// Keep the selected item about a quarter of the way down the visible area
fn render_scrolled(frame: &mut Frame, area: Rect, items: Vec<ListItem>, selected: usize) {
    let visible = area.height as usize;
    let heights: Vec<usize> = items.iter().map(|item| item.height()).collect();

    let selected_line: usize = heights.iter().take(selected).sum();
    let target = selected_line.saturating_sub(visible / 4);
    let mut skip = 0;
    let mut skipped_lines = 0;
    for h in &heights {
        if skipped_lines + h > target {
            break;
        }
        skipped_lines += h;
        skip += 1;
    }

    let list = List::new(items.into_iter().skip(skip).collect::<Vec<_>>());
    frame.render_widget(list, area);
}

fn render_placeholder(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message.to_string())
        .style(Theme::text_muted())
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
