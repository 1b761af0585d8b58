//! Header bar: view title, listing counter, activity and status message

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::theme::{Theme, symbols};
use crate::constants::SPINNER_FRAME_MS;

/// Status bar info for rendering
pub struct StatusInfo<'a> {
    pub title: &'a str,
    /// `loaded / total`, or `-` while searching
    pub counter: &'a str,
    /// Active query shown next to the counter
    pub search_query: Option<&'a str>,
    pub loading: bool,
    pub status_message: &'a str,
    /// Whether there's an unacknowledged error (show indicator)
    pub has_error: bool,
}

/// Calculate display width of a string (accounting for Unicode)
fn display_width(s: &str) -> usize {
    use unicode_width::UnicodeWidthStr;
    s.width()
}

/// Truncate string to fit display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if max_width < 4 {
        return s.chars().take(max_width).collect();
    }

    let mut width = 0;
    let mut result = String::new();

    for c in s.chars() {
        let char_width = c.width().unwrap_or(1);
        if width + char_width > max_width - 3 {
            result.push_str("...");
            return result;
        }
        width += char_width;
        result.push(c);
    }
    result
}

pub fn status_bar(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let style = Theme::status_bar();
    let width = area.width as usize;

    let activity = if info.loading {
        format!(" {} ", spinner_char())
    } else {
        "   ".to_string()
    };

    let mut left: Vec<(String, Style)> = vec![
        (activity, style),
        (format!("{} ", info.title), style.add_modifier(Modifier::BOLD)),
        (info.counter.to_string(), style),
    ];
    if let Some(query) = info.search_query.filter(|q| !q.is_empty()) {
        left.push((format!("  \"{}\"", query), style));
    }
    if info.has_error {
        left.push((
            format!(" {}", symbols::ERROR_INDICATOR),
            Theme::status_error_indicator(),
        ));
    }

    let left_width: usize = left.iter().map(|(s, _)| display_width(s)).sum();
    let available = width.saturating_sub(left_width + 2);
    let right = truncate_to_width(info.status_message, available);
    let padding = width.saturating_sub(left_width + display_width(&right) + 1);

    let mut spans: Vec<Span> = left
        .into_iter()
        .map(|(text, style)| Span::styled(text, style))
        .collect();
    spans.push(Span::styled(" ".repeat(padding), style));
    spans.push(Span::styled(right, style));
    spans.push(Span::styled(" ", style));

    let paragraph = Paragraph::new(Line::from(spans)).style(style);
    frame.render_widget(paragraph, area);
}

/// Get an animated spinner character for loading states
pub fn spinner_char() -> char {
    const FRAMES: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    FRAMES[(millis / SPINNER_FRAME_MS) as usize % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("a longer message", 8), "a lon...");
        assert_eq!(truncate_to_width("abc", 2), "ab");
    }
}
