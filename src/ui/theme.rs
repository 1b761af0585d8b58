//! Centralized theming for the pastlead TUI
//!
//! Single source of truth for all colors and styles used throughout the application.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Catppuccin Mocha color palette
mod catppuccin {
    use super::Color;

    // Background layers (darkest to lightest)
    pub const BASE: Color = Color::Rgb(30, 30, 46); // #1e1e2e - main background
    pub const MANTLE: Color = Color::Rgb(24, 24, 37); // #181825 - status bar, panels
    pub const SURFACE0: Color = Color::Rgb(49, 50, 68); // #313244 - borders
    pub const SURFACE1: Color = Color::Rgb(69, 71, 90); // #45475a - selection

    // Text colors
    pub const TEXT: Color = Color::Rgb(205, 214, 244); // #cdd6f4 - primary
    pub const SUBTEXT1: Color = Color::Rgb(186, 194, 222); // #bac2de - secondary
    pub const OVERLAY0: Color = Color::Rgb(108, 112, 134); // #6c7086 - muted/disabled

    // Accent colors
    pub const LAVENDER: Color = Color::Rgb(180, 190, 254); // #b4befe - focused borders
    pub const BLUE: Color = Color::Rgb(137, 180, 250); // #89b4fa - accent
    pub const YELLOW: Color = Color::Rgb(249, 226, 175); // #f9e2af - warnings, keys
    pub const PEACH: Color = Color::Rgb(250, 179, 135); // #fab387 - scores
    pub const RED: Color = Color::Rgb(243, 139, 168); // #f38ba8 - errors
    pub const MAUVE: Color = Color::Rgb(203, 166, 247); // #cba6f7 - AI panel
}

/// Border type helpers for different UI contexts
pub mod borders {
    use super::BorderType;

    pub fn popup() -> BorderType {
        BorderType::Rounded
    }

    pub fn panel() -> BorderType {
        BorderType::Plain
    }
}

/// Color palette
pub mod colors {
    use super::{Color, catppuccin};

    pub fn bg_main() -> Color {
        catppuccin::BASE
    }

    pub fn bg_selection() -> Color {
        catppuccin::SURFACE1
    }

    pub fn bg_status() -> Color {
        catppuccin::MANTLE
    }

    pub fn bg_help() -> Color {
        catppuccin::MANTLE
    }

    pub fn bg_error() -> Color {
        catppuccin::RED
    }

    pub fn fg_primary() -> Color {
        catppuccin::TEXT
    }

    pub fn fg_secondary() -> Color {
        catppuccin::SUBTEXT1
    }

    pub fn fg_muted() -> Color {
        catppuccin::OVERLAY0
    }

    pub fn fg_accent() -> Color {
        catppuccin::BLUE
    }

    pub fn fg_warning() -> Color {
        catppuccin::YELLOW
    }

    pub fn fg_score() -> Color {
        catppuccin::PEACH
    }

    pub fn fg_ai() -> Color {
        catppuccin::MAUVE
    }

    pub fn border() -> Color {
        catppuccin::SURFACE0
    }

    pub fn border_focused() -> Color {
        catppuccin::LAVENDER
    }
}

/// UI symbols - centralized for consistency
pub mod symbols {
    pub const EXPANDED: &str = "▼ ";
    pub const COLLAPSED: &str = "▶ ";
    pub const STUB: &str = "  └─ ";
    pub const ERROR_INDICATOR: &str = "!";
}

/// Style presets
pub struct Theme;

impl Theme {
    // === Selection Styles ===

    pub fn selected() -> Style {
        Style::default()
            .bg(colors::bg_selection())
            .fg(colors::fg_primary())
    }

    pub fn selected_bold() -> Style {
        Self::selected().add_modifier(Modifier::BOLD)
    }

    // === Text Styles ===

    pub fn text() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .bg(colors::bg_main())
    }

    pub fn text_bold() -> Style {
        Self::text().add_modifier(Modifier::BOLD)
    }

    pub fn text_secondary() -> Style {
        Style::default()
            .fg(colors::fg_secondary())
            .bg(colors::bg_main())
    }

    pub fn text_muted() -> Style {
        Style::default()
            .fg(colors::fg_muted())
            .bg(colors::bg_main())
    }

    pub fn text_accent() -> Style {
        Style::default()
            .fg(colors::fg_accent())
            .bg(colors::bg_main())
    }

    pub fn text_warning() -> Style {
        Style::default()
            .fg(colors::fg_warning())
            .bg(colors::bg_main())
    }

    pub fn score() -> Style {
        Style::default()
            .fg(colors::fg_score())
            .bg(colors::bg_main())
    }

    pub fn ai_heading() -> Style {
        Style::default()
            .fg(colors::fg_ai())
            .bg(colors::bg_main())
            .add_modifier(Modifier::BOLD)
    }

    // === Status Bar ===

    pub fn status_bar() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::fg_primary())
    }

    pub fn status_error_indicator() -> Style {
        Style::default()
            .bg(colors::bg_status())
            .fg(colors::bg_error())
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_bar() -> Style {
        Style::default()
            .bg(colors::bg_error())
            .fg(colors::bg_main())
    }

    // === Help Bar ===

    pub fn help_bar() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_primary())
    }

    pub fn help_key() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_warning())
    }

    pub fn help_desc() -> Style {
        Style::default()
            .bg(colors::bg_help())
            .fg(colors::fg_muted())
    }

    // === Borders ===

    pub fn border() -> Style {
        Style::default().fg(colors::border()).bg(colors::bg_main())
    }

    pub fn border_focused() -> Style {
        Style::default()
            .fg(colors::border_focused())
            .bg(colors::bg_main())
    }

    /// Fill for the whole frame
    pub fn main_bg() -> Style {
        Style::default().bg(colors::bg_main())
    }

    pub fn input_highlight() -> Style {
        Style::default()
            .fg(colors::fg_primary())
            .bg(colors::bg_selection())
    }
}

/// Apply the selection background when `selected`
pub fn with_selection_bg(style: Style, selected: bool) -> Style {
    if selected {
        style.bg(colors::bg_selection())
    } else {
        style
    }
}
