//! Top-level frame layout: status bar, current view, help/error/input line, overlays

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    widgets::Block,
};

use super::home::render_home;
use super::popups::{render_command_bar, render_help_popup, render_notice, render_prompt};
use super::settings::render_settings;
use super::theme::Theme;
use super::thread::render_thread;
use super::widgets::{StatusInfo, error_bar, help_bar, status_bar};
use crate::app::state::{AppState, ModalState, SettingsFocus, View};
use crate::command::CommandResult;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Theme::main_bg()), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(0),    // Main view
            Constraint::Length(1), // Help bar / error / input
        ])
        .split(area);

    let counter = state.counter_label();
    let title = match state.view {
        View::Home if state.is_searching() => "Search",
        View::Home => "Contacts",
        View::Thread => "Thread",
        View::Settings => "Ignore list",
    };
    let loading = state.listing.is_loading()
        || state.search.is_loading()
        || state.detail.messages_loading()
        || state.detail.analysis_loading()
        || state.ignore.is_loading()
        || state.ignore.is_busy();
    status_bar(
        frame,
        chunks[0],
        &StatusInfo {
            title,
            counter: &counter,
            search_query: (state.view == View::Home).then(|| state.search.query()),
            loading,
            status_message: &state.status.message,
            has_error: state.status.has_unacknowledged_error,
        },
    );

    match state.view {
        View::Home => render_home(frame, chunks[1], state),
        View::Thread => render_thread(frame, chunks[1], state),
        View::Settings => render_settings(frame, chunks[1], state),
    }

    match &state.modal {
        ModalState::Command { .. } => render_command_bar(frame, chunks[2], state),
        ModalState::Search => render_prompt(frame, chunks[2], "/", state.search.query()),
        ModalState::ImportPath { input } => render_prompt(frame, chunks[2], "Import file:", input),
        _ => {
            if let Some(ref error) = state.status.error {
                error_bar(frame, chunks[2], error);
            } else {
                help_bar(frame, chunks[2], hints(state));
            }
        }
    }

    match &state.modal {
        ModalState::Help {
            keybindings,
            commands,
            scroll,
        } => render_help_popup(frame, chunks[1], keybindings, commands, *scroll),
        ModalState::Notice { title, message } => render_notice(frame, area, title, message),
        ModalState::Command {
            result: Some(CommandResult::ShowHelp(commands)),
            ..
        } => render_help_popup(frame, chunks[1], &[], commands, 0),
        ModalState::Command {
            result: Some(CommandResult::ShowKeys(keys)),
            ..
        } => render_help_popup(frame, chunks[1], keys, &[], 0),
        _ => {}
    }
}

fn hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match state.view {
        View::Home if state.is_searching() => &[
            ("j/k", "nav"),
            ("Enter", "open"),
            ("s", "sort"),
            ("/", "edit"),
            ("Esc", "clear"),
            ("?", "help"),
        ],
        View::Home => &[
            ("j/k", "nav"),
            ("Enter", "expand/open"),
            ("/", "search"),
            ("i", "ignore email"),
            ("I", "ignore domain"),
            (",", "settings"),
            (":", "cmd"),
            ("?", "help"),
        ],
        View::Thread => &[("j/k", "scroll"), ("^r", "refresh"), ("Esc", "back")],
        View::Settings => match state.settings_focus {
            SettingsFocus::Input => &[("Enter", "add"), ("Tab", "type"), ("Esc", "done")],
            SettingsFocus::List => &[
                ("a", "add"),
                ("d", "delete"),
                ("e", "export"),
                ("i", "import"),
                ("Tab", "type"),
                ("Esc", "close"),
            ],
        },
    }
}
