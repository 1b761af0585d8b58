use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};

use super::keybindings::{Action, KeyBindings};
use crate::app::state::{AppState, ModalState, SettingsFocus, View};

pub enum InputResult {
    Continue,
    Quit,
    Action(Action),
    Char(char),
    Backspace,
}

pub fn handle_input(event: Event, state: &AppState, bindings: &KeyBindings) -> InputResult {
    match event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => {
            handle_key(key_event, state, bindings)
        }
        _ => InputResult::Continue,
    }
}

fn handle_key(key: KeyEvent, state: &AppState, bindings: &KeyBindings) -> InputResult {
    // Blocking notice swallows everything until dismissed
    if state.modal.is_notice() {
        return handle_notice_input(key);
    }

    // Delete confirmation in the settings panel
    if state.ignore.pending_removal().is_some() {
        return handle_confirm_input(key);
    }

    if state.modal.is_help() {
        return handle_help_input(key, bindings);
    }

    if state.modal.is_command() {
        return handle_command_input(key);
    }

    if state.modal.is_search() {
        return handle_search_input(key);
    }

    if matches!(state.modal, ModalState::ImportPath { .. }) {
        return handle_prompt_input(key);
    }

    if state.view == View::Settings {
        return match state.settings_focus {
            SettingsFocus::Input => handle_settings_input_focus(key),
            SettingsFocus::List => handle_settings_list(key, bindings),
        };
    }

    // Check for mapped action
    if let Some(action) = bindings.get(&key) {
        if action == Action::Quit {
            return InputResult::Quit;
        }
        return InputResult::Action(action);
    }

    InputResult::Continue
}

fn handle_notice_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            InputResult::Action(Action::DismissNotice)
        }
        _ => InputResult::Continue,
    }
}

fn handle_confirm_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => InputResult::Action(Action::Confirm),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            InputResult::Action(Action::CancelConfirm)
        }
        _ => InputResult::Continue,
    }
}

fn handle_help_input(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // In help modal: j/k scroll, Esc or ? closes
    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Help => return InputResult::Action(Action::Help),
            Action::Up => return InputResult::Action(Action::Up),
            Action::Down => return InputResult::Action(Action::Down),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('?') => InputResult::Action(Action::Help),
        KeyCode::Up | KeyCode::Char('k') => InputResult::Action(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => InputResult::Action(Action::Down),
        _ => InputResult::Continue,
    }
}

fn handle_command_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Action(Action::ExecuteCommand),
        KeyCode::Esc => InputResult::Action(Action::Back),
        _ => InputResult::Continue,
    }
}

fn handle_search_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter | KeyCode::Esc => InputResult::Action(Action::Back), // Stop editing
        _ => InputResult::Continue,
    }
}

fn handle_prompt_input(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Action(Action::SubmitInput),
        KeyCode::Esc => InputResult::Action(Action::Back),
        _ => InputResult::Continue,
    }
}

fn handle_settings_input_focus(key: KeyEvent) -> InputResult {
    match key.code {
        KeyCode::Char(c) => InputResult::Char(c),
        KeyCode::Backspace => InputResult::Backspace,
        KeyCode::Enter => InputResult::Action(Action::SubmitInput),
        KeyCode::Tab => InputResult::Action(Action::ToggleKind),
        KeyCode::Esc => InputResult::Action(Action::Back),
        _ => InputResult::Continue,
    }
}

fn handle_settings_list(key: KeyEvent, bindings: &KeyBindings) -> InputResult {
    // Panel keys first: a add, d delete, e export, i import, Tab kind
    match key.code {
        KeyCode::Char('a') => return InputResult::Action(Action::FocusInput),
        KeyCode::Char('d') | KeyCode::Delete => return InputResult::Action(Action::Delete),
        KeyCode::Char('e') => return InputResult::Action(Action::Export),
        KeyCode::Char('i') => return InputResult::Action(Action::ImportPrompt),
        KeyCode::Tab => return InputResult::Action(Action::ToggleKind),
        _ => {}
    }

    if let Some(action) = bindings.get(&key) {
        match action {
            Action::Up
            | Action::Down
            | Action::Top
            | Action::Bottom
            | Action::Back
            | Action::Refresh
            | Action::Command
            | Action::Help => return InputResult::Action(action),
            Action::Quit => return InputResult::Quit,
            _ => {}
        }
    }

    InputResult::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{IgnoreItem, IgnoreKind};
    use crate::config::KeybindingMode;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn state() -> AppState {
        AppState::new(50, Duration::from_millis(500))
    }

    #[test]
    fn test_quit_action() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let result = handle_key(press(KeyCode::Char('q')), &state(), &bindings);

        assert!(matches!(result, InputResult::Quit));
    }

    #[test]
    fn test_search_modal_captures_text() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = state();
        state.modal = ModalState::Search;

        assert!(matches!(
            handle_key(press(KeyCode::Char('q')), &state, &bindings),
            InputResult::Char('q')
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Esc), &state, &bindings),
            InputResult::Action(Action::Back)
        ));
    }

    #[test]
    fn test_notice_blocks_other_keys() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = state();
        state.show_notice("Error", "Failed or duplicate");

        assert!(matches!(
            handle_key(press(KeyCode::Char('j')), &state, &bindings),
            InputResult::Continue
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Enter), &state, &bindings),
            InputResult::Action(Action::DismissNotice)
        ));
    }

    #[test]
    fn test_settings_keys_are_contextual() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = state();

        // On the listing `i` ignores the selected email
        assert!(matches!(
            handle_key(press(KeyCode::Char('i')), &state, &bindings),
            InputResult::Action(Action::IgnoreEmail)
        ));

        state.view = View::Settings;
        assert!(matches!(
            handle_key(press(KeyCode::Char('i')), &state, &bindings),
            InputResult::Action(Action::ImportPrompt)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Char('d')), &state, &bindings),
            InputResult::Action(Action::Delete)
        ));

        state.settings_focus = SettingsFocus::Input;
        assert!(matches!(
            handle_key(press(KeyCode::Char('d')), &state, &bindings),
            InputResult::Char('d')
        ));
    }

    #[test]
    fn test_pending_removal_asks_yes_no() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let mut state = state();
        state.view = View::Settings;
        state
            .ignore
            .apply_list(Ok(vec![IgnoreItem {
                id: 1,
                value: "a.com".to_string(),
                kind: IgnoreKind::Domain,
            }]))
            .unwrap();
        state.ignore.request_removal();

        assert!(matches!(
            handle_key(press(KeyCode::Char('y')), &state, &bindings),
            InputResult::Action(Action::Confirm)
        ));
        assert!(matches!(
            handle_key(press(KeyCode::Esc), &state, &bindings),
            InputResult::Action(Action::CancelConfirm)
        ));
    }
}
