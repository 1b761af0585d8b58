use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use crate::config::KeybindingMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Navigation
    Up,
    Down,
    Left,
    Right,
    Top,
    Bottom,
    PageUp,
    PageDown,

    // Actions
    Open,
    Back,
    Quit,
    Refresh,
    Search,
    ToggleSort,
    Home,
    OpenSettings,

    // Listing
    IgnoreEmail,
    IgnoreDomain,

    // Settings panel
    FocusInput,
    SubmitInput,
    ToggleKind,
    Delete,
    Export,
    ImportPrompt,

    // Confirmation and notices
    Confirm,
    CancelConfirm,
    DismissNotice,

    // Command mode
    Command,
    ExecuteCommand,

    // Help
    Help,
}

pub struct KeyBindings {
    bindings: HashMap<KeyEvent, Action>,
}

/// A displayable keybinding entry
#[derive(Debug, Clone)]
pub struct KeybindingEntry {
    pub key: String,
    pub description: String,
    pub category: &'static str,
}

impl KeyBindings {
    pub fn new(mode: &KeybindingMode) -> Self {
        let bindings = match mode {
            KeybindingMode::Vim => Self::vim_bindings(),
            KeybindingMode::Arrows => Self::arrow_bindings(),
        };
        Self { bindings }
    }

    pub fn get(&self, event: &KeyEvent) -> Option<Action> {
        self.bindings.get(event).copied()
    }

    /// Get all keybindings as displayable entries grouped by category
    pub fn all_bindings(&self) -> Vec<KeybindingEntry> {
        let mut entries: Vec<_> = self
            .bindings
            .iter()
            .map(|(event, action)| KeybindingEntry {
                key: format_key_event(event),
                description: action_description(action).to_string(),
                category: action_category(action),
            })
            .collect();

        entries.extend(settings_entries());

        entries.sort_by(|a, b| {
            category_order(a.category)
                .cmp(&category_order(b.category))
                .then_with(|| a.description.cmp(&b.description))
        });
        entries
    }

    fn vim_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key('j'), Action::Down);
        map.insert(key('k'), Action::Up);
        map.insert(key('h'), Action::Left);
        map.insert(key('l'), Action::Right);
        map.insert(key('g'), Action::Top);
        map.insert(shift_key('G'), Action::Bottom);
        map.insert(ctrl_key('d'), Action::PageDown);
        map.insert(ctrl_key('u'), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key('q'), Action::Quit);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(ctrl_key('r'), Action::Refresh);
        map.insert(key('/'), Action::Search);
        map.insert(key('s'), Action::ToggleSort);
        map.insert(shift_key('H'), Action::Home);
        map.insert(key(','), Action::OpenSettings);
        map.insert(key(':'), Action::Command);

        // Listing
        map.insert(key('i'), Action::IgnoreEmail);
        map.insert(shift_key('I'), Action::IgnoreDomain);

        // Help
        map.insert(key('?'), Action::Help);

        map
    }

    fn arrow_bindings() -> HashMap<KeyEvent, Action> {
        let mut map = HashMap::new();

        // Navigation
        map.insert(key_code(KeyCode::Down), Action::Down);
        map.insert(key_code(KeyCode::Up), Action::Up);
        map.insert(key_code(KeyCode::Left), Action::Left);
        map.insert(key_code(KeyCode::Right), Action::Right);
        map.insert(key_code(KeyCode::Home), Action::Top);
        map.insert(key_code(KeyCode::End), Action::Bottom);
        map.insert(key_code(KeyCode::PageDown), Action::PageDown);
        map.insert(key_code(KeyCode::PageUp), Action::PageUp);

        // Actions
        map.insert(key_code(KeyCode::Enter), Action::Open);
        map.insert(key_code(KeyCode::Esc), Action::Back);
        map.insert(key_code(KeyCode::Backspace), Action::Back);
        map.insert(ctrl_key('q'), Action::Quit);
        map.insert(key_code(KeyCode::F(5)), Action::Refresh);
        map.insert(key_code(KeyCode::F(3)), Action::Search);
        map.insert(key('/'), Action::Search);
        map.insert(key_code(KeyCode::F(4)), Action::ToggleSort);
        map.insert(ctrl_key('h'), Action::Home);
        map.insert(key_code(KeyCode::F(2)), Action::OpenSettings);
        map.insert(key(','), Action::OpenSettings);
        map.insert(key(':'), Action::Command);

        // Listing
        map.insert(ctrl_key('e'), Action::IgnoreEmail);
        map.insert(ctrl_key('o'), Action::IgnoreDomain);

        // Help
        map.insert(key_code(KeyCode::F(1)), Action::Help);
        map.insert(key('?'), Action::Help);

        map
    }
}

fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

fn shift_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::SHIFT)
}

fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn key_code(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// Settings-panel keys are matched by the input handler directly, not through the map
fn settings_entries() -> Vec<KeybindingEntry> {
    [
        ("a", "Type a new rule"),
        ("Tab", "Switch rule kind (domain/email)"),
        ("d", "Delete selected rule"),
        ("e", "Export list to file"),
        ("i", "Import list from file"),
    ]
    .into_iter()
    .map(|(key, description)| KeybindingEntry {
        key: key.to_string(),
        description: description.to_string(),
        category: "Settings",
    })
    .collect()
}

/// Format a KeyEvent for display
fn format_key_event(event: &KeyEvent) -> String {
    let mut parts = Vec::new();

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl+");
    }
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift+");
    }

    let key_str = match event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => format!("{:?}", event.code),
    };

    format!("{}{}", parts.join(""), key_str)
}

fn action_description(action: &Action) -> &'static str {
    match action {
        Action::Up => "Move up",
        Action::Down => "Move down",
        Action::Left => "Collapse contact",
        Action::Right => "Expand contact",
        Action::Top => "Go to top",
        Action::Bottom => "Go to bottom",
        Action::PageUp => "Page up",
        Action::PageDown => "Page down",
        Action::Open => "Open / expand",
        Action::Back => "Go back / close",
        Action::Quit => "Quit",
        Action::Refresh => "Reload",
        Action::Search => "Search threads",
        Action::ToggleSort => "Sort results by relevance/score",
        Action::Home => "Back to contact listing",
        Action::OpenSettings => "Ignore list settings",
        Action::IgnoreEmail => "Ignore contact's email",
        Action::IgnoreDomain => "Ignore contact's domain",
        Action::FocusInput => "Type a new rule",
        Action::SubmitInput => "Submit input",
        Action::ToggleKind => "Switch rule kind",
        Action::Delete => "Delete rule",
        Action::Export => "Export list",
        Action::ImportPrompt => "Import list",
        Action::Confirm => "Confirm",
        Action::CancelConfirm => "Cancel",
        Action::DismissNotice => "Dismiss notice",
        Action::Command => "Enter command mode",
        Action::ExecuteCommand => "Execute command",
        Action::Help => "Toggle help",
    }
}

fn action_category(action: &Action) -> &'static str {
    match action {
        Action::Up
        | Action::Down
        | Action::Left
        | Action::Right
        | Action::Top
        | Action::Bottom
        | Action::PageUp
        | Action::PageDown => "Navigation",

        Action::Open
        | Action::Back
        | Action::Quit
        | Action::Refresh
        | Action::Search
        | Action::ToggleSort
        | Action::Home
        | Action::OpenSettings => "Actions",

        Action::IgnoreEmail | Action::IgnoreDomain => "Contacts",

        Action::FocusInput
        | Action::SubmitInput
        | Action::ToggleKind
        | Action::Delete
        | Action::Export
        | Action::ImportPrompt
        | Action::Confirm
        | Action::CancelConfirm
        | Action::DismissNotice => "Settings",

        Action::Command | Action::ExecuteCommand => "Commands",

        Action::Help => "Help",
    }
}

fn category_order(category: &str) -> u8 {
    match category {
        "Navigation" => 0,
        "Actions" => 1,
        "Contacts" => 2,
        "Settings" => 3,
        "Commands" => 4,
        "Help" => 5,
        _ => 99,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vim_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);

        assert_eq!(bindings.get(&key('j')), Some(Action::Down));
        assert_eq!(bindings.get(&key('k')), Some(Action::Up));
        assert_eq!(bindings.get(&key('q')), Some(Action::Quit));
        assert_eq!(bindings.get(&key('i')), Some(Action::IgnoreEmail));
        assert_eq!(bindings.get(&shift_key('I')), Some(Action::IgnoreDomain));
    }

    #[test]
    fn test_arrow_bindings() {
        let bindings = KeyBindings::new(&KeybindingMode::Arrows);

        assert_eq!(bindings.get(&key_code(KeyCode::Down)), Some(Action::Down));
        assert_eq!(bindings.get(&key_code(KeyCode::Up)), Some(Action::Up));
        assert_eq!(bindings.get(&ctrl_key('q')), Some(Action::Quit));
    }

    #[test]
    fn test_help_lists_settings_keys() {
        let bindings = KeyBindings::new(&KeybindingMode::Vim);
        let entries = bindings.all_bindings();

        assert!(entries.iter().any(|e| e.category == "Settings" && e.key == "d"));
        let first_settings = entries.iter().position(|e| e.category == "Settings");
        let last_nav = entries.iter().rposition(|e| e.category == "Navigation");
        assert!(last_nav < first_settings);
    }
}
