//! Command types and parsing for vim-style command mode

use std::path::PathBuf;

use crate::input::KeybindingEntry;

/// Result of command execution
#[derive(Debug, Clone)]
pub enum CommandResult {
    Success(String),
    Error(String),
    ShowHelp(Vec<CommandHelp>),
    ShowKeys(Vec<KeybindingEntry>),
}

/// Help information for a command
#[derive(Debug, Clone)]
pub struct CommandHelp {
    pub name: &'static str,
    pub description: &'static str,
}

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Write the ignore list to a file, optionally into a given directory
    Export(Option<PathBuf>),
    Import(PathBuf),
    Home,
    Settings,
    Help,
    Keys,
    Quit,
}

/// Parse a command string into a ParsedCommand
pub fn parse_command(input: &str) -> Option<ParsedCommand> {
    let trimmed = input.trim();
    let (name, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim()).filter(|r| !r.is_empty())),
        None => (trimmed, None),
    };

    match (name, arg) {
        ("export", dir) => Some(ParsedCommand::Export(dir.map(PathBuf::from))),
        ("import", Some(path)) => Some(ParsedCommand::Import(PathBuf::from(path))),
        ("home", None) => Some(ParsedCommand::Home),
        ("settings" | "ignore", None) => Some(ParsedCommand::Settings),
        ("help" | "h" | "?", None) => Some(ParsedCommand::Help),
        ("keys" | "keybindings" | "bindings", None) => Some(ParsedCommand::Keys),
        ("q" | "quit", None) => Some(ParsedCommand::Quit),
        _ => None,
    }
}

/// Get all available commands for help display
pub fn available_commands() -> Vec<CommandHelp> {
    vec![
        CommandHelp {
            name: "export [dir]",
            description: "Export the ignore list to IgnoredContacts_<timestamp>.txt",
        },
        CommandHelp {
            name: "help",
            description: "Show this help message",
        },
        CommandHelp {
            name: "home",
            description: "Clear the search and reload the contact listing",
        },
        CommandHelp {
            name: "import <path>",
            description: "Import an exported ignore list",
        },
        CommandHelp {
            name: "keys",
            description: "Show all keybindings",
        },
        CommandHelp {
            name: "quit",
            description: "Exit the application",
        },
        CommandHelp {
            name: "settings",
            description: "Open the ignore list settings",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("quit"), Some(ParsedCommand::Quit));
        assert_eq!(parse_command(" q "), Some(ParsedCommand::Quit));
        assert_eq!(parse_command("home"), Some(ParsedCommand::Home));
        assert_eq!(parse_command("settings"), Some(ParsedCommand::Settings));
        assert_eq!(parse_command("nope"), None);
    }

    #[test]
    fn test_parse_export_with_optional_dir() {
        assert_eq!(parse_command("export"), Some(ParsedCommand::Export(None)));
        assert_eq!(
            parse_command("export  ~/Downloads "),
            Some(ParsedCommand::Export(Some(PathBuf::from("~/Downloads"))))
        );
    }

    #[test]
    fn test_parse_import_requires_path() {
        assert_eq!(parse_command("import"), None);
        assert_eq!(
            parse_command("import /tmp/My List.txt"),
            Some(ParsedCommand::Import(PathBuf::from("/tmp/My List.txt")))
        );
    }
}
