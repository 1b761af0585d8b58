//! Command mode operations

use crate::command::{CommandResult, ParsedCommand, available_commands, parse_command};
use crate::app::state::ModalState;

use super::super::App;

impl App {
    pub(super) fn execute_command(&mut self) {
        let input = self
            .state
            .modal
            .command_input()
            .unwrap_or_default()
            .trim()
            .to_string();

        if input.is_empty() {
            self.exit_command_mode();
            return;
        }

        match parse_command(&input) {
            Some(ParsedCommand::Export(dir)) => {
                self.exit_command_mode();
                self.export_ignore_list(dir);
            }
            Some(ParsedCommand::Import(path)) => {
                self.exit_command_mode();
                let path = crate::config::expand_home(&path);
                self.import_ignore_file(&path);
            }
            Some(ParsedCommand::Home) => {
                self.exit_command_mode();
                self.go_home();
            }
            Some(ParsedCommand::Settings) => {
                self.exit_command_mode();
                self.open_settings();
            }
            Some(ParsedCommand::Help) => {
                self.set_command_result(CommandResult::ShowHelp(available_commands()));
            }
            Some(ParsedCommand::Keys) => {
                let keybindings = self.bindings.all_bindings();
                self.set_command_result(CommandResult::ShowKeys(keybindings));
            }
            Some(ParsedCommand::Quit) => {
                self.exit_command_mode();
                self.quit_requested = true;
            }
            None => {
                self.set_command_result(CommandResult::Error(format!(
                    "Unknown command: {}. Type :help for available commands.",
                    input
                )));
            }
        }
    }

    /// Show a result and clear the input for the next command
    fn set_command_result(&mut self, value: CommandResult) {
        if let ModalState::Command { input, result } = &mut self.state.modal {
            input.clear();
            *result = Some(value);
        }
    }

    pub(crate) fn exit_command_mode(&mut self) {
        if self.state.modal.is_command() {
            self.state.modal = ModalState::None;
        }
    }
}
