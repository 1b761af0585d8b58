//! Text input handling (chars, backspace)

use crate::app::state::{ModalState, SettingsFocus, View};

use super::super::App;

impl App {
    pub(crate) fn handle_char(&mut self, c: char) {
        if self.state.modal.is_search() {
            self.search_push(c);
            return;
        }
        if let ModalState::Command { input, .. } | ModalState::ImportPath { input } =
            &mut self.state.modal
        {
            input.push(c);
            return;
        }

        if self.state.view == View::Settings && self.state.settings_focus == SettingsFocus::Input {
            self.state.ignore.push_input(c);
        }
    }

    pub(crate) fn handle_backspace(&mut self) {
        if self.state.modal.is_search() {
            self.search_pop();
            return;
        }
        if let ModalState::Command { input, .. } | ModalState::ImportPath { input } =
            &mut self.state.modal
        {
            input.pop();
            return;
        }

        if self.state.view == View::Settings && self.state.settings_focus == SettingsFocus::Input {
            self.state.ignore.pop_input();
        }
    }
}
