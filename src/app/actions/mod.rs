//! Action handlers for user input
//!
//! This module is split into focused submodules:
//! - `navigation`: Movement and scrolling, load-more trigger
//! - `listing`: Contact listing (reload, expand, inline ignore)
//! - `search`: Thread search query and sort
//! - `thread`: Thread detail view
//! - `settings`: Ignore list panel (add, delete, export, import)
//! - `input`: Text input handling
//! - `command`: Command mode operations

mod command;
mod input;
mod listing;
mod navigation;
mod search;
mod settings;
mod thread;

use crate::api::types::IgnoreKind;
use crate::app::state::{ModalState, SettingsFocus, View};
use crate::input::Action;

use super::App;

impl App {
    pub(crate) fn handle_action(&mut self, action: Action) {
        match action {
            // Navigation
            Action::Up => {
                if self.state.modal.is_help() {
                    self.help_scroll_up();
                } else {
                    self.move_by(-1);
                }
            }
            Action::Down => {
                if self.state.modal.is_help() {
                    self.help_scroll_down();
                } else {
                    self.move_by(1);
                }
            }
            Action::PageUp => self.move_by(-10),
            Action::PageDown => self.move_by(10),
            Action::Top => self.move_to_top(),
            Action::Bottom => self.move_to_bottom(),
            Action::Left => {
                if self.state.view == View::Home && !self.state.is_searching() {
                    self.state.collapse();
                }
            }
            Action::Right => {
                if self.state.view == View::Home
                    && !self.state.is_searching()
                    && self.state.expanded.is_none()
                {
                    self.state.toggle_expansion();
                }
            }

            Action::Open => self.open_selected(),
            Action::Back => self.go_back(),
            Action::Quit => {} // Handled in event loop
            Action::Refresh => self.refresh_view(),
            Action::Home => {
                if !self.state.modal.is_active() {
                    self.go_home();
                }
            }

            // Search
            Action::Search => {
                if self.state.view == View::Home && !self.state.modal.is_active() {
                    self.state.modal = ModalState::Search;
                } else if self.state.view != View::Home {
                    self.state.set_error("Search is only available on the home view");
                }
            }
            Action::ToggleSort => self.toggle_sort(),

            // Listing
            Action::IgnoreEmail => self.ignore_selected_contact(IgnoreKind::Email),
            Action::IgnoreDomain => self.ignore_selected_contact(IgnoreKind::Domain),

            // Settings panel
            Action::OpenSettings => {
                if !self.state.modal.is_active() && self.state.view != View::Settings {
                    self.open_settings();
                }
            }
            Action::FocusInput => self.state.settings_focus = SettingsFocus::Input,
            Action::SubmitInput => self.submit_input(),
            Action::ToggleKind => self.state.ignore.toggle_kind(),
            Action::Delete => self.request_removal(),
            Action::Export => self.export_ignore_list(None),
            Action::ImportPrompt => {
                self.state.modal = ModalState::ImportPath {
                    input: String::new(),
                };
            }

            // Confirmation and notices
            Action::Confirm => self.confirm_removal(),
            Action::CancelConfirm => self.state.ignore.cancel_removal(),
            Action::DismissNotice => {
                if self.state.modal.is_notice() {
                    self.state.modal = ModalState::None;
                }
            }

            // Command mode
            Action::Command => {
                if !self.state.modal.is_active() {
                    self.state.modal = ModalState::Command {
                        input: String::new(),
                        result: None,
                    };
                }
            }
            Action::ExecuteCommand => self.execute_command(),

            Action::Help => self.toggle_help(),
        }
    }

    /// Esc: close the innermost thing that is open
    fn go_back(&mut self) {
        if self.state.modal.is_command() {
            self.exit_command_mode();
            return;
        }
        if matches!(self.state.modal, ModalState::Search | ModalState::ImportPath { .. }) {
            self.state.modal = ModalState::None;
            return;
        }

        match self.state.view {
            View::Thread => self.leave_thread(),
            View::Settings => match self.state.settings_focus {
                SettingsFocus::Input => self.state.settings_focus = SettingsFocus::List,
                SettingsFocus::List => self.close_settings(),
            },
            View::Home => {
                if self.state.expanded.is_some() {
                    self.state.collapse();
                } else if !self.state.search.query().is_empty() {
                    self.clear_search_query();
                }
            }
        }
    }

    fn open_selected(&mut self) {
        match self.state.view {
            View::Home if self.state.is_searching() => self.open_search_result(),
            View::Home => self.open_listing_row(),
            View::Thread | View::Settings => {}
        }
    }

    /// Context-sensitive submit: settings add form or import path prompt
    fn submit_input(&mut self) {
        if let ModalState::ImportPath { input } = &self.state.modal {
            let path = crate::config::expand_home(std::path::Path::new(input.trim()));
            self.state.modal = ModalState::None;
            self.import_ignore_file(&path);
        } else if self.state.view == View::Settings {
            self.add_ignore_entry();
        }
    }

    fn refresh_view(&mut self) {
        match self.state.view {
            View::Home if self.state.is_searching() => {
                self.state.set_status("Edit the query to search again");
            }
            View::Home => {
                self.reload_listing();
                self.refresh_stats();
            }
            View::Thread => self.reload_thread(),
            View::Settings => {
                let cmd = self.state.ignore.list();
                self.dispatch(cmd);
            }
        }
    }

    fn toggle_help(&mut self) {
        use crate::command::available_commands;

        if self.state.modal.is_help() {
            self.state.modal = ModalState::None;
        } else if !self.state.modal.is_active() {
            self.state.modal = ModalState::Help {
                keybindings: self.bindings.all_bindings(),
                commands: available_commands(),
                scroll: 0,
            };
        }
    }

    pub(crate) fn help_scroll_down(&mut self) {
        if let ModalState::Help {
            scroll,
            keybindings,
            commands,
        } = &mut self.state.modal
        {
            // Each keybinding is 1 line, plus category headers (2 lines each)
            // Commands section has 1 header + entries
            let mut categories = 0;
            let mut last_category = "";
            for kb in keybindings.iter() {
                if kb.category != last_category {
                    categories += 1;
                    last_category = kb.category;
                }
            }
            let content_lines = keybindings.len() + categories * 2 + commands.len() + 2;
            let max_scroll = content_lines.saturating_sub(10); // Approx visible area

            if *scroll < max_scroll {
                *scroll = scroll.saturating_add(1);
            }
        }
    }

    pub(crate) fn help_scroll_up(&mut self) {
        if let ModalState::Help { scroll, .. } = &mut self.state.modal {
            *scroll = scroll.saturating_sub(1);
        }
    }
}
