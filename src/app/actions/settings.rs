//! Ignore list panel actions

use std::path::{Path, PathBuf};

use crate::api::ApiCommand;
use crate::api::types::IgnoreItem;
use crate::app::state::{ModalState, SettingsFocus, View};
use crate::config::expand_home;
use crate::ignore::{self, ImportError};

use super::super::App;

impl App {
    pub(crate) fn open_settings(&mut self) {
        self.state.view = View::Settings;
        self.state.modal = ModalState::None;
        self.state.settings_focus = SettingsFocus::List;
        let cmd = self.state.ignore.open();
        self.dispatch(cmd);
    }

    /// Discard the ignore collection and start the listing over
    pub(crate) fn close_settings(&mut self) {
        self.go_home();
    }

    pub(super) fn add_ignore_entry(&mut self) {
        if let Some(cmd) = self.state.ignore.add() {
            self.dispatch(cmd);
        }
    }

    pub(super) fn request_removal(&mut self) {
        if self.state.view == View::Settings {
            self.state.ignore.request_removal();
        }
    }

    pub(super) fn confirm_removal(&mut self) {
        if let Some(cmd) = self.state.ignore.confirm_removal() {
            self.dispatch(cmd);
        }
    }

    /// Export to `dir` (or the configured directory). Outside the panel the
    /// list is fetched first and written when it arrives.
    pub(crate) fn export_ignore_list(&mut self, dir: Option<PathBuf>) {
        let dir = match dir {
            Some(dir) => expand_home(&dir),
            None => self.config.export.resolve_directory(),
        };

        if self.state.view == View::Settings && !self.state.ignore.is_loading() {
            let items = self.state.ignore.items().to_vec();
            self.write_export(&dir, &items);
        } else {
            self.pending_export = Some(dir);
            self.dispatch(ApiCommand::ListIgnore);
        }
    }

    pub(crate) fn write_export(&mut self, dir: &Path, items: &[IgnoreItem]) {
        match ignore::write_export(dir, items) {
            Ok(Some(path)) => {
                self.state.set_status(format!(
                    "Exported {} entries to {}",
                    items.len(),
                    path.display()
                ));
            }
            Ok(None) => self.state.show_notice("Export", "Nothing to export"),
            Err(e) => {
                tracing::error!("Export failed: {:#}", e);
                self.state.set_error(format!("{:#}", e));
            }
        }
    }

    /// Parse the file and send the whole batch. An empty batch never reaches the server.
    pub(crate) fn import_ignore_file(&mut self, path: &Path) {
        let entries = match ignore::read_import(path) {
            Ok(entries) => entries,
            Err(e) => {
                if let Some(import_err) = e.downcast_ref::<ImportError>() {
                    self.state.show_notice("Import", import_err.to_string());
                } else {
                    tracing::error!("Import failed: {:#}", e);
                    self.state.set_error(format!("{:#}", e));
                }
                return;
            }
        };

        self.state
            .set_status(format!("Importing {} entries...", entries.len()));
        let cmd = self.state.ignore.bulk_import(entries);
        self.dispatch(cmd);
    }
}
