//! Thread detail actions

use crate::api::types::ThreadId;
use crate::app::state::View;

use super::super::App;

impl App {
    /// Show a thread. Re-entering the thread already shown keeps what was loaded.
    pub(crate) fn open_thread(&mut self, thread_id: ThreadId, title: String) {
        self.state.view = View::Thread;
        if let Some(cmd) = self.state.detail.enter(thread_id, title) {
            self.dispatch(cmd);
        }
    }

    /// Back to the home view; listing/search selection is untouched
    pub(super) fn leave_thread(&mut self) {
        self.state.view = View::Home;
    }

    /// Refetch messages and analysis for the current thread
    pub(super) fn reload_thread(&mut self) {
        if let Some(cmd) = self.state.detail.reload() {
            self.dispatch(cmd);
        }
    }
}
