//! Settings-panel ignore list: fetched on open, discarded on close.
//!
//! Methods hand back the [`ApiCommand`] to dispatch; completion events are
//! applied with the matching `apply_*` method.

use super::IgnoreOrigin;
use crate::api::types::{IgnoreEntry, IgnoreId, IgnoreItem, IgnoreKind, ImportSummary};
use crate::api::{ApiCommand, ApiError};

#[derive(Debug, Clone, Default)]
pub struct IgnoreListStore {
    items: Vec<IgnoreItem>,
    input: String,
    kind: IgnoreKind,
    selected: usize,
    /// Entry awaiting y/n confirmation before it is deleted
    pending_removal: Option<IgnoreItem>,
    loading: bool,
    /// A mutation is in flight
    busy: bool,
}

impl IgnoreListStore {
    pub fn items(&self) -> &[IgnoreItem] {
        &self.items
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn kind(&self) -> IgnoreKind {
        self.kind
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&IgnoreItem> {
        self.items.get(self.selected)
    }

    pub fn pending_removal(&self) -> Option<&IgnoreItem> {
        self.pending_removal.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Fresh state plus a list fetch
    pub fn open(&mut self) -> ApiCommand {
        *self = Self::default();
        self.list()
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn list(&mut self) -> ApiCommand {
        self.loading = true;
        ApiCommand::ListIgnore
    }

    pub fn apply_list(
        &mut self,
        result: Result<Vec<IgnoreItem>, ApiError>,
    ) -> Result<(), ApiError> {
        self.loading = false;
        let items =
            result.inspect_err(|e| tracing::error!("Failed to load ignore list: {}", e))?;
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        Ok(())
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggle();
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Add the trimmed input as a rule of the selected kind. Blank input does nothing.
    pub fn add(&mut self) -> Option<ApiCommand> {
        let value = self.input.trim();
        if value.is_empty() || self.busy {
            return None;
        }
        self.busy = true;
        Some(ApiCommand::AddIgnore {
            entry: IgnoreEntry::new(value, self.kind),
            origin: IgnoreOrigin::Settings,
        })
    }

    /// On success the input is cleared and the list refetched.
    /// A rejection (duplicate) leaves everything, including the input, as it was.
    pub fn apply_added(
        &mut self,
        result: Result<IgnoreItem, ApiError>,
    ) -> Result<ApiCommand, ApiError> {
        self.busy = false;
        let item = result.inspect_err(|e| tracing::warn!("Failed to add ignore entry: {}", e))?;
        tracing::info!(value = %item.value, kind = %item.kind, "Ignore entry added");
        self.input.clear();
        Ok(self.list())
    }

    /// Ask for confirmation on the selected entry
    pub fn request_removal(&mut self) -> Option<&IgnoreItem> {
        if self.busy {
            return None;
        }
        self.pending_removal = self.selected_item().cloned();
        self.pending_removal.as_ref()
    }

    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    pub fn confirm_removal(&mut self) -> Option<ApiCommand> {
        let item = self.pending_removal.take()?;
        self.busy = true;
        Some(ApiCommand::RemoveIgnore { id: item.id })
    }

    pub fn apply_removed(
        &mut self,
        id: IgnoreId,
        result: Result<(), ApiError>,
    ) -> Result<ApiCommand, ApiError> {
        self.busy = false;
        result.inspect_err(|e| tracing::warn!(id, "Failed to remove ignore entry: {}", e))?;
        tracing::info!(id, "Ignore entry removed");
        Ok(self.list())
    }

    /// Clear the flag set for a command that could not be queued
    pub fn abandon(&mut self, cmd: &ApiCommand) {
        match cmd {
            ApiCommand::ListIgnore => self.loading = false,
            ApiCommand::AddIgnore {
                origin: IgnoreOrigin::Settings,
                ..
            }
            | ApiCommand::RemoveIgnore { .. }
            | ApiCommand::ImportIgnore { .. } => self.busy = false,
            _ => {}
        }
    }

    /// Send the whole parsed batch in one call
    pub fn bulk_import(&mut self, items: Vec<IgnoreEntry>) -> ApiCommand {
        self.busy = true;
        ApiCommand::ImportIgnore { items }
    }

    /// The server's counts are returned as-is, along with the list refresh
    pub fn apply_imported(
        &mut self,
        result: Result<ImportSummary, ApiError>,
    ) -> Result<(ImportSummary, ApiCommand), ApiError> {
        self.busy = false;
        let summary = result.inspect_err(|e| tracing::warn!("Import failed: {}", e))?;
        tracing::info!(added = summary.added, skipped = summary.skipped, "Ignore list imported");
        Ok((summary, self.list()))
    }
}
