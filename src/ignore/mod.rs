//! Ignore-list import/export and the settings-panel store

pub mod codec;
mod store;

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::types::{IgnoreEntry, IgnoreItem};

pub use codec::ImportError;
pub use store::IgnoreListStore;

/// Where an add was issued from; decides how the result is surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreOrigin {
    Settings,
    /// Inline ignore of a contact on the home listing
    Listing,
}

/// Write `items` to a timestamped file in `dir`.
/// Returns `None` without touching the filesystem when there is nothing to export.
pub fn write_export(dir: &Path, items: &[IgnoreItem]) -> Result<Option<PathBuf>> {
    if items.is_empty() {
        return Ok(None);
    }

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory: {}", dir.display()))?;
    let path = dir.join(codec::export_filename(Local::now()));
    fs::write(&path, codec::export(items))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), count = items.len(), "Exported ignore list");
    Ok(Some(path))
}

/// Read and parse an exported file. An empty batch is an error.
pub fn read_import(path: &Path) -> Result<Vec<IgnoreEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let entries = codec::parse(&text)?;
    tracing::debug!(path = %path.display(), count = entries.len(), "Parsed import file");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::IgnoreKind;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pastlead-{}-{}", name, std::process::id()));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_export_then_import_file() {
        let dir = scratch_dir("roundtrip");
        let items = vec![
            IgnoreItem {
                id: 1,
                value: "a.com".to_string(),
                kind: IgnoreKind::Domain,
            },
            IgnoreItem {
                id: 2,
                value: "b@x.com".to_string(),
                kind: IgnoreKind::Email,
            },
        ];

        let path = write_export(&dir, &items).unwrap().unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("IgnoredContacts_"));
        assert!(name.ends_with(".txt"));

        let entries = read_import(&path).unwrap();
        assert_eq!(
            entries,
            vec![IgnoreEntry::domain("a.com"), IgnoreEntry::email("b@x.com")]
        );

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_empty_export_writes_nothing() {
        let dir = scratch_dir("empty");
        assert!(write_export(&dir, &[]).unwrap().is_none());
        assert!(!dir.exists());
    }

    #[test]
    fn test_import_without_entries_fails() {
        let dir = scratch_dir("noentries");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("list.txt");
        fs::write(&path, "PastLead Ignored Contacts\n===\n").unwrap();

        let err = read_import(&path).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ImportError>(),
            Some(&ImportError::NoEntries)
        );

        fs::remove_dir_all(&dir).ok();
    }
}
