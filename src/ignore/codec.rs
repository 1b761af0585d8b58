//! Plain-text export format for the ignore list.
//!
//! ```text
//! PastLead Ignored Contacts
//! =========================
//!
//! [Domains]
//! example.com
//!
//! [Emails]
//! someone@example.org
//! ```

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::api::types::{IgnoreEntry, IgnoreItem, IgnoreKind};
use crate::constants::EXPORT_FILE_PREFIX;

const PREAMBLE: &str = "PastLead Ignored Contacts";
const RULE: &str = "=========================";
const DOMAINS_HEADER: &str = "[Domains]";
const EMAILS_HEADER: &str = "[Emails]";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ImportError {
    #[error("No valid entries found in file")]
    NoEntries,
}

/// Render the list, domains first. Empty sections are omitted.
pub fn export(items: &[IgnoreItem]) -> String {
    let values = |kind: IgnoreKind| -> Vec<&str> {
        items
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.value.as_str())
            .collect()
    };
    let domains = values(IgnoreKind::Domain);
    let emails = values(IgnoreKind::Email);

    let mut out = format!("{PREAMBLE}\n{RULE}\n\n");
    if !domains.is_empty() {
        out.push_str(DOMAINS_HEADER);
        out.push('\n');
        out.push_str(&domains.join("\n"));
        out.push_str("\n\n");
    }
    if !emails.is_empty() {
        out.push_str(EMAILS_HEADER);
        out.push('\n');
        out.push_str(&emails.join("\n"));
        out.push('\n');
    }
    out
}

/// `IgnoredContacts_YYYYMMDDHHmm.txt`
pub fn export_filename(now: DateTime<Local>) -> String {
    format!("{}{}.txt", EXPORT_FILE_PREFIX, now.format("%Y%m%d%H%M"))
}

/// Parse an exported file into an import batch.
///
/// Sections may come in any order or be missing. Lines before the first
/// section header are dropped.
pub fn parse(text: &str) -> Result<Vec<IgnoreEntry>, ImportError> {
    let mut section: Option<IgnoreKind> = None;
    let mut entries = Vec::new();

    for line in text.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('=') || line.starts_with("PastLead") {
            continue;
        }
        match line {
            DOMAINS_HEADER => section = Some(IgnoreKind::Domain),
            EMAILS_HEADER => section = Some(IgnoreKind::Email),
            value => {
                if let Some(kind) = section {
                    entries.push(IgnoreEntry::new(value, kind));
                }
            }
        }
    }

    if entries.is_empty() {
        return Err(ImportError::NoEntries);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn item(id: i64, value: &str, kind: IgnoreKind) -> IgnoreItem {
        IgnoreItem {
            id,
            value: value.to_string(),
            kind,
        }
    }

    #[test]
    fn test_export_layout() {
        let text = export(&[
            item(3, "b@x.com", IgnoreKind::Email),
            item(2, "a.com", IgnoreKind::Domain),
            item(1, "c.org", IgnoreKind::Domain),
        ]);

        assert_eq!(
            text,
            "PastLead Ignored Contacts\n=========================\n\n\
             [Domains]\na.com\nc.org\n\n\
             [Emails]\nb@x.com\n"
        );
    }

    #[test]
    fn test_export_omits_empty_sections() {
        let text = export(&[item(1, "b@x.com", IgnoreKind::Email)]);
        assert!(!text.contains(DOMAINS_HEADER));
        assert!(text.ends_with("[Emails]\nb@x.com\n"));

        let text = export(&[item(1, "a.com", IgnoreKind::Domain)]);
        assert!(!text.contains(EMAILS_HEADER));
    }

    #[test]
    fn test_round_trip_preserves_pairs() {
        let items = vec![
            item(1, "a.com", IgnoreKind::Domain),
            item(2, "b@x.com", IgnoreKind::Email),
        ];
        let parsed: HashSet<IgnoreEntry> = parse(&export(&items)).unwrap().into_iter().collect();
        let expected: HashSet<IgnoreEntry> = items.iter().map(IgnoreItem::entry).collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_line_before_header_is_dropped() {
        let entries = parse("stray.com\n[Domains]\nkept.com\n").unwrap();
        assert_eq!(entries, vec![IgnoreEntry::domain("kept.com")]);
    }

    #[test]
    fn test_empty_emails_section_contributes_nothing() {
        let entries = parse("[Domains]\na.com\n\n[Emails]\n\n").unwrap();
        assert_eq!(entries, vec![IgnoreEntry::domain("a.com")]);
    }

    #[test]
    fn test_sections_in_any_order_and_trimmed() {
        let entries = parse("  [Emails]  \n  u@d.com \n[Domains]\r\nd.com\r\n").unwrap();
        assert_eq!(
            entries,
            vec![IgnoreEntry::email("u@d.com"), IgnoreEntry::domain("d.com")]
        );
    }

    #[test]
    fn test_no_entries_is_rejected() {
        assert_eq!(parse(""), Err(ImportError::NoEntries));
        assert_eq!(
            parse("PastLead Ignored Contacts\n=====\n\n[Domains]\n\n[Emails]\n"),
            Err(ImportError::NoEntries)
        );
        assert_eq!(parse("orphan@x.com\n"), Err(ImportError::NoEntries));
    }

    #[test]
    fn test_export_filename_stamp() {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(export_filename(at), "IgnoredContacts_202403070905.txt");
    }
}
