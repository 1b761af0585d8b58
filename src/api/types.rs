//! Wire types for the PastLead REST API

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub type ThreadId = i64;
pub type ContactId = i64;
pub type IgnoreId = i64;

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Totals reported by `GET /stats`. The message count is not used by the client.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Stats {
    pub contacts: u64,
}

/// A counterpart aggregated across threads, ranked by its best thread score.
///
/// `email` is the identity ignore rules match against; `id` only keys the UI.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub max_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thread_count: u32,
    #[serde(default)]
    pub last_active: Option<String>,
    #[serde(default)]
    pub first_active: Option<String>,
    #[serde(default)]
    pub top_thread_title: Option<String>,
    /// Most recent threads, bounded by the server
    #[serde(default, deserialize_with = "null_as_default")]
    pub threads: Vec<ThreadStub>,
}

impl Contact {
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    /// Domain part of the address, if it has one
    pub fn domain(&self) -> Option<&str> {
        self.email
            .split_once('@')
            .map(|(_, domain)| domain)
            .filter(|d| !d.is_empty())
    }
}

/// Read-only thread summary embedded in a contact
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadStub {
    pub id: ThreadId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_message_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_count: u32,
}

/// Raw row from `GET /search`. The same thread can appear once per matching message.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub thread_id: ThreadId,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

/// Deduplicated search result shown in the search view
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadSearchResult {
    pub id: ThreadId,
    pub subject: String,
    pub sender: String,
    pub date: String,
    pub body: String,
    pub score: Option<f64>,
    /// Position of the first hit for this thread in the server response
    pub original_index: usize,
}

impl ThreadSearchResult {
    pub fn from_hit(hit: SearchHit, original_index: usize) -> Self {
        Self {
            id: hit.thread_id,
            subject: hit
                .subject
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "(No Subject)".to_string()),
            sender: hit
                .sender
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "Unknown".to_string()),
            date: hit.date.unwrap_or_default(),
            body: hit.body.unwrap_or_default(),
            score: hit.score,
            original_index,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender_name: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

impl Message {
    pub fn initial(&self) -> char {
        self.sender_name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('?')
    }
}

/// AI analysis of a thread. A thread without messages only yields `summary` and `status`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AiAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub next_action: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub key_person: String,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IgnoreKind {
    Email,
    #[default]
    Domain,
}

impl IgnoreKind {
    pub fn toggle(self) -> Self {
        match self {
            Self::Email => Self::Domain,
            Self::Domain => Self::Email,
        }
    }
}

impl fmt::Display for IgnoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Domain => f.write_str("domain"),
        }
    }
}

/// Stored suppression rule, as listed by `GET /settings/ignore`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IgnoreItem {
    pub id: IgnoreId,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: IgnoreKind,
}

impl IgnoreItem {
    pub fn entry(&self) -> IgnoreEntry {
        IgnoreEntry::new(self.value.clone(), self.kind)
    }
}

/// A rule without an id: request body for add and import
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IgnoreEntry {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: IgnoreKind,
}

impl IgnoreEntry {
    pub fn new(value: impl Into<String>, kind: IgnoreKind) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new(value, IgnoreKind::Email)
    }

    pub fn domain(value: impl Into<String>) -> Self {
        Self::new(value, IgnoreKind::Domain)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ImportRequest<'a> {
    pub items: &'a [IgnoreEntry],
}

/// Server-side dedup verdict for a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ImportSummary {
    pub added: u32,
    pub skipped: u32,
}
