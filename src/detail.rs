//! Thread detail: messages plus AI analysis, fetched once per thread id

use crate::api::types::{AiAnalysis, Message, ThreadId};
use crate::api::{ApiCommand, ApiError};

#[derive(Debug, Clone, Default)]
pub struct ThreadDetail {
    /// Last id both fetches were issued for. Cleared only by [`ThreadDetail::reload`].
    fetched: Option<ThreadId>,
    title: String,
    messages: Vec<Message>,
    analysis: Option<AiAnalysis>,
    messages_loading: bool,
    analysis_loading: bool,
    pub scroll: u16,
}

impl ThreadDetail {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn analysis(&self) -> Option<&AiAnalysis> {
        self.analysis.as_ref()
    }

    pub fn messages_loading(&self) -> bool {
        self.messages_loading
    }

    pub fn analysis_loading(&self) -> bool {
        self.analysis_loading
    }

    /// Show `thread_id`. Returns the fetch to dispatch, or `None` when this id
    /// was already fetched and its state is kept as is.
    pub fn enter(&mut self, thread_id: ThreadId, title: impl Into<String>) -> Option<ApiCommand> {
        if self.fetched == Some(thread_id) {
            return None;
        }
        tracing::debug!(thread_id, "Opening thread");
        *self = Self {
            fetched: Some(thread_id),
            title: title.into(),
            messages_loading: true,
            analysis_loading: true,
            ..Self::default()
        };
        Some(ApiCommand::OpenThread { thread_id })
    }

    /// Refetch the current thread
    pub fn reload(&mut self) -> Option<ApiCommand> {
        let thread_id = self.fetched.take()?;
        let title = std::mem::take(&mut self.title);
        self.enter(thread_id, title)
    }

    /// The fetch was never queued. The thread stays current so a reload retries it.
    pub fn abandon(&mut self, thread_id: ThreadId) {
        if self.fetched == Some(thread_id) {
            self.messages_loading = false;
            self.analysis_loading = false;
        }
    }

    pub fn apply_messages(
        &mut self,
        thread_id: ThreadId,
        result: Result<Vec<Message>, ApiError>,
    ) -> Result<bool, ApiError> {
        if self.fetched != Some(thread_id) {
            tracing::debug!(thread_id, "Dropping messages for a thread no longer shown");
            return Ok(false);
        }
        self.messages_loading = false;
        let messages =
            result.inspect_err(|e| tracing::error!(thread_id, "Failed to load messages: {}", e))?;
        self.messages = messages;
        Ok(true)
    }

    pub fn apply_analysis(
        &mut self,
        thread_id: ThreadId,
        result: Result<AiAnalysis, ApiError>,
    ) -> Result<bool, ApiError> {
        if self.fetched != Some(thread_id) {
            tracing::debug!(thread_id, "Dropping analysis for a thread no longer shown");
            return Ok(false);
        }
        self.analysis_loading = false;
        let analysis =
            result.inspect_err(|e| tracing::error!(thread_id, "AI analysis failed: {}", e))?;
        self.analysis = Some(analysis);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> Message {
        Message {
            sender_name: "Me".to_string(),
            date: None,
            body: Some("hi".to_string()),
        }
    }

    fn analysis(summary: &str) -> AiAnalysis {
        AiAnalysis {
            summary: summary.to_string(),
            ..AiAnalysis::default()
        }
    }

    #[test]
    fn test_same_id_fetches_once() {
        let mut detail = ThreadDetail::default();
        assert!(matches!(
            detail.enter(4, "Quote"),
            Some(ApiCommand::OpenThread { thread_id: 4 })
        ));
        detail.apply_messages(4, Ok(vec![message()])).unwrap();

        assert!(detail.enter(4, "Quote").is_none());
        assert!(detail.enter(4, "Quote").is_none());
        assert_eq!(detail.messages().len(), 1);
    }

    #[test]
    fn test_new_id_resets_state_first() {
        let mut detail = ThreadDetail::default();
        detail.enter(4, "Quote");
        detail.apply_messages(4, Ok(vec![message()])).unwrap();
        detail.apply_analysis(4, Ok(analysis("old"))).unwrap();

        assert!(detail.enter(5, "Invoice").is_some());
        assert!(detail.messages().is_empty());
        assert!(detail.analysis().is_none());
        assert!(detail.messages_loading());
        assert!(detail.analysis_loading());
        assert_eq!(detail.title(), "Invoice");
    }

    #[test]
    fn test_late_response_for_previous_thread_dropped() {
        let mut detail = ThreadDetail::default();
        detail.enter(4, "Quote");
        detail.enter(5, "Invoice");

        assert!(!detail.apply_messages(4, Ok(vec![message()])).unwrap());
        assert!(!detail.apply_analysis(4, Ok(analysis("stale"))).unwrap());
        assert!(detail.messages().is_empty());
        assert!(detail.messages_loading());
    }

    #[test]
    fn test_loading_flags_are_independent() {
        let mut detail = ThreadDetail::default();
        detail.enter(4, "Quote");

        detail.apply_analysis(4, Ok(analysis("done"))).unwrap();
        assert!(!detail.analysis_loading());
        assert!(detail.messages_loading());

        let result = detail.apply_messages(4, Err(ApiError::Decode("bad".to_string())));
        assert!(result.is_err());
        assert!(!detail.messages_loading());
        assert_eq!(detail.analysis().map(|a| a.summary.as_str()), Some("done"));
    }

    #[test]
    fn test_reload_refetches_same_thread() {
        let mut detail = ThreadDetail::default();
        assert!(detail.reload().is_none());

        detail.enter(4, "Quote");
        detail.apply_messages(4, Ok(vec![message()])).unwrap();

        assert!(matches!(
            detail.reload(),
            Some(ApiCommand::OpenThread { thread_id: 4 })
        ));
        assert!(detail.messages().is_empty());
        assert_eq!(detail.title(), "Quote");
    }
}
