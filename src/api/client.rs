//! PastLead REST API client

use anyhow::Context;
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::{ApiError, Result};
use super::types::{
    AiAnalysis, Contact, IgnoreEntry, IgnoreId, IgnoreItem, ImportRequest, ImportSummary,
    Message, SearchHit, Stats, ThreadId,
};
use crate::config::ApiConfig;

/// Thin typed wrapper over the remote collaborator's endpoints
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.get_json("/stats", &[]).await
    }

    pub async fn contacts(&self, limit: usize, offset: usize) -> Result<Vec<Contact>> {
        self.get_json(
            "/contacts",
            &[("limit", limit.to_string()), ("offset", offset.to_string())],
        )
        .await
    }

    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>> {
        self.get_json(
            "/search",
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn thread_messages(&self, thread_id: ThreadId) -> Result<Vec<Message>> {
        self.get_json(&format!("/threads/{}/messages", thread_id), &[])
            .await
    }

    pub async fn thread_summary(&self, thread_id: ThreadId) -> Result<AiAnalysis> {
        self.get_json(&format!("/threads/{}/summary", thread_id), &[])
            .await
    }

    pub async fn ignore_list(&self) -> Result<Vec<IgnoreItem>> {
        self.get_json("/settings/ignore", &[]).await
    }

    /// Add one rule. A duplicate value comes back as [`ApiError::Rejected`].
    pub async fn add_ignore(&self, entry: &IgnoreEntry) -> Result<IgnoreItem> {
        self.post_json("/settings/ignore", entry).await
    }

    pub async fn remove_ignore(&self, id: IgnoreId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/settings/ignore/{}", id)))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Import a batch in one call; the server decides what counts as a duplicate
    pub async fn import_ignore(&self, items: &[IgnoreEntry]) -> Result<ImportSummary> {
        self.post_json("/settings/ignore/import", &ImportRequest { items })
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.client.get(self.url(path)).query(query).send().await?;
        decode(check_status(response).await?).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        tracing::debug!(path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(check_status(response).await?).await
    }
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(ApiError::Rejected {
        status: status.as_u16(),
        detail: rejection_detail(&text),
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// FastAPI-style `{"detail": "..."}` bodies carry the reason; fall back to raw text
fn rejection_detail(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(
            endpoint("http://localhost:8000/", "/settings/ignore"),
            "http://localhost:8000/settings/ignore"
        );
        assert_eq!(
            endpoint("http://api.local/v1", "threads/4/summary"),
            "http://api.local/v1/threads/4/summary"
        );
    }

    #[test]
    fn test_rejection_detail() {
        assert_eq!(
            rejection_detail(r#"{"detail": "Item already exists"}"#),
            "Item already exists"
        );
        assert_eq!(rejection_detail("  Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_client_trims_base_url() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/stats"), "http://localhost:8000/stats");
    }
}
