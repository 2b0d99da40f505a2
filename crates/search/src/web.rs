use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, error};

use crate::error::SearchError;

const BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const MAX_RESULTS: usize = 8;

/// One result row from a web search.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    link: String,
}

/// Web/news search backed by the Google Programmable Search JSON API.
pub struct WebSearchClient {
    http: reqwest::Client,
    api_key: String,
    engine_id: String,
    base_url: String,
    timeout: Duration,
}

impl WebSearchClient {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the API endpoint. Used by tests against a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        debug!(%query, "Running web search");

        let response = self
            .http
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Web search request failed");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CustomSearchResponse = response.json().await?;
        let hits: Vec<SearchHit> = body
            .items
            .into_iter()
            .take(MAX_RESULTS)
            .map(|item| SearchHit {
                title: item.title,
                snippet: item.snippet,
                url: item.link,
            })
            .collect();

        if hits.is_empty() {
            return Err(SearchError::NoResults);
        }

        debug!(hit_count = hits.len(), "Web search completed");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "items": [
                {"title": "Revolut launches", "snippet": "Fintech news...", "link": "https://example.com/a"},
                {"title": "Funding round", "snippet": "Series H...", "link": "https://example.com/b"}
            ]
        }"#;
        let body: CustomSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.items.len(), 2);
        assert_eq!(body.items[0].link, "https://example.com/a");
    }

    #[test]
    fn test_empty_response_deserialization() {
        let body: CustomSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }
}
