use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::SearchError;

const BASE_URL: &str = "https://api.exa.ai";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const PROFILE_RESULTS: u32 = 3;

#[derive(Debug, Serialize)]
struct ExaSearchRequest {
    query: String,
    #[serde(rename = "numResults")]
    num_results: u32,
    contents: ExaContents,
}

#[derive(Debug, Serialize)]
struct ExaContents {
    text: bool,
}

#[derive(Debug, Deserialize)]
struct ExaSearchResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
struct ExaResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    text: Option<String>,
}

/// Executive-profile search backed by the Exa search API.
///
/// Optional capability: constructed only when an Exa API key is
/// configured; the executive research source falls back to plain web
/// search otherwise.
pub struct ExaClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ExaClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
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

    /// Search for a person's professional profile and return the
    /// concatenated result texts.
    pub async fn search_profile(
        &self,
        person: &str,
        company: &str,
    ) -> Result<String, SearchError> {
        let query = format!(
            "{person} {company} LinkedIn profile work history interviews talks"
        );
        debug!(%person, %company, "Running profile search");

        let request = ExaSearchRequest {
            query,
            num_results: PROFILE_RESULTS,
            contents: ExaContents { text: true },
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .timeout(self.timeout)
            .header("x-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Profile search request failed");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ExaSearchResponse = response.json().await?;
        let profile = body
            .results
            .into_iter()
            .filter_map(|result| {
                let text = result.text?;
                let title = result.title.unwrap_or_else(|| result.url.clone());
                Some(format!("## {title}\n{text}"))
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        if profile.trim().is_empty() {
            return Err(SearchError::NoResults);
        }

        debug!(profile_length = profile.len(), "Profile search completed");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_deserialization() {
        let json = r#"{
            "results": [
                {"title": "Carlos Selonke", "url": "https://linkedin.com/in/carlos", "text": "Engineering leader at Revolut"}
            ]
        }"#;
        let body: ExaSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.results.len(), 1);
        assert_eq!(
            body.results[0].text.as_deref(),
            Some("Engineering leader at Revolut")
        );
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let request = ExaSearchRequest {
            query: "q".to_string(),
            num_results: 3,
            contents: ExaContents { text: true },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["numResults"], 3);
    }
}
