//! Narrow trait seams over the external collaborators.
//!
//! The pipeline only ever talks to the outside world through these four
//! traits. Tests substitute in-memory mocks; production wires in the
//! concrete `llm`/`search` clients via the impls below.

use async_trait::async_trait;
use llm::{GeminiClient, LlmError};
use search::{ExaClient, PageFetcher, SearchError, SearchHit, WebSearchClient};

/// `complete(prompt) -> text`
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

/// `search(query) -> list of (title, snippet, url)`
#[async_trait]
pub trait WebSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError>;
}

/// `search_profile(person, company) -> profile text`
#[async_trait]
pub trait ProfileSearch: Send + Sync {
    async fn search_profile(&self, person: &str, company: &str) -> Result<String, SearchError>;
}

/// `fetch_page(url) -> text`
#[async_trait]
pub trait PageFetch: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<String, SearchError>;
}

#[async_trait]
impl CompletionModel for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        GeminiClient::complete(self, prompt).await
    }
}

#[async_trait]
impl WebSearch for WebSearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>, SearchError> {
        WebSearchClient::search(self, query).await
    }
}

#[async_trait]
impl ProfileSearch for ExaClient {
    async fn search_profile(&self, person: &str, company: &str) -> Result<String, SearchError> {
        ExaClient::search_profile(self, person, company).await
    }
}

#[async_trait]
impl PageFetch for PageFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, SearchError> {
        PageFetcher::fetch_page(self, url).await
    }
}
