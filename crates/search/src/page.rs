use std::time::Duration;

use tracing::{debug, error};

use crate::error::SearchError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
/// Pages are inlined into prompts; cap how much of one we keep.
const MAX_PAGE_BYTES: usize = 200 * 1024;

/// Fetches a page body as text, truncated to a bounded size.
pub struct PageFetcher {
    http: reqwest::Client,
    timeout: Duration,
    max_bytes: usize,
}

impl PageFetcher {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: DEFAULT_TIMEOUT,
            max_bytes: MAX_PAGE_BYTES,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub async fn fetch_page(&self, url: &str) -> Result<String, SearchError> {
        debug!(%url, "Fetching page");

        let response = self.http.get(url).timeout(self.timeout).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!(status = status.as_u16(), %url, "Page fetch failed");
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: format!("fetch of {url} failed"),
            });
        }

        let mut text = response.text().await?;
        if text.len() > self.max_bytes {
            // Truncate on a char boundary.
            let mut cut = self.max_bytes;
            while !text.is_char_boundary(cut) {
                cut -= 1;
            }
            text.truncate(cut);
        }

        debug!(page_length = text.len(), "Page fetched");
        Ok(text)
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_builder() {
        let fetcher = PageFetcher::new()
            .with_timeout(Duration::from_secs(5))
            .with_max_bytes(1024);
        assert_eq!(fetcher.timeout, Duration::from_secs(5));
        assert_eq!(fetcher.max_bytes, 1024);
    }
}
