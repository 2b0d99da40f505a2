use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search request timed out")]
    Timeout,

    #[error("search API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("search returned no results")]
    NoResults,

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SearchError::Timeout
        } else {
            SearchError::Http(err.to_string())
        }
    }
}
