use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("completion request timed out")]
    Timeout,

    #[error("rate limited by the completion service")]
    RateLimited,

    #[error("completion API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("completion response contained no candidate text")]
    EmptyResponse,

    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(err.to_string())
        }
    }
}
