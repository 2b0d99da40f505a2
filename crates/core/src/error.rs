use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Run not found: {0}")]
    RunNotFound(Uuid),

    #[error("Invalid run status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    #[error("Unknown research topic: {0}")]
    UnknownTopic(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let id = Uuid::new_v4();
        let error = CoreError::RunNotFound(id);
        assert!(error.to_string().contains(&id.to_string()));
    }
}
