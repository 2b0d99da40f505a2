use prospect_core::RunStatus;
use thiserror::Error;

use crate::stages::Stage;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid run status transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("all research sources failed, nothing to work with")]
    AllSourcesFailed,

    #[error("{stage} stage failed: {reason}")]
    StageFailed { stage: Stage, reason: String },

    #[error("pipeline run was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Create a stage failure error.
    pub fn stage_failed(stage: Stage, reason: impl Into<String>) -> Self {
        Self::StageFailed {
            stage,
            reason: reason.into(),
        }
    }

    /// The terminal run status a failed pipeline ends in.
    pub fn terminal_status(&self) -> RunStatus {
        match self {
            PipelineError::Cancelled => RunStatus::Cancelled,
            _ => RunStatus::Failed,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
