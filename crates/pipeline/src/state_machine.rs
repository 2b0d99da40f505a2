use prospect_core::RunStatus;

use crate::error::{PipelineError, Result};

pub struct RunStateMachine;

impl RunStateMachine {
    pub fn validate_transition(from: &RunStatus, to: &RunStatus) -> Result<()> {
        let allowed = Self::allowed_transitions(from);

        if allowed.contains(to) {
            Ok(())
        } else {
            Err(PipelineError::InvalidTransition {
                from: from.as_str().to_string(),
                to: to.as_str().to_string(),
            })
        }
    }

    fn allowed_transitions(from: &RunStatus) -> Vec<RunStatus> {
        match from {
            RunStatus::Init => vec![RunStatus::Researching, RunStatus::Cancelled],
            RunStatus::Researching => vec![
                RunStatus::Strategizing,
                RunStatus::Failed,
                RunStatus::Cancelled,
            ],
            RunStatus::Strategizing => {
                vec![RunStatus::Writing, RunStatus::Failed, RunStatus::Cancelled]
            }
            RunStatus::Writing => vec![RunStatus::Done, RunStatus::Failed, RunStatus::Cancelled],
            RunStatus::Done | RunStatus::Failed | RunStatus::Cancelled => vec![],
        }
    }

    pub fn can_transition(from: &RunStatus, to: &RunStatus) -> bool {
        Self::validate_transition(from, to).is_ok()
    }

    /// The next status on the happy path, if any.
    pub fn next_status(current: &RunStatus) -> Option<RunStatus> {
        match current {
            RunStatus::Init => Some(RunStatus::Researching),
            RunStatus::Researching => Some(RunStatus::Strategizing),
            RunStatus::Strategizing => Some(RunStatus::Writing),
            RunStatus::Writing => Some(RunStatus::Done),
            RunStatus::Done | RunStatus::Failed | RunStatus::Cancelled => None,
        }
    }
}
