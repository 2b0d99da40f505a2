use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::context::QueryContext;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Init,
    Researching,
    Strategizing,
    Writing,
    Done,
    Failed,
    Cancelled,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Researching => "researching",
            Self::Strategizing => "strategizing",
            Self::Writing => "writing",
            Self::Done => "done",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "init" => Some(Self::Init),
            "researching" => Some(Self::Researching),
            "strategizing" => Some(Self::Strategizing),
            "writing" => Some(Self::Writing),
            "done" => Some(Self::Done),
            "failed" => Some(Self::Failed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Terminal states admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One invocation of the research pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRun {
    pub id: Uuid,
    pub context: QueryContext,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchRun {
    pub fn new(context: QueryContext) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            context,
            status: RunStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_creation() {
        let run = ResearchRun::new(QueryContext::new("Carlos", "Revolut"));

        assert_eq!(run.status, RunStatus::Init);
        assert_eq!(run.context.company_name, "Revolut");
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [
            RunStatus::Init,
            RunStatus::Researching,
            RunStatus::Strategizing,
            RunStatus::Writing,
            RunStatus::Done,
            RunStatus::Failed,
            RunStatus::Cancelled,
        ] {
            assert_eq!(RunStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(RunStatus::parse("unknown"), None);
    }

    #[test]
    fn test_terminal_states() {
        assert!(RunStatus::Done.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
        assert!(RunStatus::Cancelled.is_terminal());
        assert!(!RunStatus::Researching.is_terminal());
    }
}
