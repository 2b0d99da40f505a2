//! Event types for the pipeline event system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope wrapping all events with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: PipelineEvent,
}

impl EventEnvelope {
    /// Create a new event envelope with auto-generated ID and timestamp
    pub fn new(event: PipelineEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// All observable events emitted by a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A pipeline run was started
    #[serde(rename = "run.started")]
    RunStarted {
        run_id: Uuid,
        prospect_name: String,
        company_name: String,
    },

    /// Run status changed
    #[serde(rename = "run.status_changed")]
    RunStatusChanged {
        run_id: Uuid,
        from_status: String,
        to_status: String,
    },

    /// Run reached a terminal state
    #[serde(rename = "run.finished")]
    RunFinished {
        run_id: Uuid,
        status: String,
        duration_ms: u64,
    },

    /// A research task started for a topic
    #[serde(rename = "research.started")]
    ResearchStarted { run_id: Uuid, topic: String },

    /// A research task finished (successfully or not)
    #[serde(rename = "research.finished")]
    ResearchFinished {
        run_id: Uuid,
        topic: String,
        success: bool,
        duration_ms: u64,
        /// Condensed finding text, for intermediate-output logging
        summary: Option<String>,
    },

    /// A sequential stage started
    #[serde(rename = "stage.started")]
    StageStarted { run_id: Uuid, stage: String },

    /// A sequential stage finished
    #[serde(rename = "stage.finished")]
    StageFinished {
        run_id: Uuid,
        stage: String,
        success: bool,
        duration_ms: u64,
        /// Condensed stage output, for intermediate-output logging
        summary: Option<String>,
    },

    /// An external tool was invoked by a task or stage
    #[serde(rename = "tool.invoked")]
    ToolInvoked {
        run_id: Uuid,
        tool: ToolCallData,
    },

    /// The final report was written to disk
    #[serde(rename = "report.saved")]
    ReportSaved { run_id: Uuid, path: String },

    /// Generic error event
    #[serde(rename = "error")]
    Error {
        message: String,
        context: Option<String>,
    },
}

/// Data for tool invocation events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallData {
    /// Tool name (e.g. "web_search", "profile_search", "page_fetch", "llm")
    pub name: String,
    /// Which part of the pipeline invoked the tool
    pub caller: String,
    /// Query or input summary (truncated if large)
    pub input: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_has_unique_ids() {
        let event = PipelineEvent::Error {
            message: "boom".to_string(),
            context: None,
        };
        let a = EventEnvelope::new(event.clone());
        let b = EventEnvelope::new(event);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_event_serialization_tags() {
        let event = PipelineEvent::ResearchStarted {
            run_id: Uuid::new_v4(),
            topic: "news".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "research.started");
        assert_eq!(json["topic"], "news");
    }

    #[test]
    fn test_stage_finished_roundtrip() {
        let event = PipelineEvent::StageFinished {
            run_id: Uuid::new_v4(),
            stage: "strategy".to_string(),
            success: true,
            duration_ms: 1200,
            summary: Some("positioning ready".to_string()),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PipelineEvent = serde_json::from_str(&json).unwrap();
        match back {
            PipelineEvent::StageFinished { stage, success, .. } => {
                assert_eq!(stage, "strategy");
                assert!(success);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
