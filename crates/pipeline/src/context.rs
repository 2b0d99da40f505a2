use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use events::{EventBus, EventEnvelope, PipelineEvent, ToolCallData};
use prospect_core::{ResearchRun, RunStatus};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::Result;
use crate::state_machine::RunStateMachine;
use crate::tools::{CompletionModel, PageFetch, ProfileSearch, WebSearch};

/// Case-study library inlined into the strategy prompt when reachable.
pub const DEFAULT_KNOWLEDGE_BASE_URL: &str =
    "https://cloud.google.com/transform/101-real-world-generative-ai-use-cases-from-industry-leaders";

const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(45);

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on each research task, so the research barrier cannot
    /// hang on a stuck source.
    pub task_timeout: Duration,
    /// Case-study page fetched into the strategy prompt; fetch failures
    /// are tolerated.
    pub knowledge_base_url: Option<String>,
    /// Where the final report is written. `None` skips persistence.
    pub output_path: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            task_timeout: DEFAULT_TASK_TIMEOUT,
            knowledge_base_url: None,
            output_path: None,
        }
    }
}

impl PipelineConfig {
    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }

    pub fn with_knowledge_base_url(mut self, url: impl Into<String>) -> Self {
        self.knowledge_base_url = Some(url.into());
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Shared dependencies handed to every stage: the tool seams, the event
/// bus, the cancellation token, and the run configuration.
pub struct StageContext {
    pub config: PipelineConfig,
    pub llm: Arc<dyn CompletionModel>,
    pub web_search: Arc<dyn WebSearch>,
    pub profile_search: Option<Arc<dyn ProfileSearch>>,
    pub page_fetch: Option<Arc<dyn PageFetch>>,
    pub event_bus: Option<EventBus>,
    pub cancel: CancellationToken,
}

impl StageContext {
    pub fn new(
        llm: Arc<dyn CompletionModel>,
        web_search: Arc<dyn WebSearch>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            config,
            llm,
            web_search,
            profile_search: None,
            page_fetch: None,
            event_bus: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_profile_search(mut self, client: Arc<dyn ProfileSearch>) -> Self {
        self.profile_search = Some(client);
        self
    }

    pub fn with_page_fetch(mut self, client: Arc<dyn PageFetch>) -> Self {
        self.page_fetch = Some(client);
        self
    }

    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.event_bus = Some(bus);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Validated run status transition, with an event on success.
    pub fn transition(&self, run: &mut ResearchRun, to: RunStatus) -> Result<()> {
        let from = run.status;
        info!(
            from = %from.as_str(),
            to = %to.as_str(),
            "Run status transition"
        );

        RunStateMachine::validate_transition(&run.status, &to)?;
        run.status = to;
        run.updated_at = chrono::Utc::now();

        self.emit_event(PipelineEvent::RunStatusChanged {
            run_id: run.id,
            from_status: from.as_str().to_string(),
            to_status: to.as_str().to_string(),
        });

        debug!(
            run_id = %run.id,
            new_status = %to.as_str(),
            "Status transition completed"
        );

        Ok(())
    }

    pub fn emit_event(&self, event: PipelineEvent) {
        if let Some(ref bus) = self.event_bus {
            bus.publish(EventEnvelope::new(event));
        }
    }

    pub fn emit_tool_invoked(&self, run_id: Uuid, name: &str, caller: &str, input: Option<String>) {
        self.emit_event(PipelineEvent::ToolInvoked {
            run_id,
            tool: ToolCallData {
                name: name.to_string(),
                caller: caller.to_string(),
                input,
            },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockModel, MockWebSearch};
    use prospect_core::QueryContext;

    fn context() -> StageContext {
        StageContext::new(
            Arc::new(MockModel::returning("ok")),
            Arc::new(MockWebSearch::empty()),
            PipelineConfig::default(),
        )
    }

    #[test]
    fn test_transition_updates_status_and_timestamp() {
        let ctx = context();
        let mut run = ResearchRun::new(QueryContext::new("Carlos", "Revolut"));
        let before = run.updated_at;

        ctx.transition(&mut run, RunStatus::Researching).unwrap();

        assert_eq!(run.status, RunStatus::Researching);
        assert!(run.updated_at >= before);
    }

    #[test]
    fn test_invalid_transition_rejected() {
        let ctx = context();
        let mut run = ResearchRun::new(QueryContext::new("Carlos", "Revolut"));

        let err = ctx.transition(&mut run, RunStatus::Done).unwrap_err();
        assert!(err.to_string().contains("init"));
        assert_eq!(run.status, RunStatus::Init);
    }

    #[test]
    fn test_transition_emits_event() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let ctx = context().with_event_bus(bus);
        let mut run = ResearchRun::new(QueryContext::new("Carlos", "Revolut"));

        ctx.transition(&mut run, RunStatus::Researching).unwrap();

        let envelope = rx.try_recv().unwrap();
        match envelope.event {
            PipelineEvent::RunStatusChanged {
                from_status,
                to_status,
                ..
            } => {
                assert_eq!(from_status, "init");
                assert_eq!(to_status, "researching");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
