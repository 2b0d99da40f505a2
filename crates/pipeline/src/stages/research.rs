use std::sync::Arc;
use std::time::Instant;

use events::PipelineEvent;
use prospect_core::{Finding, FindingsRecord, ResearchFailure, ResearchRun, Topic, TopicOutcome};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{error, info, warn};

use crate::context::StageContext;
use crate::error::{PipelineError, Result};
use crate::sources::{default_sources, ResearchSource};
use crate::stages::truncate;

/// Phase 1: fan out one task per research source, join on all of them.
///
/// The join is a hard barrier: every launched task is observed to
/// completion (success, failure, timeout, or cooperative cancellation)
/// before the stage returns. Partial results are acceptable; the stage
/// only fails when every source fails.
pub struct ParallelResearchStage {
    sources: Vec<Arc<dyn ResearchSource>>,
}

impl ParallelResearchStage {
    pub fn new(sources: Vec<Arc<dyn ResearchSource>>) -> Self {
        Self { sources }
    }

    pub fn with_default_sources(ctx: &StageContext) -> Self {
        Self::new(default_sources(ctx))
    }

    pub async fn run(&self, ctx: &StageContext, run: &ResearchRun) -> Result<FindingsRecord> {
        info!(
            run_id = %run.id,
            source_count = self.sources.len(),
            "Starting parallel research"
        );

        let mut join_set: JoinSet<(Topic, std::result::Result<Finding, ResearchFailure>, u64)> =
            JoinSet::new();

        for source in &self.sources {
            let source = Arc::clone(source);
            let query_ctx = run.context.clone();
            let task_timeout = ctx.config.task_timeout;
            let cancel = ctx.cancel.clone();

            ctx.emit_event(PipelineEvent::ResearchStarted {
                run_id: run.id,
                topic: source.topic().as_str().to_string(),
            });

            join_set.spawn(async move {
                let topic = source.topic();
                let started = Instant::now();

                let outcome = tokio::select! {
                    _ = cancel.cancelled() => {
                        Err(ResearchFailure::unavailable("run cancelled"))
                    }
                    joined = timeout(task_timeout, source.gather(&query_ctx)) => match joined {
                        Ok(result) => result,
                        Err(_) => Err(ResearchFailure::Timeout {
                            elapsed_ms: task_timeout.as_millis() as u64,
                        }),
                    }
                };

                (topic, outcome, started.elapsed().as_millis() as u64)
            });
        }

        // The barrier: drain the join set completely before moving on.
        let mut outcomes = Vec::with_capacity(self.sources.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((topic, result, duration_ms)) => {
                    let success = result.is_ok();
                    let summary = result
                        .as_ref()
                        .ok()
                        .map(|finding| truncate(&finding.summary, 400));

                    ctx.emit_event(PipelineEvent::ResearchFinished {
                        run_id: run.id,
                        topic: topic.as_str().to_string(),
                        success,
                        duration_ms,
                        summary,
                    });

                    match result {
                        Ok(finding) => {
                            info!(topic = %topic, duration_ms, "Research task succeeded");
                            outcomes.push((topic, TopicOutcome::Found(finding)));
                        }
                        Err(failure) => {
                            warn!(topic = %topic, %failure, "Research task failed, recording gap");
                            outcomes.push((topic, TopicOutcome::Unavailable(failure)));
                        }
                    }
                }
                Err(join_err) => {
                    // A panicked task loses its topic slot; the record
                    // fills it in as unavailable.
                    error!(error = %join_err, "Research task aborted");
                }
            }
        }

        if ctx.cancel.is_cancelled() {
            info!(run_id = %run.id, "Research cancelled after barrier");
            return Err(PipelineError::Cancelled);
        }

        let record = FindingsRecord::from_outcomes(outcomes);
        let gaps = record.gaps();
        if !record.has_findings() {
            error!(run_id = %run.id, "Every research source failed");
            return Err(PipelineError::AllSourcesFailed);
        }

        info!(
            run_id = %run.id,
            available = record.available_topics().len(),
            gaps = gaps.len(),
            "Research barrier complete"
        );

        Ok(record)
    }
}
