use std::time::Instant;

use events::PipelineEvent;
use prospect_core::{ResearchRun, RunStatus};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::context::StageContext;
use crate::error::Result;
use crate::report::{ReportWriter, SalesReport};
use crate::stages::{truncate, OutreachStage, ParallelResearchStage, Stage, StrategyStage};
use crate::state_machine::RunStateMachine;

/// Drives a run through `Init → Researching → Strategizing → Writing →
/// Done`, with `Failed`/`Cancelled` as the terminal states for anything
/// that goes wrong.
///
/// Phase 1 owns the partial-failure policy; failures after its barrier
/// are fatal and surface the failing stage to the caller.
pub struct PipelineController {
    ctx: StageContext,
    research: ParallelResearchStage,
}

impl PipelineController {
    pub fn new(ctx: StageContext) -> Self {
        let research = ParallelResearchStage::with_default_sources(&ctx);
        Self { ctx, research }
    }

    /// Replace the research stage, e.g. with hand-picked sources.
    pub fn with_research_stage(mut self, stage: ParallelResearchStage) -> Self {
        self.research = stage;
        self
    }

    /// Token callers can use to cancel the run cooperatively.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.ctx.cancel.clone()
    }

    pub async fn run(&self, run: &mut ResearchRun) -> Result<SalesReport> {
        let started = Instant::now();
        info!(
            run_id = %run.id,
            prospect = %run.context.prospect_name,
            company = %run.context.company_name,
            "Starting pipeline run"
        );

        self.ctx.emit_event(PipelineEvent::RunStarted {
            run_id: run.id,
            prospect_name: run.context.prospect_name.clone(),
            company_name: run.context.company_name.clone(),
        });

        let result = self.drive(run).await;

        if let Err(ref err) = result {
            let terminal = err.terminal_status();
            if RunStateMachine::can_transition(&run.status, &terminal) {
                if let Err(transition_err) = self.ctx.transition(run, terminal) {
                    warn!(error = %transition_err, "Could not record terminal status");
                }
            }
            error!(
                run_id = %run.id,
                status = %run.status.as_str(),
                error = %err,
                "Pipeline run ended with error"
            );
        }

        self.ctx.emit_event(PipelineEvent::RunFinished {
            run_id: run.id,
            status: run.status.as_str().to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
        });

        result
    }

    async fn drive(&self, run: &mut ResearchRun) -> Result<SalesReport> {
        // Phase 1: concurrent research up to the barrier.
        self.ctx.transition(run, RunStatus::Researching)?;
        let findings = self
            .timed_stage(run, Stage::Research, self.research.run(&self.ctx, run))
            .await?;

        // Phase 2: positioning. The findings record is frozen from here on.
        self.ctx.transition(run, RunStatus::Strategizing)?;
        let positioning = self
            .timed_stage(
                run,
                Stage::Strategy,
                StrategyStage::run(&self.ctx, run, &findings),
            )
            .await?;

        // Phase 3: outreach artifacts.
        self.ctx.transition(run, RunStatus::Writing)?;
        let artifact = self
            .timed_stage(
                run,
                Stage::Outreach,
                OutreachStage::run(&self.ctx, run, &findings, &positioning),
            )
            .await?;

        let report = SalesReport {
            run_id: run.id,
            context: run.context.clone(),
            findings,
            positioning,
            artifact,
        };

        if let Some(ref path) = self.ctx.config.output_path {
            let written = ReportWriter::new(path).write(&report).await?;
            self.ctx.emit_event(PipelineEvent::ReportSaved {
                run_id: run.id,
                path: written.display().to_string(),
            });
        }

        self.ctx.transition(run, RunStatus::Done)?;
        info!(run_id = %run.id, "Pipeline run completed");

        Ok(report)
    }

    async fn timed_stage<T>(
        &self,
        run: &ResearchRun,
        stage: Stage,
        fut: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T>
    where
        T: StageSummary,
    {
        self.ctx.emit_event(PipelineEvent::StageStarted {
            run_id: run.id,
            stage: stage.as_str().to_string(),
        });

        let started = Instant::now();
        let result = fut.await;

        self.ctx.emit_event(PipelineEvent::StageFinished {
            run_id: run.id,
            stage: stage.as_str().to_string(),
            success: result.is_ok(),
            duration_ms: started.elapsed().as_millis() as u64,
            summary: result.as_ref().ok().map(StageSummary::summary),
        });

        result
    }
}

/// Condensed stage output for intermediate-output events.
trait StageSummary {
    fn summary(&self) -> String;
}

impl StageSummary for prospect_core::FindingsRecord {
    fn summary(&self) -> String {
        format!(
            "{} topics researched, {} gaps",
            self.available_topics().len(),
            self.gaps().len()
        )
    }
}

impl StageSummary for prospect_core::PositioningDocument {
    fn summary(&self) -> String {
        truncate(&self.analysis, 400)
    }
}

impl StageSummary for prospect_core::OutreachArtifact {
    fn summary(&self) -> String {
        truncate(&self.email, 400)
    }
}
