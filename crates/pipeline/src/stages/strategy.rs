use prospect_core::{FindingsRecord, PositioningDocument, ResearchRun};
use tracing::{info, warn};

use crate::context::StageContext;
use crate::error::{PipelineError, Result};
use crate::prompts::StagePrompts;
use crate::stages::Stage;

/// Phase 2: derive the positioning document from the frozen findings.
///
/// A pure function of the findings record apart from the single
/// completion call. Gaps degrade the prompt, never the stage: it runs
/// with whatever topics are available and records the rest.
pub struct StrategyStage;

impl StrategyStage {
    pub async fn run(
        ctx: &StageContext,
        run: &ResearchRun,
        findings: &FindingsRecord,
    ) -> Result<PositioningDocument> {
        if ctx.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        info!(
            run_id = %run.id,
            available = findings.available_topics().len(),
            gaps = findings.gaps().len(),
            "Starting strategy stage"
        );

        let knowledge_base = Self::fetch_knowledge_base(ctx, run).await;

        let prompt = StagePrompts::positioning(&run.context, findings, knowledge_base.as_deref());
        ctx.emit_tool_invoked(run.id, "llm", Stage::Strategy.as_str(), None);

        let analysis = ctx
            .llm
            .complete(&prompt)
            .await
            .map_err(|e| PipelineError::stage_failed(Stage::Strategy, e.to_string()))?;

        info!(
            run_id = %run.id,
            analysis_length = analysis.len(),
            "Positioning strategy generated"
        );

        Ok(PositioningDocument::new(
            analysis,
            findings.available_topics(),
            findings.gaps(),
        ))
    }

    /// Best-effort fetch of the case-study library. Failures are logged
    /// and the stage proceeds without it.
    async fn fetch_knowledge_base(ctx: &StageContext, run: &ResearchRun) -> Option<String> {
        let url = ctx.config.knowledge_base_url.as_ref()?;
        let fetcher = ctx.page_fetch.as_ref()?;

        ctx.emit_tool_invoked(
            run.id,
            "page_fetch",
            Stage::Strategy.as_str(),
            Some(url.clone()),
        );

        match fetcher.fetch_page(url).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, %url, "Knowledge base fetch failed, continuing without it");
                None
            }
        }
    }
}
