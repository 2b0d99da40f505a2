use prospect_core::{FindingsRecord, OutreachArtifact, PositioningDocument, ResearchRun};
use tracing::info;

use crate::context::StageContext;
use crate::error::{PipelineError, Result};
use crate::prompts::StagePrompts;
use crate::stages::Stage;

/// Phase 3: write the outreach artifacts. Terminal stage, no retries.
pub struct OutreachStage;

#[derive(Clone, Copy)]
enum Section {
    None,
    Email,
    Script,
}

impl OutreachStage {
    pub async fn run(
        ctx: &StageContext,
        run: &ResearchRun,
        findings: &FindingsRecord,
        positioning: &PositioningDocument,
    ) -> Result<OutreachArtifact> {
        if ctx.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        info!(run_id = %run.id, "Starting outreach stage");

        let prompt = StagePrompts::outreach(&run.context, findings, positioning);
        ctx.emit_tool_invoked(run.id, "llm", Stage::Outreach.as_str(), None);

        let response = ctx
            .llm
            .complete(&prompt)
            .await
            .map_err(|e| PipelineError::stage_failed(Stage::Outreach, e.to_string()))?;

        let (email, call_script) = Self::parse_sections(&response);
        let artifact = OutreachArtifact::new(email, call_script);

        if artifact.is_empty() {
            return Err(PipelineError::stage_failed(
                Stage::Outreach,
                "model returned an empty outreach draft",
            ));
        }

        info!(
            run_id = %run.id,
            email_length = artifact.email.len(),
            script_length = artifact.call_script.len(),
            "Outreach draft completed"
        );

        Ok(artifact)
    }

    /// Split the response at its `EMAIL DRAFT` / `CALL SCRIPT` headings.
    /// A section the model failed to mark falls back to the whole text so
    /// the artifact is never silently empty.
    fn parse_sections(text: &str) -> (String, String) {
        let mut email = String::new();
        let mut script = String::new();
        let mut section = Section::None;

        for line in text.lines() {
            match Self::marker(line) {
                Some(next) => section = next,
                None => {
                    let target = match section {
                        Section::Email => &mut email,
                        Section::Script => &mut script,
                        Section::None => continue,
                    };
                    target.push_str(line);
                    target.push('\n');
                }
            }
        }

        let email = email.trim().to_string();
        let script = script.trim().to_string();
        let fallback = || text.trim().to_string();

        (
            if email.is_empty() { fallback() } else { email },
            if script.is_empty() { fallback() } else { script },
        )
    }

    fn marker(line: &str) -> Option<Section> {
        let stripped = line
            .trim()
            .trim_start_matches(|c| c == '#' || c == '*' || c == ' ')
            .trim_end_matches(|c| c == ':' || c == '*' || c == ' ');
        let lower = stripped.to_lowercase();
        match lower.as_str() {
            "email" | "email draft" | "cold email" => Some(Section::Email),
            "call script" | "call-script" | "voicemail script" => Some(Section::Script),
            _ => None,
        }
    }
}
