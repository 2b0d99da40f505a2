//! Assembly and persistence of the final outreach document.

use std::path::{Path, PathBuf};

use prospect_core::{
    FindingsRecord, OutreachArtifact, PositioningDocument, QueryContext, Topic,
};
use serde::Serialize;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

use crate::error::Result;

/// Everything a completed run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReport {
    pub run_id: Uuid,
    pub context: QueryContext,
    pub findings: FindingsRecord,
    pub positioning: PositioningDocument,
    pub artifact: OutreachArtifact,
}

impl SalesReport {
    /// Render the report as a single markdown document: positioning
    /// summary, research gaps, email draft, call script, sources.
    pub fn render(&self) -> String {
        let mut doc = format!(
            "# Outreach: {prospect} @ {company}\n\nPrepared for {rep_name} ({rep_title}).\n\n",
            prospect = self.context.prospect_name,
            company = self.context.company_name,
            rep_name = self.context.sales_rep.name,
            rep_title = self.context.sales_rep.title,
        );

        doc.push_str("## Positioning Summary\n\n");
        doc.push_str(self.positioning.analysis.trim());
        doc.push_str("\n\n");

        if !self.positioning.gaps.is_empty() {
            let gap_list = self
                .positioning
                .gaps
                .iter()
                .map(|t| t.label())
                .collect::<Vec<_>>()
                .join(", ");
            doc.push_str(&format!(
                "> Research gaps: no data was available for {gap_list}.\n\n"
            ));
        }

        doc.push_str("## Email Draft\n\n");
        doc.push_str(self.artifact.email.trim());
        doc.push_str("\n\n## Call Script\n\n");
        doc.push_str(self.artifact.call_script.trim());
        doc.push('\n');

        let mut sources = Vec::new();
        for topic in Topic::ALL {
            if let Some(finding) = self.findings.finding(topic) {
                for source in &finding.sources {
                    sources.push(format!("- {} - {}", source.title, source.url));
                }
            }
        }
        if !sources.is_empty() {
            doc.push_str("\n## Research Sources\n\n");
            doc.push_str(&sources.join("\n"));
            doc.push('\n');
        }

        doc
    }
}

/// Writes rendered reports to disk.
pub struct ReportWriter {
    output_path: PathBuf,
}

impl ReportWriter {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn write(&self, report: &SalesReport) -> Result<PathBuf> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        fs::write(&self.output_path, report.render()).await?;

        info!(
            path = %self.output_path.display(),
            "Outreach report saved"
        );

        Ok(self.output_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record_with_gaps;

    fn sample_report() -> SalesReport {
        let findings = record_with_gaps(&[Topic::Metrics]);
        SalesReport {
            run_id: Uuid::new_v4(),
            context: QueryContext::new("Carlos", "Revolut"),
            positioning: PositioningDocument::new(
                "Lead with fraud AI",
                findings.available_topics(),
                findings.gaps(),
            ),
            findings,
            artifact: OutreachArtifact::new("Hi Carlos - congrats on the launch.", "Hi, this is John."),
        }
    }

    #[test]
    fn test_render_contains_all_sections() {
        let doc = sample_report().render();

        assert!(doc.contains("Revolut"));
        assert!(doc.contains("## Positioning Summary"));
        assert!(doc.contains("Lead with fraud AI"));
        assert!(doc.contains("Research gaps"));
        assert!(doc.contains("Key Metrics"));
        assert!(doc.contains("## Email Draft"));
        assert!(doc.contains("Hi Carlos"));
        assert!(doc.contains("## Call Script"));
    }

    #[test]
    fn test_render_without_gaps_omits_gap_note() {
        let findings = record_with_gaps(&[]);
        let report = SalesReport {
            positioning: PositioningDocument::new("x", findings.available_topics(), vec![]),
            findings,
            ..sample_report()
        };

        assert!(!report.render().contains("Research gaps"));
    }

    #[tokio::test]
    async fn test_write_creates_file_and_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/sales_outreach.md");
        let writer = ReportWriter::new(&path);

        let written = writer.write(&sample_report()).await.unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Revolut"));
    }
}
