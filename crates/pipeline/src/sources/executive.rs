use std::sync::Arc;

use async_trait::async_trait;
use prospect_core::{Finding, QueryContext, ResearchFailure, Topic};
use tracing::{debug, warn};

use crate::prompts::StagePrompts;
use crate::sources::{format_hits, hits_to_sources, map_llm_failure, map_search_failure};
use crate::tools::{CompletionModel, ProfileSearch, WebSearch};

use super::ResearchSource;

/// Profiles the prospect. Prefers the dedicated profile-search tool when
/// one is configured and falls back to plain web search otherwise.
pub struct ExecutiveSource {
    web: Arc<dyn WebSearch>,
    llm: Arc<dyn CompletionModel>,
    profile: Option<Arc<dyn ProfileSearch>>,
}

impl ExecutiveSource {
    pub fn new(
        web: Arc<dyn WebSearch>,
        llm: Arc<dyn CompletionModel>,
        profile: Option<Arc<dyn ProfileSearch>>,
    ) -> Self {
        Self { web, llm, profile }
    }

    async fn gather_material(
        &self,
        ctx: &QueryContext,
    ) -> Result<(String, Vec<prospect_core::SourceRef>), ResearchFailure> {
        if let Some(ref profile) = self.profile {
            match profile
                .search_profile(&ctx.prospect_name, &ctx.company_name)
                .await
            {
                Ok(text) => return Ok((text, Vec::new())),
                Err(err) => {
                    warn!(error = %err, "Profile search failed, falling back to web search");
                }
            }
        }

        let query = format!(
            "\"{}\" \"{}\" profile interview talk biography",
            ctx.prospect_name, ctx.company_name
        );
        let hits = self.web.search(&query).await.map_err(map_search_failure)?;
        Ok((format_hits(&hits), hits_to_sources(&hits)))
    }
}

#[async_trait]
impl ResearchSource for ExecutiveSource {
    fn topic(&self) -> Topic {
        Topic::Executive
    }

    async fn gather(&self, ctx: &QueryContext) -> Result<Finding, ResearchFailure> {
        debug!(prospect = %ctx.prospect_name, "Gathering executive profile");

        let (material, sources) = self.gather_material(ctx).await?;
        let prompt = StagePrompts::research(Topic::Executive, ctx, &material);
        let summary = self.llm.complete(&prompt).await.map_err(map_llm_failure)?;

        if summary.trim().is_empty() {
            return Err(ResearchFailure::EmptyResult);
        }

        Ok(Finding::new(Topic::Executive, summary).with_sources(sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockModel, MockProfileSearch, MockWebSearch};
    use search::SearchHit;

    #[tokio::test]
    async fn test_prefers_profile_tool() {
        let source = ExecutiveSource::new(
            Arc::new(MockWebSearch::empty()),
            Arc::new(MockModel::returning("Engineering leader.")),
            Some(Arc::new(MockProfileSearch::returning(
                "Carlos: engineering lead at Revolut",
            ))),
        );

        let finding = source
            .gather(&QueryContext::new("Carlos", "Revolut"))
            .await
            .unwrap();

        assert_eq!(finding.topic, Topic::Executive);
        assert_eq!(finding.summary, "Engineering leader.");
    }

    #[tokio::test]
    async fn test_falls_back_to_web_search_when_profile_fails() {
        let hits = vec![SearchHit {
            title: "Carlos interview".to_string(),
            snippet: "On scaling payments".to_string(),
            url: "https://example.com/talk".to_string(),
        }];
        let source = ExecutiveSource::new(
            Arc::new(MockWebSearch::with_hits(hits)),
            Arc::new(MockModel::returning("Bio from the open web.")),
            Some(Arc::new(MockProfileSearch::failing())),
        );

        let finding = source
            .gather(&QueryContext::new("Carlos", "Revolut"))
            .await
            .unwrap();

        assert_eq!(finding.summary, "Bio from the open web.");
        assert_eq!(finding.sources.len(), 1);
    }

    #[tokio::test]
    async fn test_web_search_used_when_no_profile_tool() {
        let source = ExecutiveSource::new(
            Arc::new(MockWebSearch::empty()),
            Arc::new(MockModel::returning("x")),
            None,
        );

        let err = source
            .gather(&QueryContext::new("Carlos", "Revolut"))
            .await
            .unwrap_err();

        assert_eq!(err, ResearchFailure::EmptyResult);
    }
}
