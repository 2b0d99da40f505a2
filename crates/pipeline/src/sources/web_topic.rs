use std::sync::Arc;

use async_trait::async_trait;
use prospect_core::{Finding, QueryContext, ResearchFailure, Topic};
use tracing::debug;

use crate::prompts::StagePrompts;
use crate::sources::{format_hits, hits_to_sources, map_llm_failure, map_search_failure};
use crate::tools::{CompletionModel, WebSearch};

use super::ResearchSource;

/// Search-then-summarize source for the company-facing topics (news,
/// competitors, metrics, techstack). One web search, one completion.
pub struct WebTopicSource {
    topic: Topic,
    web: Arc<dyn WebSearch>,
    llm: Arc<dyn CompletionModel>,
}

impl WebTopicSource {
    pub fn new(topic: Topic, web: Arc<dyn WebSearch>, llm: Arc<dyn CompletionModel>) -> Self {
        Self { topic, web, llm }
    }

    fn query(&self, ctx: &QueryContext) -> String {
        let company = &ctx.company_name;
        match self.topic {
            Topic::News => format!(
                "\"{company}\" news funding launch expansion acquisition layoffs"
            ),
            Topic::Competitors => format!("\"{company}\" competitors alternatives comparison"),
            Topic::Metrics => {
                format!("\"{company}\" revenue headcount employees customers growth")
            }
            Topic::TechStack => format!(
                "\"{company}\" engineering blog job postings technology stack vendors"
            ),
            // The executive topic has its own source.
            Topic::Executive => format!("\"{company}\" leadership"),
        }
    }
}

#[async_trait]
impl ResearchSource for WebTopicSource {
    fn topic(&self) -> Topic {
        self.topic
    }

    async fn gather(&self, ctx: &QueryContext) -> Result<Finding, ResearchFailure> {
        let query = self.query(ctx);
        debug!(topic = %self.topic, %query, "Gathering web research");

        let hits = self.web.search(&query).await.map_err(map_search_failure)?;

        let material = format_hits(&hits);
        let prompt = StagePrompts::research(self.topic, ctx, &material);
        let summary = self.llm.complete(&prompt).await.map_err(map_llm_failure)?;

        if summary.trim().is_empty() {
            return Err(ResearchFailure::EmptyResult);
        }

        Ok(Finding::new(self.topic, summary).with_sources(hits_to_sources(&hits)))
    }
}
