//! Research sources: one per topic, each querying exactly one external
//! information path and returning a finding or a typed failure.

mod executive;
mod web_topic;

use std::sync::Arc;

use async_trait::async_trait;
use llm::LlmError;
use prospect_core::{Finding, QueryContext, ResearchFailure, SourceRef, Topic};
use search::{SearchError, SearchHit};

use crate::context::StageContext;

pub use executive::ExecutiveSource;
pub use web_topic::WebTopicSource;

/// A unit of research work. Failures come back as values so one failing
/// topic never takes down the others.
#[async_trait]
pub trait ResearchSource: Send + Sync {
    fn topic(&self) -> Topic;

    async fn gather(&self, ctx: &QueryContext) -> Result<Finding, ResearchFailure>;
}

/// The standard set of five sources, wired to the context's tool seams.
pub fn default_sources(ctx: &StageContext) -> Vec<Arc<dyn ResearchSource>> {
    vec![
        Arc::new(WebTopicSource::new(
            Topic::News,
            Arc::clone(&ctx.web_search),
            Arc::clone(&ctx.llm),
        )),
        Arc::new(WebTopicSource::new(
            Topic::Competitors,
            Arc::clone(&ctx.web_search),
            Arc::clone(&ctx.llm),
        )),
        Arc::new(WebTopicSource::new(
            Topic::Metrics,
            Arc::clone(&ctx.web_search),
            Arc::clone(&ctx.llm),
        )),
        Arc::new(WebTopicSource::new(
            Topic::TechStack,
            Arc::clone(&ctx.web_search),
            Arc::clone(&ctx.llm),
        )),
        Arc::new(ExecutiveSource::new(
            Arc::clone(&ctx.web_search),
            Arc::clone(&ctx.llm),
            ctx.profile_search.clone(),
        )),
    ]
}

pub(crate) fn map_search_failure(err: SearchError) -> ResearchFailure {
    match err {
        SearchError::NoResults => ResearchFailure::EmptyResult,
        other => ResearchFailure::unavailable(other.to_string()),
    }
}

pub(crate) fn map_llm_failure(err: LlmError) -> ResearchFailure {
    ResearchFailure::unavailable(err.to_string())
}

/// Render hits as prompt material.
pub(crate) fn format_hits(hits: &[SearchHit]) -> String {
    hits.iter()
        .map(|hit| format!("- {} - {} ({})", hit.title, hit.snippet, hit.url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub(crate) fn hits_to_sources(hits: &[SearchHit]) -> Vec<SourceRef> {
    hits.iter()
        .map(|hit| SourceRef::new(hit.title.clone(), hit.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hits() {
        let hits = vec![SearchHit {
            title: "Revolut news".to_string(),
            snippet: "Launched X".to_string(),
            url: "https://example.com".to_string(),
        }];
        let material = format_hits(&hits);
        assert!(material.contains("Revolut news"));
        assert!(material.contains("https://example.com"));
    }

    #[test]
    fn test_search_failure_mapping() {
        assert_eq!(
            map_search_failure(SearchError::NoResults),
            ResearchFailure::EmptyResult
        );
        match map_search_failure(SearchError::Timeout) {
            ResearchFailure::SourceUnavailable { reason } => {
                assert!(reason.contains("timed out"));
            }
            other => panic!("unexpected failure: {:?}", other),
        }
    }
}
