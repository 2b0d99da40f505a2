//! Mock collaborators and fixtures shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use llm::LlmError;
use prospect_core::{Finding, FindingsRecord, QueryContext, ResearchFailure, Topic, TopicOutcome};
use search::{SearchError, SearchHit};

use crate::context::{PipelineConfig, StageContext};
use crate::sources::ResearchSource;
use crate::tools::{CompletionModel, PageFetch, ProfileSearch, WebSearch};

/// Completion model that returns a canned response and records every
/// prompt it sees.
pub struct MockModel {
    response: Option<String>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl MockModel {
    pub fn returning(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionModel for MockModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.response {
            Some(response) => Ok(response.clone()),
            None => Err(LlmError::Api {
                status: 500,
                message: "mock model failure".to_string(),
            }),
        }
    }
}

/// Web search that returns canned hits, or `NoResults` when empty.
pub struct MockWebSearch {
    hits: Vec<SearchHit>,
}

impl MockWebSearch {
    pub fn empty() -> Self {
        Self { hits: Vec::new() }
    }

    pub fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self { hits }
    }
}

#[async_trait]
impl WebSearch for MockWebSearch {
    async fn search(&self, _query: &str) -> Result<Vec<SearchHit>, SearchError> {
        if self.hits.is_empty() {
            Err(SearchError::NoResults)
        } else {
            Ok(self.hits.clone())
        }
    }
}

pub struct MockProfileSearch {
    profile: Option<String>,
}

impl MockProfileSearch {
    pub fn returning(profile: &str) -> Self {
        Self {
            profile: Some(profile.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { profile: None }
    }
}

#[async_trait]
impl ProfileSearch for MockProfileSearch {
    async fn search_profile(&self, _person: &str, _company: &str) -> Result<String, SearchError> {
        match &self.profile {
            Some(profile) => Ok(profile.clone()),
            None => Err(SearchError::Api {
                status: 503,
                message: "mock profile failure".to_string(),
            }),
        }
    }
}

pub struct MockPageFetch {
    page: Option<String>,
}

impl MockPageFetch {
    pub fn returning(page: &str) -> Self {
        Self {
            page: Some(page.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl PageFetch for MockPageFetch {
    async fn fetch_page(&self, _url: &str) -> Result<String, SearchError> {
        match &self.page {
            Some(page) => Ok(page.clone()),
            None => Err(SearchError::Timeout),
        }
    }
}

/// Research source that immediately yields a finding.
struct StaticSource {
    topic: Topic,
    summary: String,
}

/// Research source that always fails.
struct FailingSource {
    topic: Topic,
}

/// Research source that sleeps before yielding a finding.
struct SlowSource {
    topic: Topic,
    delay: Duration,
    summary: String,
}

#[async_trait]
impl ResearchSource for StaticSource {
    fn topic(&self) -> Topic {
        self.topic
    }

    async fn gather(&self, _ctx: &QueryContext) -> Result<Finding, ResearchFailure> {
        Ok(Finding::new(self.topic, self.summary.clone()))
    }
}

#[async_trait]
impl ResearchSource for FailingSource {
    fn topic(&self) -> Topic {
        self.topic
    }

    async fn gather(&self, _ctx: &QueryContext) -> Result<Finding, ResearchFailure> {
        Err(ResearchFailure::unavailable("mock source down"))
    }
}

#[async_trait]
impl ResearchSource for SlowSource {
    fn topic(&self) -> Topic {
        self.topic
    }

    async fn gather(&self, _ctx: &QueryContext) -> Result<Finding, ResearchFailure> {
        tokio::time::sleep(self.delay).await;
        Ok(Finding::new(self.topic, self.summary.clone()))
    }
}

pub fn static_source(topic: Topic, summary: &str) -> Arc<dyn ResearchSource> {
    Arc::new(StaticSource {
        topic,
        summary: summary.to_string(),
    })
}

pub fn failing_source(topic: Topic) -> Arc<dyn ResearchSource> {
    Arc::new(FailingSource { topic })
}

pub fn slow_source(topic: Topic, delay: Duration, summary: &str) -> Arc<dyn ResearchSource> {
    Arc::new(SlowSource {
        topic,
        delay,
        summary: summary.to_string(),
    })
}

pub fn mock_context() -> StageContext {
    mock_context_with(PipelineConfig::default())
}

pub fn mock_context_with(config: PipelineConfig) -> StageContext {
    StageContext::new(
        Arc::new(MockModel::returning("mock completion")),
        Arc::new(MockWebSearch::empty()),
        config,
    )
}

/// A record with every topic populated.
pub fn found_record() -> FindingsRecord {
    record_with_gaps(&[])
}

/// A record where the given topics are gaps and the rest are populated.
pub fn record_with_gaps(gaps: &[Topic]) -> FindingsRecord {
    FindingsRecord::from_outcomes(Topic::ALL.into_iter().map(|topic| {
        let outcome = if gaps.contains(&topic) {
            TopicOutcome::Unavailable(ResearchFailure::EmptyResult)
        } else {
            TopicOutcome::Found(Finding::new(
                topic,
                format!("{} research for Revolut", topic.as_str()),
            ))
        };
        (topic, outcome)
    }))
}
