use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed set of research topics covered in the research phase.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    News,
    Competitors,
    Metrics,
    TechStack,
    Executive,
}

impl Topic {
    /// All topics, in report order.
    pub const ALL: [Topic; 5] = [
        Topic::News,
        Topic::Competitors,
        Topic::Metrics,
        Topic::TechStack,
        Topic::Executive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Competitors => "competitors",
            Self::Metrics => "metrics",
            Self::TechStack => "techstack",
            Self::Executive => "executive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "news" => Some(Self::News),
            "competitors" => Some(Self::Competitors),
            "metrics" => Some(Self::Metrics),
            "techstack" => Some(Self::TechStack),
            "executive" => Some(Self::Executive),
            _ => None,
        }
    }

    /// Human-readable heading used in reports and prompts.
    pub fn label(&self) -> &'static str {
        match self {
            Self::News => "Recent News",
            Self::Competitors => "Competitive Landscape",
            Self::Metrics => "Key Metrics",
            Self::TechStack => "Technology Stack",
            Self::Executive => "Executive Profile",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A citation attached to a finding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceRef {
    pub title: String,
    pub url: String,
}

impl SourceRef {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

/// Research result for a single topic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Finding {
    pub topic: Topic,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
}

impl Finding {
    pub fn new(topic: Topic, summary: impl Into<String>) -> Self {
        Self {
            topic,
            summary: summary.into(),
            sources: Vec::new(),
        }
    }

    pub fn with_sources(mut self, sources: Vec<SourceRef>) -> Self {
        self.sources = sources;
        self
    }
}

/// Why a research task produced no finding. Captured as a value so one
/// failing topic never aborts the others.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResearchFailure {
    #[error("research timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    #[error("source unavailable: {reason}")]
    SourceUnavailable { reason: String },

    #[error("source returned no usable results")]
    EmptyResult,
}

impl ResearchFailure {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            reason: reason.into(),
        }
    }
}

/// Outcome slot for one topic in the findings record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TopicOutcome {
    Found(Finding),
    Unavailable(ResearchFailure),
}

impl TopicOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, TopicOutcome::Found(_))
    }
}

/// The merged result set produced by the research phase.
///
/// Assembled once by the pipeline controller from joined task results and
/// read-only afterwards. Every topic key is always present: a failed task
/// shows up as an explicit `Unavailable` entry, never a missing one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FindingsRecord {
    entries: BTreeMap<Topic, TopicOutcome>,
}

impl FindingsRecord {
    /// Build the record from per-topic outcomes. Topics without an entry
    /// are recorded as unavailable so the key set is always complete.
    pub fn from_outcomes(outcomes: impl IntoIterator<Item = (Topic, TopicOutcome)>) -> Self {
        let mut entries: BTreeMap<Topic, TopicOutcome> = outcomes.into_iter().collect();
        for topic in Topic::ALL {
            entries.entry(topic).or_insert(TopicOutcome::Unavailable(
                ResearchFailure::unavailable("no research task reported for this topic"),
            ));
        }
        Self { entries }
    }

    pub fn outcome(&self, topic: Topic) -> &TopicOutcome {
        &self.entries[&topic]
    }

    pub fn finding(&self, topic: Topic) -> Option<&Finding> {
        match &self.entries[&topic] {
            TopicOutcome::Found(finding) => Some(finding),
            TopicOutcome::Unavailable(_) => None,
        }
    }

    /// Topics that produced a finding, in report order.
    pub fn available_topics(&self) -> Vec<Topic> {
        Topic::ALL
            .into_iter()
            .filter(|t| self.entries[t].is_found())
            .collect()
    }

    /// Topics whose research failed, in report order.
    pub fn gaps(&self) -> Vec<Topic> {
        Topic::ALL
            .into_iter()
            .filter(|t| !self.entries[t].is_found())
            .collect()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        Topic::ALL.into_iter().filter_map(|t| self.finding(t))
    }

    pub fn has_findings(&self) -> bool {
        self.entries.values().any(TopicOutcome::is_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_roundtrip() {
        for topic in Topic::ALL {
            assert_eq!(Topic::parse(topic.as_str()), Some(topic));
        }
        assert_eq!(Topic::parse("invalid"), None);
    }

    #[test]
    fn test_record_fills_missing_topics() {
        let record = FindingsRecord::from_outcomes([(
            Topic::News,
            TopicOutcome::Found(Finding::new(Topic::News, "launched a card")),
        )]);

        assert_eq!(record.available_topics(), vec![Topic::News]);
        assert_eq!(record.gaps().len(), 4);
        assert!(record.has_findings());
        assert!(record.finding(Topic::Metrics).is_none());
    }

    #[test]
    fn test_record_with_no_findings() {
        let record = FindingsRecord::from_outcomes(Topic::ALL.map(|t| {
            (
                t,
                TopicOutcome::Unavailable(ResearchFailure::EmptyResult),
            )
        }));

        assert!(!record.has_findings());
        assert_eq!(record.gaps(), Topic::ALL.to_vec());
    }

    #[test]
    fn test_failure_display() {
        let failure = ResearchFailure::Timeout { elapsed_ms: 45000 };
        assert!(failure.to_string().contains("45000"));

        let failure = ResearchFailure::unavailable("rate limited");
        assert!(failure.to_string().contains("rate limited"));
    }
}
