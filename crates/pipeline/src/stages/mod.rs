//! Stage implementations for the pipeline.
//!
//! - [`ParallelResearchStage`] - concurrent topic research with a hard
//!   join barrier
//! - [`StrategyStage`] - positioning document from the findings
//! - [`OutreachStage`] - email draft and call script

mod outreach;
mod research;
mod strategy;

pub use outreach::OutreachStage;
pub use research::ParallelResearchStage;
pub use strategy::StrategyStage;

/// Stage identifier used in errors and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Research,
    Strategy,
    Outreach,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Strategy => "strategy",
            Self::Outreach => "outreach",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bound intermediate-output snippets carried on events.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect::<String>() + "…"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 3), "hél…");
        assert_eq!(truncate("hi", 10), "hi");
    }
}
