use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::findings::Topic;

/// Strategy document derived from the findings record: pain points mapped
/// to offerings, with proof points. Read-only after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PositioningDocument {
    pub analysis: String,
    /// Topics whose findings fed into the analysis (traceability, not
    /// ownership).
    pub drawn_from: Vec<Topic>,
    /// Topics that were unavailable when the strategy was formed.
    pub gaps: Vec<Topic>,
    pub created_at: DateTime<Utc>,
}

impl PositioningDocument {
    pub fn new(analysis: impl Into<String>, drawn_from: Vec<Topic>, gaps: Vec<Topic>) -> Self {
        Self {
            analysis: analysis.into(),
            drawn_from,
            gaps,
            created_at: Utc::now(),
        }
    }
}
