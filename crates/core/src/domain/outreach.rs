use serde::{Deserialize, Serialize};

/// Terminal output of a pipeline run: the email draft and the call script.
/// Written once by the outreach stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutreachArtifact {
    pub email: String,
    pub call_script: String,
}

impl OutreachArtifact {
    pub fn new(email: impl Into<String>, call_script: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            call_script: call_script.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.trim().is_empty() && self.call_script.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_emptiness() {
        assert!(OutreachArtifact::new("", "  ").is_empty());
        assert!(!OutreachArtifact::new("Hi Carlos,", "").is_empty());
    }
}
