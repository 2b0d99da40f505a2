pub mod domain;
pub mod error;

pub use domain::context::{QueryContext, SalesRep};
pub use domain::findings::{
    Finding, FindingsRecord, ResearchFailure, SourceRef, Topic, TopicOutcome,
};
pub use domain::outreach::OutreachArtifact;
pub use domain::positioning::PositioningDocument;
pub use domain::run::{ResearchRun, RunStatus};
pub use error::CoreError;
