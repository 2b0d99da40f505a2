//! Orchestration core for the prospect research pipeline.
//!
//! The pipeline has three phases driven by [`PipelineController`]:
//!
//! 1. Research - five independent sources queried concurrently, joined at
//!    a hard barrier into a frozen [`prospect_core::FindingsRecord`].
//! 2. Strategy - positioning document derived from the findings.
//! 3. Outreach - email draft and call script derived from findings plus
//!    positioning.
//!
//! External collaborators (completion model, web search, profile search,
//! page fetch) are consumed through the narrow traits in [`tools`].

pub mod context;
pub mod controller;
pub mod error;
pub mod prompts;
pub mod report;
pub mod sources;
pub mod stages;
pub mod state_machine;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{PipelineConfig, StageContext, DEFAULT_KNOWLEDGE_BASE_URL};
pub use controller::PipelineController;
pub use error::{PipelineError, Result};
pub use report::{ReportWriter, SalesReport};
pub use stages::{OutreachStage, ParallelResearchStage, Stage, StrategyStage};
pub use state_machine::RunStateMachine;
