//! Event system for Prospect Studio: a broadcast bus plus the typed
//! pipeline event vocabulary.

mod bus;
mod types;

pub use bus::EventBus;
pub use types::{EventEnvelope, PipelineEvent, ToolCallData};
