//! Client for the Gemini `generateContent` API.
//!
//! Exposes a single unary completion call: `complete(prompt) -> text`.
//! Streaming, chat history, and tool-calling are out of scope; the
//! pipeline only needs one-shot completions.

mod client;
mod error;

pub use client::{GeminiClient, DEFAULT_MODEL};
pub use error::LlmError;
