//! LLM integration for generating short insights about legal text.
//!
//! Uses a local LLM (via Ollama) or an OpenAI-compatible API.

mod client;

pub use client::{LlmClient, LlmConfig, LlmError, LlmProvider};
