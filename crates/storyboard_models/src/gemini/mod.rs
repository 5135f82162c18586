//! Google Gemini API client implementation.
//!
//! [`GeminiClient`] is a REST client supporting:
//! - Per-request model selection
//! - System instructions
//! - Structured output through a JSON response schema
//! - Credential lookup at call time

mod client;

pub use client::GeminiClient;

/// Result type for Gemini operations.
pub type GeminiResult<T> = Result<T, storyboard_error::GenerationError>;
