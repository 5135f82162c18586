//! Request and response types for model generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Shape the model is asked to answer in.
///
/// # Examples
///
/// ```
/// use storyboard_core::ResponseFormat;
/// use serde_json::json;
///
/// let format = ResponseFormat::Json(json!({"type": "ARRAY"}));
/// assert!(format.is_structured());
/// assert!(!ResponseFormat::default().is_structured());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "schema")]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// JSON text conforming to the given response schema
    Json(serde_json::Value),
}

impl ResponseFormat {
    /// True when a response schema constrains the output.
    pub fn is_structured(&self) -> bool {
        matches!(self, ResponseFormat::Json(_))
    }
}

/// Provider-neutral generation request.
///
/// # Examples
///
/// ```
/// use storyboard_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Tell me a story")])
///     .system_instruction("You are a screenwriter.")
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.system_instruction.as_deref(), Some("You are a screenwriter."));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(setter(into), default)]
pub struct GenerateRequest {
    /// The prompt turns to send
    pub messages: Vec<Message>,
    /// System instruction sent separately from the prompt
    #[builder(setter(into, strip_option))]
    pub system_instruction: Option<String>,
    /// Free text or schema-constrained JSON
    pub response_format: ResponseFormat,
    /// Sampling temperature
    #[builder(setter(strip_option))]
    pub temperature: Option<f32>,
    /// Model identifier overriding the driver default
    #[builder(setter(into, strip_option))]
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Creates a new builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// All message text joined by newlines.
    pub fn prompt_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Why the model stopped producing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum FinishReason {
    /// Natural end of output
    Stop,
    /// Output token limit reached
    Length,
    /// Provider safety or content filter intervened
    ContentFilter,
    /// Anything else the provider reported
    Other,
}

/// The model's answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Generated text (JSON text for structured requests)
    pub text: String,
    /// Reported finish reason, when the provider sends one
    pub finish_reason: Option<FinishReason>,
}

impl GenerateResponse {
    /// A response that finished normally.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_core::{FinishReason, GenerateResponse};
    ///
    /// let response = GenerateResponse::text("Once upon a time");
    /// assert_eq!(response.finish_reason, Some(FinishReason::Stop));
    /// ```
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: Some(FinishReason::Stop),
        }
    }
}
