//! Google Gemini API implementation.
//!
//! The client reads its API key from the environment on every request, so a
//! key added or removed while the process runs takes effect immediately and a
//! missing key fails before any network traffic.
//!
//! # Example
//!
//! ```no_run
//! use storyboard_models::GeminiClient;
//! use storyboard_core::{GenerateRequest, Message, ResponseFormat};
//! use storyboard_interface::GenerationDriver;
//! use serde_json::json;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new();
//!
//! let request = GenerateRequest::builder()
//!     .messages(vec![Message::user("List three colours as a JSON array")])
//!     .response_format(ResponseFormat::Json(json!({
//!         "type": "ARRAY",
//!         "items": {"type": "STRING"}
//!     })))
//!     .build()?;
//! let response = client.generate(&request).await?;
//! println!("{}", response.text);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use std::env;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use gemini_rust::{Gemini, client::Model};

use storyboard_core::{
    FinishReason, GenerateRequest, GenerateResponse, ModelConfig, ResponseFormat, Role,
};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;

use super::GeminiResult;

/// Client for the Google Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    /// Default model name when req.model is None
    model_name: String,
    /// Environment variable holding the API key
    credential_env: String,
    /// Temperature applied when the request does not set one
    default_temperature: Option<f32>,
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GeminiClient {
    /// Create a client for the default model, reading `GEMINI_API_KEY`.
    pub fn new() -> Self {
        Self::from_config(&ModelConfig::default())
    }

    /// Create a client from the `[model]` configuration section.
    #[instrument(name = "gemini_client_from_config", skip(config), fields(model = %config.name()))]
    pub fn from_config(config: &ModelConfig) -> Self {
        Self {
            model_name: config.name().clone(),
            credential_env: config.credential_env().clone(),
            default_temperature: *config.temperature(),
        }
    }

    /// Convert a model name string to a gemini-rust Model enum variant.
    ///
    /// Unrecognized names use `Model::Custom` with the "models/" prefix the
    /// Gemini API requires.
    ///
    /// - "gemini-2.5-flash" → Model::Gemini25Flash
    /// - "gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    /// - "models/gemini-2.0-flash" → Model::Custom("models/gemini-2.0-flash")
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Read the API key, treating an empty value as absent.
    fn api_key(&self) -> GeminiResult<String> {
        env::var(&self.credential_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingCredential(
                    self.credential_env.clone(),
                ))
            })
    }

    /// Internal generate method that returns Gemini-specific errors.
    async fn generate_internal(&self, req: &GenerateRequest) -> GeminiResult<GenerateResponse> {
        let api_key = self.api_key()?;
        let model_name = req.model.as_deref().unwrap_or(&self.model_name);

        let client = Gemini::with_model(&api_key, Self::model_name_to_enum(model_name))
            .map_err(|e| GenerationError::new(GenerationErrorKind::ClientCreation(e.to_string())))?;

        let mut builder = client.generate_content();

        for msg in &req.messages {
            builder = match msg.role {
                Role::User => builder.with_user_message(&msg.content),
                Role::Model => builder.with_model_message(&msg.content),
            };
        }

        if let Some(instruction) = &req.system_instruction {
            builder = builder.with_system_prompt(instruction);
        }

        if let Some(temp) = req.temperature.or(self.default_temperature) {
            builder = builder.with_temperature(temp);
        }

        if let ResponseFormat::Json(schema) = &req.response_format {
            builder = builder
                .with_response_mime_type("application/json")
                .with_response_schema(schema.clone());
        }

        let started = Instant::now();
        let response = builder.execute().await.map_err(Self::parse_gemini_error)?;
        debug!(
            model = model_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Gemini request completed"
        );

        let finish_reason = response
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_ref())
            .map(Self::convert_finish_reason);

        let text = response.text();

        if text.trim().is_empty() && finish_reason == Some(FinishReason::ContentFilter) {
            warn!(model = model_name, "Gemini response blocked by safety filter");
            return Err(GenerationError::new(GenerationErrorKind::Blocked(format!(
                "model {} returned no text",
                model_name
            ))));
        }

        Ok(GenerateResponse {
            text,
            finish_reason,
        })
    }

    fn convert_finish_reason(reason: &gemini_rust::generation::model::FinishReason) -> FinishReason {
        use gemini_rust::generation::model::FinishReason as Gfr;
        match reason {
            Gfr::Stop => FinishReason::Stop,
            Gfr::MaxTokens => FinishReason::Length,
            Gfr::Safety
            | Gfr::Recitation
            | Gfr::Blocklist
            | Gfr::ProhibitedContent
            | Gfr::Spii
            | Gfr::ImageSafety => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        }
    }

    /// Parse gemini-rust errors to extract HTTP status codes.
    ///
    /// Converts generic API error strings into structured errors with HTTP
    /// status codes when available. The provider message is kept intact.
    fn parse_gemini_error(err: impl std::fmt::Display) -> GenerationError {
        let err_msg = err.to_string();

        if let Some(status_code) = Self::extract_status_code(&err_msg) {
            GenerationError::new(GenerationErrorKind::HttpError {
                status_code,
                message: err_msg,
            })
        } else {
            GenerationError::new(GenerationErrorKind::ApiRequest(err_msg))
        }
    }

    /// Extract HTTP status code from error message string.
    ///
    /// Parses strings like "bad response from server; code 503; description: ..."
    fn extract_status_code(error_msg: &str) -> Option<u16> {
        let code_start = error_msg.find("code ")?;
        let code_str = &error_msg[code_start + 5..];
        let end = code_str
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(code_str.len());
        code_str[..end].parse().ok()
    }
}

#[async_trait]
impl GenerationDriver for GeminiClient {
    #[instrument(skip(self, req), fields(model = %self.model_name, structured = req.response_format.is_structured()))]
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        self.generate_internal(req).await.map_err(Into::into)
    }

    fn has_credential(&self) -> bool {
        self.api_key().is_ok()
    }

    fn credential_name(&self) -> &str {
        &self.credential_env
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
