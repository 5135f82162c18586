//! Trait definitions for text-generation backends.

use async_trait::async_trait;
use std::sync::Arc;
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::StoryboardResult;

/// Core trait that every generation backend implements.
///
/// A backend accepts a prompt, an optional system instruction and an optional
/// response schema, and answers with free text or schema-conformant JSON text.
/// Provider failures (rate limits, bad credentials, overload, safety blocks)
/// are returned as errors without retrying.
#[async_trait]
pub trait GenerationDriver: Send + Sync {
    /// Generate model output for a request.
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse>;

    /// Whether an API credential is available right now.
    ///
    /// Checked before every request so that a missing credential fails
    /// without touching the network.
    fn has_credential(&self) -> bool;

    /// Name of the credential the backend reads (e.g., `GEMINI_API_KEY`).
    fn credential_name(&self) -> &str;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: GenerationDriver + ?Sized> GenerationDriver for Arc<T> {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        (**self).generate(req).await
    }

    fn has_credential(&self) -> bool {
        (**self).has_credential()
    }

    fn credential_name(&self) -> &str {
        (**self).credential_name()
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
