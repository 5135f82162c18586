//! Draft and scene generation against a [`GenerationDriver`].

use crate::{draft_prompt, scene_response_schema, scenes_prompt, validate_scenes};
use storyboard_core::{
    ConsistencyMode, GenerateRequest, Message, ModelConfig, ResponseFormat, Scene,
    StoryboardConfig, target_scene_count,
};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;
use tracing::{debug, info, instrument, warn};

/// Strip a surrounding markdown code fence (```` ```json ... ``` ````) if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening line.
    let body = match body.find('\n') {
        Some(newline) => &body[newline + 1..],
        None => body,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Decode the model's scene JSON into scenes.
///
/// A surrounding markdown code fence is tolerated.
///
/// # Errors
///
/// `EmptyResult` for blank text, `Decode` when the text is not a JSON array
/// of scene objects.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::decode_scenes;
///
/// let text = r#"```json
/// [{"sceneNumber":1,"duration":10,"setting":"Pier","characterAppearance":"Tall woman",
///   "action":"Waits","cameraAngle":"Wide shot"}]
/// ```"#;
/// let scenes = decode_scenes(text).unwrap();
/// assert_eq!(scenes.len(), 1);
/// assert_eq!(scenes[0].setting(), "Pier");
/// ```
pub fn decode_scenes(text: &str) -> Result<Vec<Scene>, GenerationError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResult));
    }
    serde_json::from_str(body)
        .map_err(|e| GenerationError::new(GenerationErrorKind::Decode(e.to_string())))
}

/// Turns storyboard requests into prompts, driver calls and scenes.
///
/// The generator owns no state besides its settings; each call is a single
/// request to the driver and is never retried.
///
/// # Example
///
/// ```rust,ignore
/// let generator = StoryboardGenerator::new(GeminiClient::new());
/// let draft = generator.request_draft("A lighthouse keeper finds a message", None, 1).await?;
/// let scenes = generator.request_scenes(&draft, 1, false).await?;
/// assert_eq!(scenes.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct StoryboardGenerator<D> {
    driver: D,
    validate: bool,
    temperature: Option<f32>,
    draft_system_instruction: Option<String>,
    scenes_system_instruction: Option<String>,
}

impl<D: GenerationDriver> StoryboardGenerator<D> {
    /// Generator with default settings and validation enabled.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            validate: true,
            temperature: None,
            draft_system_instruction: None,
            scenes_system_instruction: None,
        }
    }

    /// Generator using the model and pipeline sections of a configuration.
    pub fn from_config(driver: D, config: &StoryboardConfig) -> Self {
        Self::new(driver)
            .with_model_settings(config.model())
            .with_validation(*config.pipeline().validate_scenes())
    }

    /// Toggle post-decode validation of the scene list.
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Apply temperature and system instructions from a model configuration.
    pub fn with_model_settings(mut self, model: &ModelConfig) -> Self {
        self.temperature = *model.temperature();
        self.draft_system_instruction = model.draft_system_instruction().clone();
        self.scenes_system_instruction = model.scenes_system_instruction().clone();
        self
    }

    /// The underlying driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Whether scene lists are validated after decoding.
    pub fn validates(&self) -> bool {
        self.validate
    }

    fn ensure_credential(&self) -> Result<(), GenerationError> {
        if self.driver.has_credential() {
            Ok(())
        } else {
            warn!(
                credential = self.driver.credential_name(),
                "No API credential configured"
            );
            Err(GenerationError::new(
                GenerationErrorKind::MissingCredential(self.driver.credential_name().to_string()),
            ))
        }
    }

    fn build_request(
        &self,
        prompt: String,
        system_instruction: Option<&String>,
        response_format: ResponseFormat,
    ) -> GenerateRequest {
        GenerateRequest {
            messages: vec![Message::user(prompt)],
            system_instruction: system_instruction.cloned(),
            response_format,
            temperature: self.temperature,
            model: None,
        }
    }

    /// Request the free-text draft story.
    ///
    /// # Errors
    ///
    /// `EmptyTopic` for a blank topic, `MissingCredential` before any network
    /// call when the driver has no credential, `EmptyResult` for blank output.
    /// Provider errors are returned unchanged.
    #[instrument(skip(self, topic, dialogue), fields(provider = self.driver.provider_name(), minutes = duration_minutes))]
    pub async fn request_draft(
        &self,
        topic: &str,
        dialogue: Option<&str>,
        duration_minutes: u32,
    ) -> StoryboardResult<String> {
        if topic.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyTopic).into());
        }
        self.ensure_credential()?;

        let minutes = duration_minutes.max(1);
        let prompt = draft_prompt(topic, dialogue, minutes);
        debug!(prompt_len = prompt.len(), "Requesting draft");

        let request = self.build_request(
            prompt,
            self.draft_system_instruction.as_ref(),
            ResponseFormat::Text,
        );
        let response = self.driver.generate(&request).await?;

        let text = response.text.trim();
        if text.is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyResult).into());
        }

        info!(chars = text.len(), "Draft generated");
        Ok(text.to_string())
    }

    /// Request the structured scene list for a (possibly edited) draft.
    ///
    /// # Errors
    ///
    /// `MissingCredential` and `EmptyResult` as for the draft call, `Decode`
    /// for output that is not a scene array, and when validation is enabled
    /// the count, order and appearance failures of [`validate_scenes`].
    #[instrument(skip(self, narrative), fields(provider = self.driver.provider_name(), minutes = duration_minutes))]
    pub async fn request_scenes(
        &self,
        narrative: &str,
        duration_minutes: u32,
        allow_variations: bool,
    ) -> StoryboardResult<Vec<Scene>> {
        self.ensure_credential()?;

        let minutes = duration_minutes.max(1);
        let expected = target_scene_count(minutes);
        let mode = ConsistencyMode::from_allow_variations(allow_variations);
        let prompt = scenes_prompt(narrative, minutes, mode);
        debug!(expected, %mode, "Requesting scenes");

        let request = self.build_request(
            prompt,
            self.scenes_system_instruction.as_ref(),
            ResponseFormat::Json(scene_response_schema()),
        );
        let response = self.driver.generate(&request).await?;

        let scenes = decode_scenes(&response.text)?;
        if self.validate {
            validate_scenes(&scenes, expected, mode)?;
        }

        info!(scenes = scenes.len(), "Scenes generated");
        Ok(scenes)
    }
}
