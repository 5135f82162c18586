//! Generation command handlers.

use super::{DraftArgs, RunArgs, ScenesArgs};
use std::path::Path;
use storyboard::{StoryboardConfig, StoryboardResult};
#[cfg(feature = "gemini")]
use storyboard::{
    GeminiClient, InMemoryActivityStore, IoError, PipelineController, StoryboardGenerator,
    StoryboardRequest, UserIdentity, export_json, write_export,
};
#[cfg(feature = "gemini")]
use std::sync::Arc;
#[cfg(feature = "gemini")]
use tracing::info;

/// Identity used by `run` when neither an email nor a token is given.
#[cfg(feature = "gemini")]
const DEFAULT_EMAIL: &str = "storyboard@localhost";

/// Load configuration from an explicit file or the usual search path.
pub fn load_config(path: Option<&Path>) -> StoryboardResult<StoryboardConfig> {
    match path {
        Some(path) => StoryboardConfig::from_file(path),
        None => StoryboardConfig::load(),
    }
}

#[cfg(not(feature = "gemini"))]
fn no_backend() -> storyboard::StoryboardError {
    storyboard::ConfigError::new("storyboard was built without the gemini feature").into()
}

/// Generate a draft and print it to stdout.
#[cfg(feature = "gemini")]
pub async fn run_draft(config: &StoryboardConfig, args: &DraftArgs) -> StoryboardResult<()> {
    let generator =
        StoryboardGenerator::from_config(GeminiClient::from_config(config.model()), config);
    let draft = generator
        .request_draft(&args.topic, args.dialogue.as_deref(), args.minutes)
        .await?;
    println!("{}", draft);
    Ok(())
}

/// Generate a draft and print it to stdout.
#[cfg(not(feature = "gemini"))]
pub async fn run_draft(_config: &StoryboardConfig, _args: &DraftArgs) -> StoryboardResult<()> {
    Err(no_backend())
}

/// Decompose a draft file into scenes and print the export JSON.
#[cfg(feature = "gemini")]
pub async fn run_scenes(config: &StoryboardConfig, args: &ScenesArgs) -> StoryboardResult<()> {
    let draft = std::fs::read_to_string(&args.draft_file).map_err(|e| {
        IoError::new(format!(
            "Failed to read draft {}: {}",
            args.draft_file.display(),
            e
        ))
    })?;

    let generator =
        StoryboardGenerator::from_config(GeminiClient::from_config(config.model()), config);
    let scenes = generator
        .request_scenes(&draft, args.minutes, args.relaxed)
        .await?;
    println!("{}", export_json(&scenes)?);
    Ok(())
}

/// Decompose a draft file into scenes and print the export JSON.
#[cfg(not(feature = "gemini"))]
pub async fn run_scenes(_config: &StoryboardConfig, _args: &ScenesArgs) -> StoryboardResult<()> {
    Err(no_backend())
}

/// Drive a whole session through the controller and export the result.
#[cfg(feature = "gemini")]
pub async fn run_pipeline(config: &StoryboardConfig, args: &RunArgs) -> StoryboardResult<()> {
    let mut controller = PipelineController::from_config(
        GeminiClient::from_config(config.model()),
        config,
        Arc::new(InMemoryActivityStore::new()),
    );

    match &args.token {
        Some(token) => controller.login_with_token(token)?,
        None => controller.login(UserIdentity::from_email(
            args.email.as_deref().unwrap_or(DEFAULT_EMAIL),
        ))?,
    }

    let request = StoryboardRequest::new(&args.topic, args.minutes)?
        .with_dialogue(args.dialogue.clone().unwrap_or_default());
    controller.submit_draft_request(request).await?;
    if let Some(draft) = controller.stage().draft() {
        info!(chars = draft.len(), "Draft ready");
        eprintln!("{}\n", draft);
    }

    controller.set_allow_variations(args.relaxed)?;
    controller.submit_scene_request().await?;

    let scenes = controller.stage().scenes().unwrap_or_default();
    let path = write_export(&args.out_dir, scenes, chrono::Utc::now())?;
    println!("{}", path.display());
    Ok(())
}

/// Drive a whole session through the controller and export the result.
#[cfg(not(feature = "gemini"))]
pub async fn run_pipeline(_config: &StoryboardConfig, _args: &RunArgs) -> StoryboardResult<()> {
    Err(no_backend())
}
