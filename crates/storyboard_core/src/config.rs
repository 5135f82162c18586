//! Configuration loading.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from storyboard.toml)
//! - User overrides (~/.config/storyboard/storyboard.toml, then ./storyboard.toml)
//! - An explicit file given on the command line

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use storyboard_error::{ConfigError, StoryboardResult};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../storyboard.toml");

fn default_model_name() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_credential_env() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_validate_scenes() -> bool {
    true
}

fn default_error_message_limit() -> usize {
    150
}

/// Generation model settings.
///
/// ```toml
/// [model]
/// name = "gemini-2.5-flash"
/// credential_env = "GEMINI_API_KEY"
/// temperature = 0.9
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct ModelConfig {
    /// Model identifier
    #[serde(default = "default_model_name")]
    name: String,
    /// Environment variable holding the API key
    #[serde(default = "default_credential_env")]
    credential_env: String,
    /// Sampling temperature for both calls
    #[serde(default)]
    temperature: Option<f32>,
    /// System instruction for the draft call
    #[serde(default)]
    draft_system_instruction: Option<String>,
    /// System instruction for the scene call
    #[serde(default)]
    scenes_system_instruction: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            credential_env: default_credential_env(),
            temperature: None,
            draft_system_instruction: None,
            scenes_system_instruction: None,
        }
    }
}

/// Pipeline behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct PipelineConfig {
    /// Check scene count and appearance consistency after decoding
    #[serde(default = "default_validate_scenes")]
    validate_scenes: bool,
    /// Characters of the raw message kept in fallback error messages
    #[serde(default = "default_error_message_limit")]
    error_message_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            validate_scenes: default_validate_scenes(),
            error_message_limit: default_error_message_limit(),
        }
    }
}

/// Credentials for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Default)]
pub struct AdminConfig {
    /// Admin user name
    #[serde(default)]
    username: String,
    /// Admin password
    #[serde(default)]
    password: String,
}

impl AdminConfig {
    /// Admin credentials from explicit values.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when both fields match and an admin account is configured.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        !self.username.is_empty() && self.username == username && self.password == password
    }
}

/// Top-level Storyboard configuration.
///
/// # Example
///
/// ```no_run
/// use storyboard_core::StoryboardConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = StoryboardConfig::load()?;
/// println!("Model: {}", config.model().name());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    Default,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct StoryboardConfig {
    /// Model settings
    #[serde(default)]
    model: ModelConfig,
    /// Pipeline settings
    #[serde(default)]
    pipeline: PipelineConfig,
    /// Admin dashboard credentials
    #[serde(default)]
    admin: AdminConfig,
}

impl StoryboardConfig {
    /// Parse configuration from TOML text, without the bundled defaults.
    pub fn from_toml_str(toml: &str) -> StoryboardResult<Self> {
        Self::build(Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    /// Load the bundled defaults overridden by a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> StoryboardResult<Self> {
        debug!("Loading configuration from file");
        Self::build(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> StoryboardResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/storyboard/storyboard.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("storyboard").required(false));

        Self::build(builder)
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> StoryboardResult<Self> {
        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)).into())
    }
}
