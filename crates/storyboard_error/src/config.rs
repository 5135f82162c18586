//! Configuration loading errors.

/// Failure to read, layer or deserialize `storyboard.toml`.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Which step failed and what the `config` crate reported
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Configuration error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::{ConfigError, StoryboardError};
    ///
    /// let err = ConfigError::new("Failed to parse configuration: invalid type for pipeline.validate_scenes");
    /// let wrapped: StoryboardError = err.into();
    /// assert!(wrapped.summary().contains("pipeline.validate_scenes"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
