//! Scene export and parse errors.

/// Failure to serialize or parse a scene export document.
///
/// Decode failures of the model's own scene JSON are
/// [`GenerationErrorKind::Decode`](crate::GenerationErrorKind::Decode)
/// instead, because they classify as malformed model output.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What serde_json reported, with the document it was handling
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl JsonError {
    /// Export error at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::JsonError;
    ///
    /// let err = JsonError::new("Failed to parse exported scenes: missing field `sceneNumber`");
    /// assert!(err.message.contains("sceneNumber"));
    /// assert!(err.to_string().starts_with("JSON Error: Failed to parse exported scenes"));
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
