//! Generation error types.

/// Failure conditions of the draft and scene generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// No API credential in the environment
    #[display("Missing credential: {} environment variable not set", _0)]
    MissingCredential(String),
    /// The endpoint answered without any text
    #[display("Generation returned an empty result")]
    EmptyResult,
    /// Structured output was not valid JSON or did not match the scene shape
    #[display("Failed to decode scene JSON: {}", _0)]
    Decode(String),
    /// The decoded scene list has the wrong length
    #[display("Malformed scene list: expected {} scenes, got {}", expected, actual)]
    SceneCountMismatch {
        /// Target scene count for the requested duration
        expected: usize,
        /// Number of scenes the model produced
        actual: usize,
    },
    /// Scene numbers are not 1, 2, 3, ... in order
    #[display("Malformed scene list: scene at position {} is numbered {}", position, found)]
    SceneOrder {
        /// 1-based position in the decoded list
        position: usize,
        /// Scene number the model gave it
        found: u32,
    },
    /// Strict mode scene whose appearance differs from the first scene
    #[display("Malformed scene list: character appearance in scene {} differs from scene 1", _0)]
    InconsistentAppearance(u32),
    /// Scene length differs from the fixed scene duration
    #[display("Malformed scene list: scene {} lasts {} seconds", scene, found)]
    SceneDuration {
        /// Scene number
        scene: u32,
        /// Duration the model gave it
        found: u32,
    },
    /// Scene without any appearance description
    #[display("Malformed scene list: scene {} has an empty character appearance", _0)]
    EmptyAppearance(u32),
    /// Topic was empty or whitespace
    #[display("Topic must not be empty")]
    EmptyTopic,
    /// Failed to create the provider client
    #[display("Failed to create Gemini client: {}", _0)]
    ClientCreation(String),
    /// API request failed without a recognizable status code
    #[display("Gemini API request failed: {}", _0)]
    ApiRequest(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    HttpError {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Provider refused to answer because of its content filter
    #[display("Response blocked by safety filter: {}", _0)]
    Blocked(String),
}

impl GenerationErrorKind {
    /// True for failures produced while decoding or validating the scene list.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::GenerationErrorKind;
    ///
    /// assert!(GenerationErrorKind::Decode("eof".into()).is_decode_failure());
    /// assert!(!GenerationErrorKind::EmptyResult.is_decode_failure());
    /// ```
    pub fn is_decode_failure(&self) -> bool {
        matches!(
            self,
            GenerationErrorKind::Decode(_)
                | GenerationErrorKind::SceneCountMismatch { .. }
                | GenerationErrorKind::SceneOrder { .. }
                | GenerationErrorKind::SceneDuration { .. }
                | GenerationErrorKind::InconsistentAppearance(_)
                | GenerationErrorKind::EmptyAppearance(_)
        )
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use storyboard_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingCredential(
///     "GEMINI_API_KEY".to_string(),
/// ));
/// assert!(format!("{}", err).contains("GEMINI_API_KEY"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
