//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, IdentityError, IoError, JsonError, PipelineError,
};

/// Every failure the Storyboard crates can report.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardError, JsonError};
///
/// let json_err = JsonError::new("expected value");
/// let err: StoryboardError = json_err.into();
/// assert!(format!("{}", err).contains("JSON Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum StoryboardErrorKind {
    /// Draft or scene generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Controller transition error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Identity token error
    #[from(IdentityError)]
    Identity(IdentityError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Filesystem error
    #[from(IoError)]
    Io(IoError),
}

/// Storyboard error with kind discrimination.
///
/// # Examples
///
/// ```
/// use storyboard_error::{StoryboardResult, ConfigError};
///
/// fn might_fail() -> StoryboardResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Storyboard Error: {}", _0)]
pub struct StoryboardError(Box<StoryboardErrorKind>);

impl StoryboardError {
    /// Create a new error from a kind.
    pub fn new(kind: StoryboardErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &StoryboardErrorKind {
        &self.0
    }

    /// Generation error kind, if this is a generation failure.
    pub fn generation_kind(&self) -> Option<&crate::GenerationErrorKind> {
        match self.kind() {
            StoryboardErrorKind::Generation(e) => Some(&e.kind),
            _ => None,
        }
    }

    /// The failure description without wrapper prefixes or source locations.
    ///
    /// Line numbers and file paths are left out so that text matching on the
    /// result only sees what actually went wrong.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardError};
    ///
    /// let err: StoryboardError = GenerationError::new(GenerationErrorKind::EmptyResult).into();
    /// assert_eq!(err.summary(), "Generation returned an empty result");
    /// ```
    pub fn summary(&self) -> String {
        match self.kind() {
            StoryboardErrorKind::Generation(e) => e.kind.to_string(),
            StoryboardErrorKind::Pipeline(e) => e.kind.to_string(),
            StoryboardErrorKind::Identity(e) => e.message.clone(),
            StoryboardErrorKind::Config(e) => e.message.clone(),
            StoryboardErrorKind::Json(e) => e.message.clone(),
            StoryboardErrorKind::Io(e) => e.message.clone(),
        }
    }
}

// Generic From implementation for any type that converts to StoryboardErrorKind
impl<T> From<T> for StoryboardError
where
    T: Into<StoryboardErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Storyboard operations.
pub type StoryboardResult<T> = std::result::Result<T, StoryboardError>;
