//! Pipeline controller error types.

/// Specific error conditions for controller transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Trigger is not accepted in the current stage
    #[display("Cannot {} while in stage {}", trigger, stage)]
    InvalidTransition {
        /// The rejected trigger
        trigger: String,
        /// Stage the controller was in
        stage: String,
    },
    /// Admin credentials did not match the configured ones
    #[display("Admin username or password is incorrect")]
    AdminAuthentication,
    /// Sign-in failed before a session could be opened
    #[display("Login failed: {}", _0)]
    Login(String),
}

/// Error type for pipeline controller operations.
///
/// # Examples
///
/// ```
/// use storyboard_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::InvalidTransition {
///     trigger: "edit draft".to_string(),
///     stage: "Input".to_string(),
/// });
/// assert!(format!("{}", err).contains("edit draft"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
