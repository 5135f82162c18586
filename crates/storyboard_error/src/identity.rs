//! Identity token error types.

/// Failure to decode a sign-in identity token.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Identity Error: {} at line {} in {}", message, line, file)]
pub struct IdentityError {
    /// What was wrong with the token
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl IdentityError {
    /// Create a new IdentityError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyboard_error::IdentityError;
    ///
    /// let err = IdentityError::new("token has 2 segments, expected 3");
    /// assert!(format!("{}", err).contains("Identity Error"));
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
