//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message sent to the model.
///
/// # Examples
///
/// ```
/// use storyboard_core::Role;
///
/// assert_ne!(Role::User, Role::Model);
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Role {
    /// Prompt text written by the application on the user's behalf
    User,
    /// Earlier model output replayed as context
    Model,
}
