//! Signed-in user identities.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_error::IdentityError;
use tracing::{debug, instrument};

/// The user a session belongs to.
///
/// # Examples
///
/// ```
/// use storyboard_core::UserIdentity;
///
/// let user = UserIdentity::builder()
///     .email("keeper@example.com")
///     .name("Lighthouse Keeper")
///     .build()
///     .unwrap();
///
/// assert_eq!(user.email(), "keeper@example.com");
/// assert!(user.avatar_url().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct UserIdentity {
    /// Account email, also the activity key
    email: String,
    /// Display name
    name: String,
    /// Profile picture URL
    #[builder(default, setter(into, strip_option))]
    avatar_url: Option<String>,
}

impl UserIdentity {
    /// Creates a new builder.
    pub fn builder() -> UserIdentityBuilder {
        UserIdentityBuilder::default()
    }

    /// Identity from an email alone, with the local part as display name.
    pub fn from_email(email: impl Into<String>) -> Self {
        let email = email.into();
        let name = email.split('@').next().unwrap_or_default().to_string();
        Self {
            email,
            name,
            avatar_url: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct IdentityClaims {
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// Decode the payload of a signed identity token (JWT) into a [`UserIdentity`].
///
/// Only the payload segment is read; the signature is not verified.
///
/// # Errors
///
/// Fails when the token does not have three segments, the payload is not
/// base64url, the claims are not JSON, or the `email` claim is missing.
///
/// # Examples
///
/// ```
/// use storyboard_core::decode_identity_token;
///
/// // {"email":"a@b.io","name":"Ada"}
/// let token = "eyJhbGciOiJSUzI1NiJ9.eyJlbWFpbCI6ImFAYi5pbyIsIm5hbWUiOiJBZGEifQ.c2ln";
/// let user = decode_identity_token(token).unwrap();
/// assert_eq!(user.email(), "a@b.io");
/// assert_eq!(user.name(), "Ada");
/// ```
#[instrument(skip(token))]
pub fn decode_identity_token(token: &str) -> Result<UserIdentity, IdentityError> {
    let segments: Vec<&str> = token.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(IdentityError::new(format!(
            "token has {} segments, expected 3",
            segments.len()
        )));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| IdentityError::new(format!("payload is not base64url: {}", e)))?;

    let claims: IdentityClaims = serde_json::from_slice(&payload)
        .map_err(|e| IdentityError::new(format!("payload is not valid JSON: {}", e)))?;

    let email = claims
        .email
        .filter(|e| !e.trim().is_empty())
        .ok_or_else(|| IdentityError::new("token has no email claim"))?;

    let mut identity = UserIdentity::from_email(email);
    if let Some(name) = claims.name.filter(|n| !n.trim().is_empty()) {
        identity.name = name;
    }
    identity.avatar_url = claims.picture;

    debug!(email = %identity.email, "Decoded identity token");
    Ok(identity)
}
