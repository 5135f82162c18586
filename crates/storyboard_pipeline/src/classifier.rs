//! Mapping failures to user-facing messages.
//!
//! Classification is an ordered list of [`ClassificationRule`]s evaluated on
//! the lower-cased failure text. The first matching rule wins, so the order
//! of [`ErrorClassifier::rules`] is part of the contract: a message that
//! mentions both a quota and a 500 status is a rate limit.

use derive_getters::Getters;
use storyboard_error::{
    GenerationErrorKind, PipelineErrorKind, StoryboardError, StoryboardErrorKind,
};
use tracing::debug;

/// Default number of raw-message characters kept in fallback messages.
pub const DEFAULT_MESSAGE_LIMIT: usize = 150;

/// User-facing failure categories, in rule priority order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// No API key configured
    MissingCredential,
    /// Rate limit or quota exceeded
    RateLimited,
    /// API key rejected
    Authentication,
    /// Upstream service overloaded or down
    ServiceUnavailable,
    /// Connectivity failure
    Network,
    /// Output could not be decoded
    MalformedResponse,
    /// Content filter refused the request
    SafetyBlocked,
    /// Sign-in or admin credentials rejected
    Login,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Fixed user-facing message. `Unknown` is completed by the classifier.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::MissingCredential => {
                "No API key is configured. Add your Gemini API key to the environment and try again."
            }
            ErrorCategory::RateLimited => {
                "Too many requests or the API quota is used up. Please wait a moment and try again."
            }
            ErrorCategory::Authentication => {
                "The API key was rejected. Check that it is valid and has access to the model."
            }
            ErrorCategory::ServiceUnavailable => {
                "The generation service is temporarily unavailable. Please try again in a few minutes."
            }
            ErrorCategory::Network => {
                "Could not reach the generation service. Check your internet connection and try again."
            }
            ErrorCategory::MalformedResponse => {
                "The model returned data that could not be processed. Please try again."
            }
            ErrorCategory::SafetyBlocked => {
                "The request was blocked by the content safety filter. Try rephrasing your story."
            }
            ErrorCategory::Login => {
                "Sign-in failed. Check your account or credentials and try again."
            }
            ErrorCategory::Unknown => "Something went wrong",
        }
    }
}

/// True if `text` contains `code` as a whole number.
///
/// "HTTP 429 error" contains 429, "at line 4290" does not.
fn has_status(text: &str, codes: &[u16]) -> bool {
    text.split(|c: char| !c.is_ascii_digit())
        .filter_map(|token| token.parse::<u16>().ok())
        .any(|n| codes.contains(&n))
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn is_missing_credential(text: &str) -> bool {
    contains_any(
        text,
        &["missing credential", "api key not set", "api_key not set", "no api key"],
    ) || (text.contains("environment variable") && text.contains("not set"))
}

fn is_rate_limited(text: &str) -> bool {
    contains_any(
        text,
        &["quota", "rate limit", "rate_limit", "resource_exhausted", "too many requests"],
    ) || has_status(text, &[429])
}

fn is_authentication(text: &str) -> bool {
    contains_any(
        text,
        &[
            "api key not valid",
            "invalid api key",
            "api_key_invalid",
            "unauthenticated",
            "unauthorized",
            "permission denied",
            "permission_denied",
        ],
    ) || has_status(text, &[401, 403])
}

fn is_service_unavailable(text: &str) -> bool {
    contains_any(text, &["unavailable", "overloaded", "internal error", "server error"])
        || has_status(text, &[500, 502, 503, 504])
}

fn is_network(text: &str) -> bool {
    contains_any(
        text,
        &["network", "connection", "timed out", "timeout", "dns", "failed to fetch"],
    )
}

fn is_malformed(text: &str) -> bool {
    contains_any(
        text,
        &["json", "decode", "malformed", "parse", "empty result", "unexpected token"],
    )
}

fn is_safety_blocked(text: &str) -> bool {
    contains_any(text, &["safety", "blocked", "content filter", "prohibited content"])
}

/// One `(category, predicate)` pair. Predicates see lower-cased text.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    category: ErrorCategory,
    matches: fn(&str) -> bool,
}

impl ClassificationRule {
    /// Rule from a category and predicate.
    pub fn new(category: ErrorCategory, matches: fn(&str) -> bool) -> Self {
        Self { category, matches }
    }

    /// Category this rule assigns.
    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    /// Apply the predicate to already lower-cased text.
    pub fn matches(&self, lowered: &str) -> bool {
        (self.matches)(lowered)
    }
}

/// A classified failure ready to show to a user.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_more::Display)]
#[display("{}", message)]
pub struct ClassifiedError {
    /// Chosen category
    category: ErrorCategory,
    /// Human-readable message
    message: String,
    /// Raw failure text
    detail: String,
}

/// Ordered rule list with a truncating fallback.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::{ErrorCategory, ErrorClassifier};
///
/// let classifier = ErrorClassifier::default();
/// let classified = classifier.classify_message("Quota exceeded (HTTP 500)");
/// assert_eq!(*classified.category(), ErrorCategory::RateLimited);
/// ```
#[derive(Debug, Clone)]
pub struct ErrorClassifier {
    rules: Vec<ClassificationRule>,
    message_limit: usize,
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_LIMIT)
    }
}

impl ErrorClassifier {
    /// Classifier with the standard rules and the given fallback limit.
    pub fn new(message_limit: usize) -> Self {
        Self {
            rules: vec![
                ClassificationRule::new(ErrorCategory::MissingCredential, is_missing_credential),
                ClassificationRule::new(ErrorCategory::RateLimited, is_rate_limited),
                ClassificationRule::new(ErrorCategory::Authentication, is_authentication),
                ClassificationRule::new(ErrorCategory::ServiceUnavailable, is_service_unavailable),
                ClassificationRule::new(ErrorCategory::Network, is_network),
                ClassificationRule::new(ErrorCategory::MalformedResponse, is_malformed),
                ClassificationRule::new(ErrorCategory::SafetyBlocked, is_safety_blocked),
            ],
            message_limit,
        }
    }

    /// The rules in evaluation order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Characters of raw text kept in `Unknown` messages.
    pub fn message_limit(&self) -> usize {
        self.message_limit
    }

    /// Category of a raw failure message.
    pub fn category_of(&self, message: &str) -> ErrorCategory {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(ClassificationRule::category)
            .unwrap_or(ErrorCategory::Unknown)
    }

    /// Classify a raw failure message.
    pub fn classify_message(&self, message: &str) -> ClassifiedError {
        self.classified(self.category_of(message), message)
    }

    /// Classify a Storyboard error by its location-free summary.
    ///
    /// Failures raised while decoding or validating the scene list are always
    /// malformed responses, whatever numbers their text happens to contain.
    /// Sign-in failures are always login errors, even when a token payload
    /// failed to parse.
    pub fn classify(&self, error: &StoryboardError) -> ClassifiedError {
        let summary = error.summary();
        match error.kind() {
            StoryboardErrorKind::Generation(e)
                if e.kind.is_decode_failure() || e.kind == GenerationErrorKind::EmptyResult =>
            {
                self.classified(ErrorCategory::MalformedResponse, &summary)
            }
            StoryboardErrorKind::Identity(_) => self.classified(ErrorCategory::Login, &summary),
            StoryboardErrorKind::Pipeline(e)
                if matches!(
                    e.kind,
                    PipelineErrorKind::Login(_) | PipelineErrorKind::AdminAuthentication
                ) =>
            {
                self.classified(ErrorCategory::Login, &summary)
            }
            _ => self.classify_message(&summary),
        }
    }

    fn classified(&self, category: ErrorCategory, message: &str) -> ClassifiedError {
        let user_message = match category {
            ErrorCategory::Unknown => {
                format!("{}: {}", category.user_message(), self.truncate(message))
            }
            known => known.user_message().to_string(),
        };
        debug!(%category, "Classified failure");
        ClassifiedError {
            category,
            message: user_message,
            detail: message.to_string(),
        }
    }

    fn truncate(&self, message: &str) -> String {
        let message = message.trim();
        if message.chars().count() <= self.message_limit {
            message.to_string()
        } else {
            let kept: String = message.chars().take(self.message_limit).collect();
            format!("{}...", kept)
        }
    }
}
