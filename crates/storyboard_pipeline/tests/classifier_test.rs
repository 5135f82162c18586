//! Tests for failure classification.

use storyboard_error::{
    GenerationError, GenerationErrorKind, IdentityError, PipelineError, PipelineErrorKind,
    StoryboardError,
};
use storyboard_pipeline::{ErrorCategory, ErrorClassifier};

fn category(message: &str) -> ErrorCategory {
    *ErrorClassifier::default().classify_message(message).category()
}

fn classify_kind(kind: GenerationErrorKind) -> ErrorCategory {
    let error: StoryboardError = GenerationError::new(kind).into();
    *ErrorClassifier::default().classify(&error).category()
}

#[test]
fn test_each_category_has_a_trigger() {
    assert_eq!(
        category("Missing credential: GEMINI_API_KEY environment variable not set"),
        ErrorCategory::MissingCredential
    );
    assert_eq!(category("HTTP 429 error: slow down"), ErrorCategory::RateLimited);
    assert_eq!(category("API key not valid. Please pass a valid API key."), ErrorCategory::Authentication);
    assert_eq!(category("HTTP 503 error: The model is overloaded"), ErrorCategory::ServiceUnavailable);
    assert_eq!(category("error sending request: connection refused"), ErrorCategory::Network);
    assert_eq!(category("Unexpected token < in JSON at position 0"), ErrorCategory::MalformedResponse);
    assert_eq!(category("Response blocked by safety filter: SAFETY"), ErrorCategory::SafetyBlocked);
    assert_eq!(category("the moon fell over"), ErrorCategory::Unknown);
}

#[test]
fn test_quota_beats_server_error() {
    assert_eq!(
        category("Quota exceeded for requests (status 500)"),
        ErrorCategory::RateLimited
    );
}

#[test]
fn test_missing_credential_beats_everything() {
    assert_eq!(
        category("Missing credential: quota 429 401 503 network json safety"),
        ErrorCategory::MissingCredential
    );
}

#[test]
fn test_matching_ignores_case() {
    assert_eq!(category("RESOURCE_EXHAUSTED"), ErrorCategory::RateLimited);
    assert_eq!(category("PERMISSION_DENIED"), ErrorCategory::Authentication);
}

#[test]
fn test_unknown_message_is_truncated() {
    let raw = "x".repeat(400);
    let classified = ErrorClassifier::default().classify_message(&raw);
    assert_eq!(*classified.category(), ErrorCategory::Unknown);
    assert!(classified.message().starts_with("Something went wrong: "));
    assert!(classified.message().contains(&"x".repeat(150)));
    assert!(!classified.message().contains(&"x".repeat(151)));
    assert_eq!(classified.detail(), &raw);
}

#[test]
fn test_custom_limit() {
    let classified = ErrorClassifier::new(10).classify_message("abcdefghijklmnop");
    assert_eq!(classified.message(), "Something went wrong: abcdefghij...");
}

#[test]
fn test_known_categories_use_fixed_messages() {
    let classified = ErrorClassifier::default().classify_message("HTTP 401 error: denied");
    assert_eq!(classified.message(), ErrorCategory::Authentication.user_message());
    assert_eq!(classified.to_string(), classified.message().as_str());
}

#[test]
fn test_generation_errors_classify_by_kind() {
    assert_eq!(
        classify_kind(GenerationErrorKind::MissingCredential("GEMINI_API_KEY".into())),
        ErrorCategory::MissingCredential
    );
    assert_eq!(
        classify_kind(GenerationErrorKind::Decode("expected value at line 1".into())),
        ErrorCategory::MalformedResponse
    );
    assert_eq!(classify_kind(GenerationErrorKind::EmptyResult), ErrorCategory::MalformedResponse);
    assert_eq!(
        classify_kind(GenerationErrorKind::Blocked("SAFETY".into())),
        ErrorCategory::SafetyBlocked
    );
    assert_eq!(
        classify_kind(GenerationErrorKind::HttpError {
            status_code: 503,
            message: "Service Unavailable".into()
        }),
        ErrorCategory::ServiceUnavailable
    );
}

#[test]
fn test_scene_counts_never_look_like_status_codes() {
    assert_eq!(
        classify_kind(GenerationErrorKind::SceneCountMismatch {
            expected: 504,
            actual: 429
        }),
        ErrorCategory::MalformedResponse
    );
}

#[test]
fn test_source_location_is_not_classified() {
    // Only the summary is matched, never the file or line.
    let error: StoryboardError = PipelineError::new(PipelineErrorKind::InvalidTransition {
        trigger: "edit draft".to_string(),
        stage: "Input".to_string(),
    })
    .into();
    assert_eq!(
        *ErrorClassifier::default().classify(&error).category(),
        ErrorCategory::Unknown
    );
}

#[test]
fn test_sign_in_failures_are_login_errors() {
    let classifier = ErrorClassifier::default();
    let bad_payload: StoryboardError =
        PipelineError::new(PipelineErrorKind::Login("payload is not valid JSON: eof".into()))
            .into();
    let identity: StoryboardError =
        IdentityError::new("payload is not valid JSON: expected value").into();
    let admin: StoryboardError = PipelineError::new(PipelineErrorKind::AdminAuthentication).into();

    for error in [bad_payload, identity, admin] {
        let classified = classifier.classify(&error);
        assert_eq!(*classified.category(), ErrorCategory::Login);
        assert_eq!(classified.message(), ErrorCategory::Login.user_message());
    }
}
