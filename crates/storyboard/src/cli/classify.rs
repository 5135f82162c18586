//! Error classification command handler.

use storyboard::{ErrorClassifier, StoryboardConfig};

/// Print the category and user-facing message for a raw error message.
pub fn classify_message(config: &StoryboardConfig, message: &str) {
    let classifier = ErrorClassifier::new(*config.pipeline().error_message_limit());
    let classified = classifier.classify_message(message);
    println!("{}: {}", classified.category(), classified.message());
}
