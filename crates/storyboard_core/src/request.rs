//! Storyboard requests and the scene count they imply.

use crate::SCENES_PER_MINUTE;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use storyboard_error::{GenerationError, GenerationErrorKind};

/// Number of scenes a storyboard of `duration_minutes` must contain.
///
/// Computed as `round(minutes × 6)` with a floor of one scene. The draft and
/// scene calls both use this function so their counts always agree.
///
/// # Examples
///
/// ```
/// use storyboard_core::target_scene_count;
///
/// assert_eq!(target_scene_count(1), 6);
/// assert_eq!(target_scene_count(3), 18);
/// assert_eq!(target_scene_count(0), 1);
/// ```
pub fn target_scene_count(duration_minutes: u32) -> usize {
    let scenes = (f64::from(duration_minutes) * f64::from(SCENES_PER_MINUTE)).round() as usize;
    scenes.max(1)
}

/// How much the character's appearance may vary between scenes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyMode {
    /// Appearance text must be identical in every scene
    #[default]
    Strict,
    /// Minor, narrative-justified drift is allowed
    Relaxed,
}

impl ConsistencyMode {
    /// Mode for the "allow variations" toggle.
    pub fn from_allow_variations(allow_variations: bool) -> Self {
        if allow_variations {
            ConsistencyMode::Relaxed
        } else {
            ConsistencyMode::Strict
        }
    }

    /// True in relaxed mode.
    pub fn allows_variations(&self) -> bool {
        matches!(self, ConsistencyMode::Relaxed)
    }
}

/// What the user asked for.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ConsistencyMode, StoryboardRequest};
///
/// let request = StoryboardRequest::new("A lighthouse keeper finds a message in a bottle", 1)
///     .unwrap()
///     .with_dialogue("Who sent this?");
///
/// assert_eq!(request.target_scene_count(), 6);
/// assert_eq!(*request.mode(), ConsistencyMode::Strict);
/// assert_eq!(request.dialogue().as_deref(), Some("Who sent this?"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct StoryboardRequest {
    /// Story topic
    topic: String,
    /// Line that must appear verbatim in the story
    dialogue: Option<String>,
    /// Requested length in whole minutes, at least one
    duration_minutes: u32,
    /// Appearance consistency mode
    mode: ConsistencyMode,
}

impl StoryboardRequest {
    /// Creates a strict-mode request without dialogue.
    ///
    /// The duration is coerced to at least one minute.
    ///
    /// # Errors
    ///
    /// Returns `EmptyTopic` if the topic is empty or whitespace.
    pub fn new(topic: impl Into<String>, duration_minutes: u32) -> Result<Self, GenerationError> {
        let topic = topic.into();
        if topic.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyTopic));
        }
        Ok(Self {
            topic,
            dialogue: None,
            duration_minutes: duration_minutes.max(1),
            mode: ConsistencyMode::default(),
        })
    }

    /// Sets the mandatory dialogue line. Blank lines are treated as absent.
    pub fn with_dialogue(mut self, dialogue: impl Into<String>) -> Self {
        let dialogue = dialogue.into();
        self.dialogue = if dialogue.trim().is_empty() {
            None
        } else {
            Some(dialogue)
        };
        self
    }

    /// Sets the consistency mode.
    pub fn with_mode(mut self, mode: ConsistencyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Scene count for this request's duration.
    pub fn target_scene_count(&self) -> usize {
        target_scene_count(self.duration_minutes)
    }
}
