//! Storyboard scenes.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Length of every scene, in seconds.
pub const SCENE_DURATION_SECONDS: u32 = 10;

/// Scenes needed to fill one minute of storyboard.
pub const SCENES_PER_MINUTE: u32 = 60 / SCENE_DURATION_SECONDS;

fn default_duration() -> u32 {
    SCENE_DURATION_SECONDS
}

/// One fixed-duration unit of a storyboard.
///
/// Scenes are only created by decoding the model's scene list and are never
/// mutated afterwards. Field names serialize in camelCase, matching the
/// response schema sent to the model.
///
/// # Examples
///
/// ```
/// use storyboard_core::Scene;
///
/// let scene = Scene::builder()
///     .scene_number(1u32)
///     .setting("A storm-battered lighthouse at dusk")
///     .character_appearance("Elderly man, grey beard, yellow oilskin coat")
///     .action("He climbs the spiral stairs")
///     .camera_angle("Low angle")
///     .build()
///     .unwrap();
///
/// assert_eq!(*scene.duration(), 10);
/// assert!(scene.dialogue().is_empty());
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
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Scene {
    /// 1-based position in the storyboard
    scene_number: u32,
    /// Scene length in seconds
    #[serde(default = "default_duration")]
    #[builder(default = "SCENE_DURATION_SECONDS")]
    duration: u32,
    /// Where the scene happens
    setting: String,
    /// Reusable description of the main character's look
    character_appearance: String,
    /// What happens
    action: String,
    /// Spoken line, empty when the scene is silent
    #[serde(default)]
    #[builder(default)]
    dialogue: String,
    /// Camera framing label
    camera_angle: String,
    /// Lighting label
    #[serde(default)]
    #[builder(default)]
    lighting: String,
    /// Mood label
    #[serde(default)]
    #[builder(default)]
    mood: String,
}

impl Scene {
    /// Creates a new builder.
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// True when the scene carries a spoken line.
    pub fn has_dialogue(&self) -> bool {
        !self.dialogue.trim().is_empty()
    }
}
