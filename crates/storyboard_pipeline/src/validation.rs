//! Post-decode checks on the scene list.

use storyboard_core::{ConsistencyMode, SCENE_DURATION_SECONDS, Scene};
use storyboard_error::{GenerationError, GenerationErrorKind};
use tracing::{debug, instrument};

/// Check a decoded scene list against the requested shape.
///
/// The list must hold exactly `expected` scenes numbered 1, 2, 3, ... in
/// order, each [`SCENE_DURATION_SECONDS`] long with a non-blank appearance.
/// In strict mode every scene repeats the first scene's appearance text byte
/// for byte; in relaxed mode the text may drift.
///
/// # Errors
///
/// Returns a decode-class [`GenerationError`] describing the first problem found.
///
/// # Examples
///
/// ```
/// use storyboard_core::{ConsistencyMode, SCENE_DURATION_SECONDS, Scene};
/// use storyboard_pipeline::validate_scenes;
///
/// let scene = |n: u32| {
///     Scene::builder()
///         .scene_number(n)
///         .setting("Pier")
///         .character_appearance("Tall woman, red scarf")
///         .action("Waits")
///         .camera_angle("Wide shot")
///         .build()
///         .unwrap()
/// };
///
/// assert!(validate_scenes(&[scene(1), scene(2)], 2, ConsistencyMode::Strict).is_ok());
/// assert!(validate_scenes(&[scene(1)], 2, ConsistencyMode::Strict).is_err());
/// ```
#[instrument(skip(scenes), fields(actual = scenes.len()))]
pub fn validate_scenes(
    scenes: &[Scene],
    expected: usize,
    mode: ConsistencyMode,
) -> Result<(), GenerationError> {
    if scenes.len() != expected {
        return Err(GenerationError::new(
            GenerationErrorKind::SceneCountMismatch {
                expected,
                actual: scenes.len(),
            },
        ));
    }

    for (index, scene) in scenes.iter().enumerate() {
        let position = index + 1;
        if *scene.scene_number() as usize != position {
            return Err(GenerationError::new(GenerationErrorKind::SceneOrder {
                position,
                found: *scene.scene_number(),
            }));
        }
        if *scene.duration() != SCENE_DURATION_SECONDS {
            return Err(GenerationError::new(GenerationErrorKind::SceneDuration {
                scene: *scene.scene_number(),
                found: *scene.duration(),
            }));
        }
        if scene.character_appearance().trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::EmptyAppearance(
                *scene.scene_number(),
            )));
        }
    }

    if mode == ConsistencyMode::Strict {
        let reference = scenes.first().map(Scene::character_appearance);
        // Byte comparison; whitespace differences count as drift.
        if let Some(drifted) = scenes
            .iter()
            .find(|s| Some(s.character_appearance()) != reference)
        {
            return Err(GenerationError::new(
                GenerationErrorKind::InconsistentAppearance(*drifted.scene_number()),
            ));
        }
    }

    debug!("Scene list passed validation");
    Ok(())
}
