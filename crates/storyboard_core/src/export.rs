//! Scene list export and clipboard text.

use crate::Scene;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use storyboard_error::{IoError, JsonError, StoryboardResult};
use tracing::{info, instrument};

/// Serialize a scene list as pretty-printed JSON (2-space indent).
///
/// # Examples
///
/// ```
/// use storyboard_core::{Scene, export_json, parse_export};
///
/// let scenes = vec![Scene::builder()
///     .scene_number(1u32)
///     .setting("Pier")
///     .character_appearance("Tall woman, red scarf")
///     .action("Waits")
///     .camera_angle("Wide shot")
///     .build()
///     .unwrap()];
///
/// let json = export_json(&scenes).unwrap();
/// assert!(json.contains("\n  {\n    \"sceneNumber\": 1"));
/// assert_eq!(parse_export(&json).unwrap(), scenes);
/// ```
pub fn export_json(scenes: &[Scene]) -> StoryboardResult<String> {
    serde_json::to_string_pretty(scenes)
        .map_err(|e| JsonError::new(format!("Failed to serialize scenes: {}", e)).into())
}

/// Parse a document produced by [`export_json`].
pub fn parse_export(json: &str) -> StoryboardResult<Vec<Scene>> {
    serde_json::from_str(json)
        .map_err(|e| JsonError::new(format!("Failed to parse exported scenes: {}", e)).into())
}

/// Download file name for an export taken at `at`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use storyboard_core::export_file_name;
///
/// let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
/// assert_eq!(export_file_name(at), "storyboard-20240309-140500.json");
/// ```
pub fn export_file_name(at: DateTime<Utc>) -> String {
    format!("storyboard-{}.json", at.format("%Y%m%d-%H%M%S"))
}

/// Write the export document into `dir` and return the file path.
#[instrument(skip(scenes), fields(dir = %dir.as_ref().display(), scenes = scenes.len()))]
pub fn write_export(
    dir: impl AsRef<Path>,
    scenes: &[Scene],
    at: DateTime<Utc>,
) -> StoryboardResult<PathBuf> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir).map_err(|e| {
        IoError::new(format!(
            "Failed to create export directory {}: {}",
            dir.display(),
            e
        ))
    })?;

    let path = dir.join(export_file_name(at));
    let json = export_json(scenes)?;
    std::fs::write(&path, json)
        .map_err(|e| IoError::new(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(path = %path.display(), "Exported storyboard");
    Ok(path)
}

/// Clipboard text for a single scene.
pub fn scene_clipboard_text(scene: &Scene) -> StoryboardResult<String> {
    serde_json::to_string_pretty(scene)
        .map_err(|e| JsonError::new(format!("Failed to serialize scene: {}", e)).into())
}
