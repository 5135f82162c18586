//! Tests that the facade exposes a working end-to-end surface.

use std::io::Write;
use storyboard::{
    ErrorCategory, ErrorClassifier, Scene, StoryboardConfig, parse_export, target_scene_count,
    write_export,
};

#[test]
fn test_config_file_overrides_bundled_defaults() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    writeln!(file, "[pipeline]\nerror_message_limit = 40\n\n[admin]\nusername = \"ops\"")?;

    let config = StoryboardConfig::from_file(file.path())?;
    assert_eq!(*config.pipeline().error_message_limit(), 40);
    assert!(*config.pipeline().validate_scenes());
    assert_eq!(config.admin().username(), "ops");
    assert_eq!(config.model().name(), "gemini-2.5-flash");
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_error() {
    assert!(StoryboardConfig::from_file("/definitely/not/here/storyboard.toml").is_err());
}

#[test]
fn test_classifier_limit_from_config() -> anyhow::Result<()> {
    let config = StoryboardConfig::from_toml_str("[pipeline]\nerror_message_limit = 5\n")?;
    let classifier = ErrorClassifier::new(*config.pipeline().error_message_limit());
    let classified = classifier.classify_message("kaboom and then some");
    assert_eq!(*classified.category(), ErrorCategory::Unknown);
    assert_eq!(classified.message(), "Something went wrong: kaboo...");
    Ok(())
}

#[test]
fn test_export_written_with_timestamped_name() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let scenes: Vec<Scene> = (1..=target_scene_count(1) as u32)
        .map(|n| {
            Scene::builder()
                .scene_number(n)
                .setting("Cliff top")
                .character_appearance("Elderly man, grey beard")
                .action("Looks out to sea")
                .camera_angle("Wide shot")
                .build()
        })
        .collect::<Result<_, _>>()?;

    let path = write_export(dir.path().join("out"), &scenes, chrono::Utc::now())?;
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("storyboard-") && name.ends_with(".json"));
    assert_eq!(parse_export(&std::fs::read_to_string(&path)?)?, scenes);
    Ok(())
}
