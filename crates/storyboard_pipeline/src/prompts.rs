//! Prompt text for the draft and scene calls.

use serde_json::{Value, json};
use storyboard_core::{ConsistencyMode, SCENE_DURATION_SECONDS, target_scene_count};

/// Durations above this many minutes get the long-form pacing hint.
const LONG_FORM_MINUTES: u32 = 2;

fn pacing_hint(duration_minutes: u32) -> &'static str {
    if duration_minutes > LONG_FORM_MINUTES {
        "This is a longer piece. Give the story a clear beginning, middle and end, \
         leave room for quiet moments, and build steadily towards the climax."
    } else {
        "This is a short piece. Keep the story tight and focused on a single moment \
         or event; every sentence should move it forward."
    }
}

fn consistency_block(mode: ConsistencyMode) -> &'static str {
    match mode {
        ConsistencyMode::Strict => {
            "CHARACTER CONSISTENCY (STRICT): copy the characterAppearance text word for word \
             into every scene. It must be identical in all scenes, without a single changed word. \
             Changes of pose, expression or gesture belong in the action field, never in \
             characterAppearance."
        }
        ConsistencyMode::Relaxed => {
            "CHARACTER CONSISTENCY (RELAXED): start every scene from the same characterAppearance \
             text. Small, incremental changes (dirt, a torn sleeve, wet hair) are allowed when the \
             story justifies them, but the character's core identity (face, build, hair, main \
             clothing) must stay recognisably the same. Never leave characterAppearance empty."
        }
    }
}

/// Prompt for the unstructured draft story call.
///
/// # Examples
///
/// ```
/// use storyboard_pipeline::draft_prompt;
///
/// let prompt = draft_prompt("A lighthouse keeper finds a message in a bottle", None, 1);
/// assert!(prompt.contains("exactly 6 scenes"));
/// ```
pub fn draft_prompt(topic: &str, dialogue: Option<&str>, duration_minutes: u32) -> String {
    let minutes = duration_minutes.max(1);
    let scene_count = target_scene_count(minutes);
    let minute_label = if minutes == 1 { "minute" } else { "minutes" };

    let mut prompt = format!(
        "Write a short, visual story about: \"{topic}\".\n\n\
         The story will be turned into a storyboard of exactly {scene_count} scenes, \
         each {SCENE_DURATION_SECONDS} seconds long ({minutes} {minute_label} in total). \
         Write enough events and visual detail to fill all {scene_count} scenes.\n\
         {pacing}\n\
         Introduce the main character early and describe their appearance clearly once.\n",
        pacing = pacing_hint(minutes),
    );

    if let Some(line) = dialogue.map(str::trim).filter(|line| !line.is_empty()) {
        prompt.push_str(&format!(
            "The following line of dialogue MUST appear verbatim somewhere in the story, \
             spoken by a character: \"{line}\"\n"
        ));
    }

    prompt.push_str(
        "Write the story as plain prose in a few paragraphs, without headings, \
         scene numbers or markdown.",
    );
    prompt
}

/// Prompt for the structured scene decomposition call.
///
/// # Examples
///
/// ```
/// use storyboard_core::ConsistencyMode;
/// use storyboard_pipeline::scenes_prompt;
///
/// let prompt = scenes_prompt("The keeper climbs the stairs.", 2, ConsistencyMode::Relaxed);
/// assert!(prompt.contains("exactly 12 sequential scenes"));
/// assert!(prompt.contains("(RELAXED)"));
/// ```
pub fn scenes_prompt(narrative: &str, duration_minutes: u32, mode: ConsistencyMode) -> String {
    let scene_count = target_scene_count(duration_minutes.max(1));

    format!(
        "Turn the following story into a storyboard.\n\n\
         1. First decide ONE single, detailed, reusable description of the main character's \
         appearance: age, build, face, hair, clothing and distinctive features.\n\
         2. Split the story into exactly {scene_count} sequential scenes, each exactly \
         {SCENE_DURATION_SECONDS} seconds long, numbered 1 to {scene_count}.\n\
         3. If the story is too short to fill {scene_count} scenes naturally, add reaction \
         shots, establishing shots or contemplative beats. Never return fewer or more than \
         {scene_count} scenes.\n\
         4. {consistency}\n\
         5. For every scene give the setting, the action, the dialogue (an empty string when \
         nobody speaks), the camera angle, the lighting and the mood.\n\n\
         Story:\n\"\"\"\n{narrative}\n\"\"\"",
        consistency = consistency_block(mode),
    )
}

/// Response schema for the scene call: an array of scene objects.
pub fn scene_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "sceneNumber": {"type": "INTEGER"},
                "duration": {"type": "INTEGER"},
                "setting": {"type": "STRING"},
                "characterAppearance": {"type": "STRING"},
                "action": {"type": "STRING"},
                "dialogue": {"type": "STRING"},
                "cameraAngle": {"type": "STRING"},
                "lighting": {"type": "STRING"},
                "mood": {"type": "STRING"}
            },
            "required": [
                "sceneNumber",
                "duration",
                "setting",
                "characterAppearance",
                "action",
                "cameraAngle"
            ]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pacing_changes_above_two_minutes() {
        let short = draft_prompt("Rain", None, 2);
        let long = draft_prompt("Rain", None, 3);
        assert!(short.contains("short piece"));
        assert!(long.contains("longer piece"));
        assert!(long.contains("exactly 18 scenes"));
    }

    #[test]
    fn dialogue_is_quoted_verbatim() {
        let prompt = draft_prompt("Rain", Some("Not again."), 1);
        assert!(prompt.contains("MUST appear verbatim"));
        assert!(prompt.contains("\"Not again.\""));
    }

    #[test]
    fn blank_dialogue_is_ignored() {
        assert!(!draft_prompt("Rain", Some("  "), 1).contains("verbatim"));
    }

    #[test]
    fn zero_minutes_is_coerced_to_one() {
        assert!(draft_prompt("Rain", None, 0).contains("exactly 6 scenes"));
        assert!(scenes_prompt("Rain", 0, ConsistencyMode::Strict).contains("exactly 6 sequential"));
    }

    #[test]
    fn consistency_blocks_are_exclusive() {
        let strict = scenes_prompt("x", 1, ConsistencyMode::Strict);
        let relaxed = scenes_prompt("x", 1, ConsistencyMode::Relaxed);
        assert!(strict.contains("(STRICT)") && !strict.contains("(RELAXED)"));
        assert!(relaxed.contains("(RELAXED)") && !relaxed.contains("(STRICT)"));
    }

    #[test]
    fn schema_requires_core_fields() {
        let schema = scene_response_schema();
        let required: Vec<&str> = schema["items"]["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"characterAppearance"));
        assert!(required.contains(&"cameraAngle"));
        assert!(!required.contains(&"dialogue"));
    }
}
