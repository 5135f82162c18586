//! Scripted generation driver for testing.

use async_trait::async_trait;
use serde_json::json;
use std::sync::{Arc, Mutex};
use storyboard_core::{GenerateRequest, GenerateResponse};
use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
use storyboard_interface::GenerationDriver;

/// A single scripted response (success or error).
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(GenerationErrorKind),
}

/// Driver that replays a script and records what it was asked.
///
/// Once the script runs out the last response repeats.
pub struct MockDriver {
    responses: Vec<MockResponse>,
    has_credential: bool,
    call_count: Arc<Mutex<usize>>,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockDriver {
    /// Driver answering every call with `text`.
    pub fn new_success(text: impl Into<String>) -> Self {
        Self::new_sequence(vec![MockResponse::Success(text.into())])
    }

    /// Driver failing every call with `error`.
    pub fn new_error(error: GenerationErrorKind) -> Self {
        Self::new_sequence(vec![MockResponse::Error(error)])
    }

    /// Driver replaying `responses` in order.
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses,
            has_credential: true,
            call_count: Arc::new(Mutex::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Driver reporting that no API key is configured.
    pub fn new_unconfigured() -> Self {
        Self {
            has_credential: false,
            ..Self::new_success("unreachable")
        }
    }

    /// Number of times generate() was called.
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of the most recent request.
    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(GenerateRequest::prompt_text)
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerationDriver for MockDriver {
    async fn generate(&self, req: &GenerateRequest) -> StoryboardResult<GenerateResponse> {
        let index = {
            let mut count = self.call_count.lock().unwrap();
            let current = *count;
            *count += 1;
            current
        };
        self.requests.lock().unwrap().push(req.clone());

        let response = self
            .responses
            .get(index)
            .or_else(|| self.responses.last())
            .cloned()
            .unwrap_or(MockResponse::Error(GenerationErrorKind::EmptyResult));

        match response {
            MockResponse::Success(text) => Ok(GenerateResponse::text(text)),
            MockResponse::Error(kind) => Err(GenerationError::new(kind).into()),
        }
    }

    fn has_credential(&self) -> bool {
        self.has_credential
    }

    fn credential_name(&self) -> &str {
        "MOCK_API_KEY"
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

/// JSON text for `count` well-formed scenes sharing `appearance`.
pub fn scene_list_json(count: usize, appearance: &str) -> String {
    let scenes: Vec<serde_json::Value> = (1..=count)
        .map(|n| {
            json!({
                "sceneNumber": n,
                "duration": 10,
                "setting": format!("Lighthouse, beat {}", n),
                "characterAppearance": appearance,
                "action": format!("The keeper does thing {}", n),
                "dialogue": if n == 2 { "Who sent this?" } else { "" },
                "cameraAngle": "Medium shot",
                "lighting": "Golden hour",
                "mood": "Wistful"
            })
        })
        .collect();
    serde_json::to_string(&scenes).unwrap()
}
