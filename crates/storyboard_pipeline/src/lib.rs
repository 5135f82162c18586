//! Storyboard generation pipeline.
//!
//! This crate turns a topic into a storyboard in two model calls and drives
//! the stages a user moves through while doing so.
//!
//! # Components
//!
//! - [`StoryboardGenerator`]: builds prompts, calls a [`GenerationDriver`],
//!   decodes and validates the scene list
//! - [`PipelineController`]: the stage machine (sign-in, input, draft review,
//!   results, admin dashboard)
//! - [`ErrorClassifier`]: ordered rules mapping failures to user-facing messages
//! - [`ActivityStore`]: per-user generation counters, injected into the controller
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storyboard_pipeline::{InMemoryActivityStore, PipelineController, StoryboardGenerator};
//!
//! let generator = StoryboardGenerator::new(GeminiClient::new());
//! let mut controller = PipelineController::new(generator, Arc::new(InMemoryActivityStore::new()));
//! controller.login(UserIdentity::from_email("keeper@example.com"))?;
//! controller.submit_draft_request(request).await?;
//! controller.submit_scene_request().await?;
//! ```
//!
//! [`GenerationDriver`]: storyboard_interface::GenerationDriver

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod classifier;
mod controller;
mod dashboard;
mod generator;
mod prompts;
mod stage;
mod validation;

pub use activity::{ActivityStore, InMemoryActivityStore};
pub use classifier::{
    ClassificationRule, ClassifiedError, DEFAULT_MESSAGE_LIMIT, ErrorCategory, ErrorClassifier,
};
pub use controller::PipelineController;
pub use dashboard::DashboardSnapshot;
pub use generator::{StoryboardGenerator, decode_scenes};
pub use prompts::{draft_prompt, scene_response_schema, scenes_prompt};
pub use stage::{PipelineStage, StageKind};
pub use validation::validate_scenes;
