//! Core data types for the Storyboard generation library.
//!
//! This crate provides the domain types shared by every Storyboard crate:
//! scenes and storyboard requests, the provider-neutral generation request,
//! signed-in identities, activity records, export helpers and configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod activity;
mod config;
mod export;
mod generate;
mod identity;
mod message;
mod request;
mod role;
mod scene;

pub use activity::UserActivity;
pub use config::{AdminConfig, ModelConfig, PipelineConfig, StoryboardConfig};
pub use export::{
    export_file_name, export_json, parse_export, scene_clipboard_text, write_export,
};
pub use generate::{
    FinishReason, GenerateRequest, GenerateRequestBuilder, GenerateResponse, ResponseFormat,
};
pub use identity::{UserIdentity, UserIdentityBuilder, decode_identity_token};
pub use message::Message;
pub use request::{ConsistencyMode, StoryboardRequest, target_scene_count};
pub use role::Role;
pub use scene::{SCENE_DURATION_SECONDS, SCENES_PER_MINUTE, Scene, SceneBuilder};
