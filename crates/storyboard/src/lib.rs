//! Storyboard - story idea to storyboard
//!
//! Storyboard turns a short story idea into a fixed-length storyboard in two
//! model calls: a free-text draft the user may edit, then a structured list of
//! 10-second scenes that share one reusable character description.
//!
//! # Features
//!
//! - **Two-step generation**: editable draft, then schema-constrained scenes
//! - **Consistency modes**: strict (identical appearance) or relaxed
//! - **Stage machine**: sign-in, input, draft review, results, admin dashboard
//! - **Classified errors**: every failure becomes one readable message
//! - **Export**: pretty-printed JSON scene lists
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use storyboard::{GeminiClient, StoryboardConfig, StoryboardGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = StoryboardConfig::load()?;
//!     let generator =
//!         StoryboardGenerator::from_config(GeminiClient::from_config(config.model()), &config);
//!
//!     let draft = generator
//!         .request_draft("A lighthouse keeper finds a message in a bottle", None, 1)
//!         .await?;
//!     let scenes = generator.request_scenes(&draft, 1, false).await?;
//!     println!("{}", storyboard::export_json(&scenes)?);
//!     Ok(())
//! }
//! ```
//!
//! # Cargo Features
//!
//! - `gemini` - Google Gemini backend (default)
//! - `api` - enables tests that call the real API
//!
//! # Architecture
//!
//! - `storyboard_error` - Error types
//! - `storyboard_core` - Scenes, requests, identities, configuration, export
//! - `storyboard_interface` - `GenerationDriver` trait definition
//! - `storyboard_models` - Gemini implementation
//! - `storyboard_pipeline` - Generator, classifier, activity store, stage machine
//!
//! This crate (`storyboard`) re-exports everything for convenience.

#![forbid(unsafe_code)]

pub use storyboard_core::*;
pub use storyboard_error::*;
pub use storyboard_interface::*;
pub use storyboard_pipeline::*;

#[cfg(feature = "gemini")]
pub use storyboard_models::*;
