//! Error types for the Storyboard library.
//!
//! This crate provides the foundation error types used throughout the Storyboard workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use storyboard_error::{GenerationError, GenerationErrorKind, StoryboardResult};
//!
//! fn fetch_draft() -> StoryboardResult<String> {
//!     Err(GenerationError::new(GenerationErrorKind::EmptyResult))?
//! }
//!
//! match fetch_draft() {
//!     Ok(draft) => println!("Got: {}", draft),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod generation;
mod identity;
mod io;
mod json;
mod pipeline;

pub use config::ConfigError;
pub use error::{StoryboardError, StoryboardErrorKind, StoryboardResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use identity::IdentityError;
pub use io::IoError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
