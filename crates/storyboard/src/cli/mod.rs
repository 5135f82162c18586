//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the storyboard binary.

mod classify;
mod commands;
mod generate;

pub use classify::classify_message;
pub use commands::{Cli, Commands, DraftArgs, RunArgs, ScenesArgs};
pub use generate::{load_config, run_draft, run_pipeline, run_scenes};
