//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Storyboard - turn a story idea into a consistent storyboard
#[derive(Parser, Debug)]
#[command(name = "storyboard")]
#[command(about = "Turn a story idea into a consistent, fixed-length storyboard", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file, layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a draft story and print it
    Draft(DraftArgs),

    /// Decompose a draft file into scenes and print them as JSON
    Scenes(ScenesArgs),

    /// Run draft and scene generation, then export the storyboard
    Run(RunArgs),

    /// Print the category and user message for an error message
    Classify {
        /// Raw error text
        message: String,
    },
}

/// Arguments for `storyboard draft`
#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// What the story is about
    #[arg(long)]
    pub topic: String,

    /// Line of dialogue that must appear verbatim
    #[arg(long)]
    pub dialogue: Option<String>,

    /// Storyboard length in minutes
    #[arg(long, default_value = "1")]
    pub minutes: u32,
}

/// Arguments for `storyboard scenes`
#[derive(Args, Debug, Clone)]
pub struct ScenesArgs {
    /// File holding the (edited) draft story
    #[arg(long)]
    pub draft_file: PathBuf,

    /// Storyboard length in minutes
    #[arg(long, default_value = "1")]
    pub minutes: u32,

    /// Allow small, story-driven changes to the character's appearance
    #[arg(long)]
    pub relaxed: bool,
}

/// Arguments for `storyboard run`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// What the story is about
    #[arg(long)]
    pub topic: String,

    /// Line of dialogue that must appear verbatim
    #[arg(long)]
    pub dialogue: Option<String>,

    /// Storyboard length in minutes
    #[arg(long, default_value = "1")]
    pub minutes: u32,

    /// Allow small, story-driven changes to the character's appearance
    #[arg(long)]
    pub relaxed: bool,

    /// Email to attribute the storyboard to
    #[arg(long, conflicts_with = "token")]
    pub email: Option<String>,

    /// Identity token (JWT) to sign in with
    #[arg(long)]
    pub token: Option<String>,

    /// Directory the export file is written to
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}
