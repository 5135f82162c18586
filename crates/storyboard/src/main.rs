//! Storyboard CLI binary.
//!
//! This binary provides command-line access to Storyboard:
//! - Generate a draft story from a topic
//! - Decompose a draft file into scenes
//! - Run the whole pipeline and export the result
//! - Classify an error message

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands, classify_message, load_config, run_draft, run_pipeline, run_scenes};

    let cli = Cli::parse();

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    let result = match cli.command {
        Commands::Draft(args) => run_draft(&config, &args).await,
        Commands::Scenes(args) => run_scenes(&config, &args).await,
        Commands::Run(args) => run_pipeline(&config, &args).await,
        Commands::Classify { message } => {
            classify_message(&config, &message);
            Ok(())
        }
    };

    if let Err(e) = result {
        let classifier = storyboard::ErrorClassifier::new(*config.pipeline().error_message_limit());
        tracing::debug!(error = %e, "Command failed");
        eprintln!("{}", classifier.classify(&e));
        std::process::exit(1);
    }
}
