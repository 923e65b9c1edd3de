//! pharmachat CLI
//!
//! Command-line interface to the two chat pipelines: text queries about
//! quitting a drug, and pharmacist-style description of an image file.
//!
//! Copyright (c) 2025 Pharmachat Contributors

use anyhow::{Context, Result};
use chat_core::{AppConfig, ImagePayload};
use clap::{Parser, Subcommand};
use llm_bridge::text::DEFAULT_TEXT_MODEL;
use llm_bridge::vision::DEFAULT_VISION_MODEL;
use llm_bridge::{GeminiClient, GeminiConfig, TextModel, VisionModel};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pharmachat")]
#[command(about = "Drug information chat: text queries and image description", long_about = None)]
#[command(version = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BUILT_GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILT_TIME_UTC"),
    ")"
))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask for withdrawal guidance about a drug
    Ask {
        /// Drug name, e.g. "Nicotine"
        drug: String,

        /// Chat model to query
        #[arg(long, default_value = DEFAULT_TEXT_MODEL)]
        model: String,
    },

    /// Describe an image as a professional pharmacist would
    Describe {
        /// Path to a png/jpg/jpeg file
        #[arg(short, long)]
        image: PathBuf,

        /// Vision model to query
        #[arg(long, default_value = DEFAULT_VISION_MODEL)]
        model: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    let client = GeminiClient::new(GeminiConfig::default(), config.api_key)?;

    match cli.command {
        Commands::Ask { drug, model } => {
            tracing::debug!(%model, "running text query");
            let answer = TextModel::new(client, model).drug_guidance(&drug).await?;
            println!("{}", answer);
        }
        Commands::Describe { image, model } => {
            let bytes = fs::read(&image)
                .with_context(|| format!("failed to read {}", image.display()))?;
            let payload = ImagePayload::from_bytes(bytes)?;
            tracing::debug!(%model, mime = %payload.mime_type, "running image query");
            let description = VisionModel::new(client, model)
                .describe_image(&payload)
                .await?;
            println!("{}", description);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ask_parses_with_default_model() {
        let cli = Cli::try_parse_from(["pharmachat", "ask", "Nicotine"]).unwrap();
        match cli.command {
            Commands::Ask { drug, model } => {
                assert_eq!(drug, "Nicotine");
                assert_eq!(model, DEFAULT_TEXT_MODEL);
            }
            Commands::Describe { .. } => panic!("expected the ask subcommand"),
        }
    }

    #[test]
    fn test_describe_requires_an_image_path() {
        assert!(Cli::try_parse_from(["pharmachat", "describe"]).is_err());

        let cli =
            Cli::try_parse_from(["pharmachat", "describe", "--image", "report.png"]).unwrap();
        match cli.command {
            Commands::Describe { image, model } => {
                assert_eq!(image, PathBuf::from("report.png"));
                assert_eq!(model, DEFAULT_VISION_MODEL);
            }
            Commands::Ask { .. } => panic!("expected the describe subcommand"),
        }
    }
}
