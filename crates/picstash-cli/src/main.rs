//! Picstash CLI: submit images to the catalog from the command line.
//!
//! Set PICSTASH_API_URL and PICSTASH_UPLOAD_URL (and optionally
//! PICSTASH_API_KEY for X-API-Key auth).

use anyhow::Context;
use clap::{Parser, Subcommand};
use picstash_cli::{image_file_from_path, init_tracing};
use picstash_client::{
    ApiClient, CatalogCache, HttpAssetUploader, NoOpSurface, SubmissionController,
    SubmissionOutcome, TracingNotifier,
};
use picstash_core::ClientConfig;
use serde::Serialize;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "picstash", about = "Image catalog submission CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload an image and register it in the catalog
    Add {
        /// Path to the image file (PNG, JPEG, or GIF)
        file: std::path::PathBuf,
        /// Title, 2 to 20 characters
        #[arg(long)]
        title: String,
        /// Description, up to 65 characters
        #[arg(long)]
        description: String,
    },
    /// List registered images
    List,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let config = ClientConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Add {
            file,
            title,
            description,
        } => {
            let image = image_file_from_path(&file)?;

            let uploader = Arc::new(HttpAssetUploader::from_config(&config)?);
            let registrar = Arc::new(ApiClient::from_config(&config)?);
            let cache = Arc::new(CatalogCache::new(config.listing_cache_capacity));
            let mut controller = SubmissionController::new(
                uploader,
                registrar,
                cache,
                Arc::new(TracingNotifier),
                Arc::new(NoOpSurface),
            );

            controller.set_preview(format!("file://{}", file.display()));
            controller.attach_file(image).await?;

            match controller.submit(title, description).await {
                SubmissionOutcome::Succeeded => {
                    println!("Image added");
                    Ok(())
                }
                SubmissionOutcome::Blocked => anyhow::bail!("Image not yet uploaded"),
                SubmissionOutcome::Failed => {
                    anyhow::bail!("Failed to add image, try again later")
                }
                SubmissionOutcome::Rejected(report) => {
                    for (field, error) in report.failures() {
                        eprintln!("{}: {}", field, error);
                    }
                    anyhow::bail!("Submission rejected by field validation")
                }
            }
        }
        Commands::List => {
            let client = ApiClient::from_config(&config)?;
            let cache = CatalogCache::new(config.listing_cache_capacity);
            let images = client.list_images(&cache).await?;
            print_json(&images)
        }
    }
}
