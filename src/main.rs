use blogforge::pipelines::blog::finalize_blog;
use blogforge::{AppConfig, BlogStudio, DraftRequest, GenerationMethod, ImagePipeline};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Generate illustrated blog posts with an LLM")]
struct Args {
    /// Configuration file (defaults to ./blogforge.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Acquire an image batch for a title and description
    Images {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Number of images (defaults to the configured count)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Generate three blog variations to choose from
    Draft {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        /// Build the description from the title alone
        #[arg(long)]
        quick: bool,
        /// Acquire an image batch for every variation
        #[arg(long)]
        images: bool,
    },
    /// Split a chosen Markdown variation into sections and illustrate it
    Finalize {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Markdown file holding the selected variation
        #[arg(long)]
        file: PathBuf,
        #[arg(long)]
        images: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;

    let output = match args.command {
        Command::Images {
            title,
            description,
            count,
        } => {
            let pipeline = ImagePipeline::from_config(&config)?;
            let batch = pipeline
                .generate_batch(&title, &description, count.unwrap_or(config.images.count))
                .await;
            info!(
                "Acquired {}/{} images",
                batch.images.len(),
                batch.queries.len()
            );
            serde_json::to_string_pretty(&batch)?
        }
        Command::Draft {
            title,
            description,
            quick,
            images,
        } => {
            let studio = BlogStudio::from_config(&config)?;
            let request = DraftRequest {
                title,
                description,
                method: if quick {
                    GenerationMethod::Quick
                } else {
                    GenerationMethod::Detailed
                },
                with_images: images,
            };
            serde_json::to_string_pretty(&studio.draft(&request).await?)?
        }
        Command::Finalize {
            title,
            description,
            file,
            images,
        } => {
            let markdown = tokio::fs::read_to_string(&file).await?;
            let pipeline = if images {
                Some(ImagePipeline::from_config(&config)?)
            } else {
                None
            };
            let blog = finalize_blog(
                &title,
                &description,
                &markdown,
                pipeline.as_ref(),
                config.images.count,
            )
            .await?;
            serde_json::to_string_pretty(&blog)?
        }
    };

    println!("{}", output);
    Ok(())
}
