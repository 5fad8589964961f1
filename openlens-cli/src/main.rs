// OpenLens Command Line Interface
// Webcam and still-image object detection with generated descriptions

mod image;
mod live;

use clap::{Args, Parser, Subcommand};
use openlens_eye::config::VisionConfig;
use openlens_eye::models::ModelManager;
use openlens_llm::DescribeConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "openlens")]
#[command(about = "OpenLens - AI-powered object detection and description", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Live webcam detection; press 's' to describe and save, 'q' to quit
    Live {
        /// Camera device index
        #[arg(long, default_value = "0")]
        camera: u32,

        /// File the final annotated frame is written to
        #[arg(long, default_value = "output_detection.jpg")]
        output: PathBuf,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Detect and describe objects in a still image
    Image {
        /// Path to the input image
        path: PathBuf,

        /// Optionally save the annotated image here
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Download the YOLO detection model
    DownloadModel {
        /// Directory to store the model in
        #[arg(long)]
        model_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Directory the YOLO model is stored in
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Newline-delimited class name list
    #[arg(long, default_value = "coco.names")]
    classes: PathBuf,

    /// Maximum token count for generated descriptions
    #[arg(long, default_value = "150")]
    max_tokens: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Live { camera, output, common } => {
            let vision = vision_config(camera, &common);
            let describe = describe_config(&common);
            live::run(vision, describe, &output).await?;
        }
        Commands::Image { path, save, common } => {
            let vision = vision_config(0, &common);
            let describe = describe_config(&common);
            image::run(vision, describe, &path, save.as_deref()).await?;
        }
        Commands::DownloadModel { model_dir } => {
            let mut config = VisionConfig::default();
            if let Some(dir) = model_dir {
                config.model_path = dir;
            }
            let manager = ModelManager::new(Arc::new(config));
            let path = manager.get_yolo_model().await?;
            info!("YOLO model downloaded to {:?}", path);
        }
    }

    Ok(())
}

/// Build the vision configuration once at startup; everything downstream
/// receives it by reference.
fn vision_config(camera: u32, common: &CommonArgs) -> VisionConfig {
    let mut config = VisionConfig::default();
    config.camera_id = camera;
    if let Some(dir) = &common.model_dir {
        config.model_path = dir.clone();
    }
    config.class_names_path = common.classes.clone();
    config
}

fn describe_config(common: &CommonArgs) -> DescribeConfig {
    let mut config = DescribeConfig::default();
    config.api_key = std::env::var("OPENAI_API_KEY").ok();
    config.max_tokens = common.max_tokens;
    config
}
