//! Binary for downloading the detection model from the command line

use openlens_eye::config::VisionConfig;
use openlens_eye::error::VisionError;
use openlens_eye::models::ModelManager;
use std::env;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), VisionError> {
    let mut config = VisionConfig::default();
    if let Some(dir) = env::args().nth(1) {
        config.model_path = dir.into();
    }

    let manager = ModelManager::new(Arc::new(config));
    println!("Downloading YOLO model...");
    let path = manager.get_yolo_model().await?;
    println!("YOLO model downloaded to: {:?}", path);

    Ok(())
}
