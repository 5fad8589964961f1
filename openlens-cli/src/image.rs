//! Single-image detection and description

use crate::live::{generate_description, save_frame};
use openlens_core::{Error, LabelSequence, Result};
use openlens_eye::classes::ClassNames;
use openlens_eye::config::VisionConfig;
use openlens_eye::error::VisionError;
use openlens_eye::models::YoloModel;
use openlens_eye::overlay::draw_detections;
use openlens_eye::processing::{collect_labels, DetectionPipeline};
use openlens_llm::{DescribeConfig, Describer, NO_OBJECTS_MESSAGE};
use opencv::imgcodecs;
use opencv::prelude::*;
use std::path::Path;
use std::sync::Arc;

pub async fn run(
    vision: VisionConfig,
    describe: DescribeConfig,
    path: &Path,
    save: Option<&Path>,
) -> Result<()> {
    vision.validate().map_err(Error::Configuration)?;

    let classes = Arc::new(ClassNames::load(&vision.class_names_path)?);
    let model = YoloModel::load(&vision.yolo_model_file(), classes, &vision)?;
    let pipeline = DetectionPipeline::new(Arc::new(model));
    let describer = Describer::new(describe);

    let mut image = imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_COLOR)
        .map_err(VisionError::from)?;
    if image.empty() {
        return Err(Error::Configuration(format!(
            "could not read image: {}",
            path.display()
        )));
    }

    let detections = pipeline.detect(&image)?;
    draw_detections(&mut image, &detections)?;

    // The label sequence is rebuilt for each image on this path
    let mut labels = LabelSequence::new();
    collect_labels(&detections, &mut labels);

    if labels.is_empty() {
        println!("{}", NO_OBJECTS_MESSAGE);
    } else {
        println!("Detected objects: {}", labels.join());

        let text = generate_description(&describer, &labels).await;
        println!();
        println!("Generated Information:");
        println!("{}", text);
    }

    if let Some(save_path) = save {
        save_frame(&image, save_path)?;
        println!("Annotated image saved as '{}'", save_path.display());
    }

    Ok(())
}
