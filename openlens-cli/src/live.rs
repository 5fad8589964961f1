//! Live webcam capture session

use openlens_core::{Error, LabelSequence, Result};
use openlens_eye::camera::CameraManager;
use openlens_eye::classes::ClassNames;
use openlens_eye::config::VisionConfig;
use openlens_eye::error::VisionError;
use openlens_eye::models::YoloModel;
use openlens_eye::overlay::draw_detections;
use openlens_eye::processing::{collect_labels, DetectionPipeline};
use openlens_llm::{build_prompt, DescribeConfig, Describer, NO_OBJECTS_MESSAGE};
use opencv::core::{Mat, Vector};
use opencv::{highgui, imgcodecs};
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

const WINDOW_NAME: &str = "Object Detection";

pub async fn run(vision: VisionConfig, describe: DescribeConfig, output: &Path) -> Result<()> {
    vision.validate().map_err(Error::Configuration)?;

    // Missing model or class files stop the entry point before the loop
    let classes = Arc::new(ClassNames::load(&vision.class_names_path)?);
    let model = YoloModel::load(&vision.yolo_model_file(), classes, &vision)?;
    let pipeline = DetectionPipeline::new(Arc::new(model));
    let describer = Describer::new(describe);

    let mut camera = CameraManager::new(&vision);
    camera.initialize()?;

    println!("Press 's' to stop detection and generate text about detected objects");
    println!("Press 'q' to quit without generating text");

    let result = session_loop(&mut camera, &pipeline, &describer, output).await;

    // Release capture and display resources on every exit path
    camera.stop();
    if let Err(e) = highgui::destroy_all_windows() {
        warn!("Failed to tear down display windows: {}", e);
    }

    result
}

async fn session_loop(
    camera: &mut CameraManager,
    pipeline: &DetectionPipeline,
    describer: &Describer,
    output: &Path,
) -> Result<()> {
    let mut session_labels = LabelSequence::new();

    loop {
        let mut frame = camera.capture_frame()?;

        let detections = match pipeline.detect(&frame) {
            Ok(detections) => detections,
            Err(e) => {
                warn!("Detection error: {}", e);
                Vec::new()
            }
        };

        draw_detections(&mut frame, &detections)?;
        collect_labels(&detections, &mut session_labels);

        highgui::imshow(WINDOW_NAME, &frame).map_err(VisionError::from)?;
        let key = highgui::wait_key(1).map_err(VisionError::from)?;

        if key == 's' as i32 {
            println!("Generating text for detected objects...");
            let text = generate_description(describer, &session_labels).await;
            println!();
            println!("Generated Information:");
            println!("{}", text);

            save_frame(&frame, output)?;
            println!("Last frame saved as '{}'", output.display());
            break;
        } else if key == 'q' as i32 {
            println!("Quitting without generating text");
            break;
        }
    }

    Ok(())
}

/// Aggregate -> prompt -> describe. An empty sequence short-circuits to
/// the fixed message without touching the description service.
pub(crate) async fn generate_description(describer: &Describer, labels: &LabelSequence) -> String {
    if labels.is_empty() {
        return NO_OBJECTS_MESSAGE.to_string();
    }

    let prompt = build_prompt(labels);
    describer.describe(&prompt, &labels.join()).await.text
}

pub(crate) fn save_frame(frame: &Mat, path: &Path) -> Result<()> {
    let params: Vector<i32> = Vector::new();
    let written = imgcodecs::imwrite(&path.to_string_lossy(), frame, &params)
        .map_err(VisionError::from)?;

    if !written {
        return Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("failed to write {}", path.display()),
        )
        .into());
    }

    Ok(())
}
