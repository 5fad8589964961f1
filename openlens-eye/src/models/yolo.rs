//! YOLO object detection model

use crate::classes::ClassNames;
use crate::config::VisionConfig;
use crate::error::VisionError;
use crate::models::nms::non_max_suppression;
use crate::utils::mat_to_chw_tensor;
use ndarray::Array4;
use opencv::prelude::*;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Model input edge length expected by the YOLO export.
const INPUT_SIZE: u32 = 640;
/// Leading box coordinates per output column: cx, cy, w, h.
const BOX_COORDS: usize = 4;

/// One candidate object instance reported by the detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedObject {
    pub class_id: usize,
    pub class_name: String,
    pub confidence: f32,
    /// Pixel coordinates in the source frame: x, y, width, height.
    pub bbox: (f32, f32, f32, f32),
}

/// YOLO model for object detection.
///
/// Filters by the configured confidence threshold and suppresses
/// overlapping boxes before returning.
pub struct YoloModel {
    session: Session,
    classes: Arc<ClassNames>,
    confidence_threshold: f32,
    iou_threshold: f32,
}

impl YoloModel {
    pub fn load(
        model_path: &Path,
        classes: Arc<ClassNames>,
        config: &VisionConfig,
    ) -> Result<Self, VisionError> {
        if !model_path.exists() {
            return Err(VisionError::Config(format!(
                "model file not found: {} (run `openlens download-model` first)",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| VisionError::Ort(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| VisionError::Ort(format!("Failed to set optimization level: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| VisionError::Ort(format!("Failed to load YOLO model: {}", e)))?;

        info!("YOLO model loaded from {:?}", model_path);

        Ok(Self {
            session,
            classes,
            confidence_threshold: config.confidence_threshold,
            iou_threshold: config.nms_iou_threshold,
        })
    }

    /// Detect objects in a BGR frame.
    pub fn detect(&self, frame: &Mat) -> Result<Vec<DetectedObject>, VisionError> {
        let frame_width = frame.cols() as f32;
        let frame_height = frame.rows() as f32;
        if frame_width <= 0.0 || frame_height <= 0.0 {
            return Err(VisionError::Processing("Empty frame".to_string()));
        }

        let data = mat_to_chw_tensor(frame, INPUT_SIZE, INPUT_SIZE)?;
        let array = Array4::from_shape_vec(
            (1, 3, INPUT_SIZE as usize, INPUT_SIZE as usize),
            data,
        )
        .map_err(|e| VisionError::Processing(format!("Failed to shape input tensor: {}", e)))?;

        let inputs = ort::inputs!["images" => array.view()]
            .map_err(|e| VisionError::Ort(format!("Failed to bind model input: {}", e)))?;
        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| VisionError::Ort(format!("YOLO inference failed: {}", e)))?;

        let output = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| VisionError::Ort(format!("Failed to extract output tensor: {}", e)))?;

        // Output layout: [1, 4 + classes, boxes]
        let shape = output.shape();
        debug!("YOLO output shape: {:?}", shape);
        if shape.len() != 3 || shape[1] <= BOX_COORDS {
            return Err(VisionError::Ort(format!(
                "Unexpected YOLO output shape: {:?}",
                shape
            )));
        }

        let num_classes = (shape[1] - BOX_COORDS).min(self.classes.len());
        let num_boxes = shape[2];
        let scale_x = frame_width / INPUT_SIZE as f32;
        let scale_y = frame_height / INPUT_SIZE as f32;

        let mut detections = Vec::new();
        for i in 0..num_boxes {
            let mut max_score = 0.0f32;
            let mut max_class = 0usize;
            for c in 0..num_classes {
                let score = output[[0, BOX_COORDS + c, i]];
                if score > max_score {
                    max_score = score;
                    max_class = c;
                }
            }

            if max_score <= self.confidence_threshold {
                continue;
            }

            // Box coords are center-based, in model-input pixel units
            let cx = output[[0, 0, i]] * scale_x;
            let cy = output[[0, 1, i]] * scale_y;
            let w = output[[0, 2, i]] * scale_x;
            let h = output[[0, 3, i]] * scale_y;

            if !cx.is_finite() || !cy.is_finite() || !w.is_finite() || !h.is_finite() {
                continue;
            }

            let x = (cx - w / 2.0).max(0.0);
            let y = (cy - h / 2.0).max(0.0);
            let w = w.min(frame_width - x);
            let h = h.min(frame_height - y);

            if w <= 0.0 || h <= 0.0 {
                continue;
            }

            let class_name = match self.classes.get(max_class) {
                Some(name) => name.to_string(),
                None => continue,
            };

            detections.push(DetectedObject {
                class_id: max_class,
                class_name,
                confidence: max_score,
                bbox: (x, y, w, h),
            });
        }

        let detections = non_max_suppression(detections, self.iou_threshold);
        debug!("YOLO detected {} objects", detections.len());
        Ok(detections)
    }
}
