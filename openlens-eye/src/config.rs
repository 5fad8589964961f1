//! Configuration for openlens-eye

use crate::models::manager::YOLO_MODEL_NAME;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Vision system configuration, built once at startup and passed by
/// reference to the camera, model, and download layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    /// USB camera device index (0, 1, 2, etc.)
    pub camera_id: u32,
    /// Target frame rate (frames per second)
    pub frame_rate: u32,
    /// Camera resolution (width, height)
    pub resolution: (u32, u32),
    /// Minimum class score for a detection to be kept
    pub confidence_threshold: f32,
    /// IoU above which overlapping boxes are suppressed
    pub nms_iou_threshold: f32,
    /// Directory the detection model is stored in
    pub model_path: PathBuf,
    /// Newline-delimited class name list, line index = class index
    pub class_names_path: PathBuf,
}

impl Default for VisionConfig {
    fn default() -> Self {
        let model_path = dirs::home_dir()
            .map(|mut p| {
                p.push(".openlens");
                p.push("models");
                p
            })
            .unwrap_or_else(|| PathBuf::from("./models"));

        Self {
            camera_id: 0,
            frame_rate: 30,
            resolution: (640, 480),
            confidence_threshold: 0.5,
            nms_iou_threshold: 0.4,
            model_path,
            class_names_path: PathBuf::from("coco.names"),
        }
    }
}

impl VisionConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.frame_rate == 0 || self.frame_rate > 120 {
            return Err("Frame rate must be between 1 and 120".to_string());
        }

        if self.resolution.0 == 0 || self.resolution.1 == 0 {
            return Err("Resolution must be non-zero".to_string());
        }

        if self.resolution.0 > 7680 || self.resolution.1 > 4320 {
            return Err("Resolution too large (max 8K)".to_string());
        }

        if self.camera_id > 100 {
            return Err("Camera ID too large (max 100)".to_string());
        }

        if !(self.confidence_threshold > 0.0 && self.confidence_threshold <= 1.0) {
            return Err("Confidence threshold must be in (0, 1]".to_string());
        }

        if !(self.nms_iou_threshold > 0.0 && self.nms_iou_threshold <= 1.0) {
            return Err("NMS IoU threshold must be in (0, 1]".to_string());
        }

        Ok(())
    }

    /// Full path of the YOLO model file inside `model_path`.
    pub fn yolo_model_file(&self) -> PathBuf {
        self.model_path.join(YOLO_MODEL_NAME)
    }
}
