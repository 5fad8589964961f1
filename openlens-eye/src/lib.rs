//! openlens-eye: detector adapter for OpenLens
//!
//! Wraps webcam capture, YOLO ONNX inference, class-name lookup, and
//! detection overlay drawing behind a narrow `detect(frame) -> detections`
//! boundary the rest of the pipeline consumes.

pub mod camera;
pub mod classes;
pub mod config;
pub mod error;
pub mod models;
pub mod overlay;
pub mod processing;
mod utils;

pub use camera::CameraManager;
pub use classes::ClassNames;
pub use config::VisionConfig;
pub use error::VisionError;
pub use models::{DetectedObject, ModelManager, YoloModel};
pub use processing::{collect_labels, DetectionPipeline, ObjectDetector};
