pub mod detection;

pub use detection::{collect_labels, DetectionPipeline, ObjectDetector};
