pub mod manager;
pub mod nms;
pub mod yolo;

pub use manager::{ModelManager, YOLO_MODEL_NAME};
pub use nms::{iou, non_max_suppression};
pub use yolo::{DetectedObject, YoloModel};
