//! Object detection pipeline

use crate::error::VisionError;
use crate::models::{DetectedObject, YoloModel};
use openlens_core::LabelSequence;
use opencv::core::Mat;
use std::sync::Arc;
use tracing::debug;

/// Boundary the rest of the pipeline depends on: anything that turns a
/// frame into labeled, confidence-filtered, overlap-suppressed boxes is
/// substitutable here. Ordering within a call is detector-dependent; the
/// aggregation step relies only on it being deterministic per call.
pub trait ObjectDetector: Send + Sync {
    fn detect(&self, frame: &Mat) -> Result<Vec<DetectedObject>, VisionError>;
}

impl ObjectDetector for YoloModel {
    fn detect(&self, frame: &Mat) -> Result<Vec<DetectedObject>, VisionError> {
        YoloModel::detect(self, frame)
    }
}

/// Object detection pipeline.
pub struct DetectionPipeline {
    detector: Arc<dyn ObjectDetector>,
}

impl DetectionPipeline {
    pub fn new(detector: Arc<dyn ObjectDetector>) -> Self {
        Self { detector }
    }

    /// Process a frame and detect objects.
    pub fn detect(&self, frame: &Mat) -> Result<Vec<DetectedObject>, VisionError> {
        let detections = self.detector.detect(frame)?;
        debug!("Detected {} objects", detections.len());
        Ok(detections)
    }
}

/// Fold one frame's detections into the running label sequence, in
/// detector output order. Labels already present are skipped.
pub fn collect_labels(detections: &[DetectedObject], labels: &mut LabelSequence) {
    labels.extend_labels(detections.iter().map(|d| d.class_name.clone()));
}
