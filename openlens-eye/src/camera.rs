//! USB webcam capture

use crate::config::VisionConfig;
use crate::error::VisionError;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, CAP_ANY};
use tracing::info;

/// Camera manager for USB webcam capture.
///
/// The capture loop is single-threaded: one frame is acquired, processed,
/// and displayed per iteration. The device is released on [`stop`] and on
/// drop, covering every exit path.
///
/// [`stop`]: CameraManager::stop
pub struct CameraManager {
    camera_id: u32,
    resolution: (u32, u32),
    frame_rate: u32,
    capture: Option<VideoCapture>,
}

impl CameraManager {
    pub fn new(config: &VisionConfig) -> Self {
        Self {
            camera_id: config.camera_id,
            resolution: config.resolution,
            frame_rate: config.frame_rate,
            capture: None,
        }
    }

    /// Open the camera device and apply resolution/frame-rate settings.
    pub fn initialize(&mut self) -> Result<(), VisionError> {
        if self.capture.is_some() {
            return Ok(());
        }

        let mut capture = VideoCapture::new(self.camera_id as i32, CAP_ANY).map_err(|e| {
            VisionError::Camera(format!("Failed to open camera {}: {}", self.camera_id, e))
        })?;

        if !capture.is_opened().map_err(|e| {
            VisionError::Camera(format!("Camera {} not opened: {}", self.camera_id, e))
        })? {
            return Err(VisionError::Camera(format!(
                "Camera {} failed to open",
                self.camera_id
            )));
        }

        capture
            .set(videoio::CAP_PROP_FRAME_WIDTH, self.resolution.0 as f64)
            .map_err(|e| VisionError::Camera(format!("Failed to set width: {}", e)))?;
        capture
            .set(videoio::CAP_PROP_FRAME_HEIGHT, self.resolution.1 as f64)
            .map_err(|e| VisionError::Camera(format!("Failed to set height: {}", e)))?;
        capture
            .set(videoio::CAP_PROP_FPS, self.frame_rate as f64)
            .map_err(|e| VisionError::Camera(format!("Failed to set FPS: {}", e)))?;

        self.capture = Some(capture);
        info!(
            "Camera {} initialized at {}x{} @ {}fps",
            self.camera_id, self.resolution.0, self.resolution.1, self.frame_rate
        );

        Ok(())
    }

    /// Capture a single frame.
    pub fn capture_frame(&mut self) -> Result<Mat, VisionError> {
        let capture = self
            .capture
            .as_mut()
            .ok_or_else(|| VisionError::Camera("Camera not initialized".to_string()))?;

        let mut frame = Mat::default();
        let grabbed = capture
            .read(&mut frame)
            .map_err(|e| VisionError::Camera(format!("Failed to read frame: {}", e)))?;

        if !grabbed || frame.empty() {
            return Err(VisionError::Camera("Failed to grab frame".to_string()));
        }

        Ok(frame)
    }

    /// Release the camera device.
    pub fn stop(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            let _ = capture.release();
            info!("Camera stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.capture.is_some()
    }
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        self.stop();
    }
}
