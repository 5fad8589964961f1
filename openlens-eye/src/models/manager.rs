//! Model manager with auto-download functionality

use crate::config::VisionConfig;
use crate::error::VisionError;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

pub const YOLO_MODEL_NAME: &str = "yolov8n.onnx";

const YOLO_MODEL_URL: &str =
    "https://github.com/ultralytics/assets/releases/download/v8.2.0/yolov8n.onnx";
// Checksum validation is skipped when empty
const YOLO_MODEL_CHECKSUM: &str = "";

/// Downloads and manages the detection model artifact.
pub struct ModelManager {
    config: Arc<VisionConfig>,
}

impl ModelManager {
    pub fn new(config: Arc<VisionConfig>) -> Self {
        Self { config }
    }

    /// Ensure model directory exists
    pub fn ensure_model_dir(&self) -> Result<PathBuf, VisionError> {
        let model_path = &self.config.model_path;
        if !model_path.exists() {
            fs::create_dir_all(model_path)?;
            info!("Created model directory: {:?}", model_path);
        }
        Ok(model_path.clone())
    }

    /// Download a model file if not already present.
    pub async fn ensure_model(
        &self,
        model_name: &str,
        url: &str,
        checksum: &str,
    ) -> Result<PathBuf, VisionError> {
        if model_name.is_empty() || model_name.len() > 255 {
            return Err(VisionError::Model("Invalid model name".to_string()));
        }

        // Prevent path traversal
        if model_name.contains("..") || model_name.contains('/') || model_name.contains('\\') {
            return Err(VisionError::Model(
                "Model name contains invalid characters".to_string(),
            ));
        }

        if url.is_empty() || url.len() > 2048 {
            return Err(VisionError::Model("Invalid URL".to_string()));
        }

        if !url.starts_with("https://") {
            return Err(VisionError::Model(
                "Only HTTPS URLs are allowed for model downloads".to_string(),
            ));
        }

        self.ensure_model_dir()?;

        let model_path = self.config.model_path.join(model_name);

        if model_path.exists() {
            info!("Model {} already exists at {:?}", model_name, model_path);
            return Ok(model_path);
        }

        info!("Downloading model {} from {}", model_name, url);

        const MAX_MODEL_SIZE: usize = 2_000_000_000;
        const DOWNLOAD_TIMEOUT_SECS: u64 = 3600;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()?;

        let response = client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(VisionError::Model(format!(
                "Failed to download model: HTTP {}",
                response.status()
            )));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > MAX_MODEL_SIZE as u64 {
                return Err(VisionError::Model(format!(
                    "Model too large: {} bytes (max {} bytes)",
                    content_length, MAX_MODEL_SIZE
                )));
            }
        }

        let bytes = response.bytes().await?;

        if bytes.len() > MAX_MODEL_SIZE {
            return Err(VisionError::Model(format!(
                "Downloaded model too large: {} bytes (max {} bytes)",
                bytes.len(),
                MAX_MODEL_SIZE
            )));
        }

        if bytes.len() < 1024 {
            return Err(VisionError::Model(
                "Downloaded file too small, likely corrupted".to_string(),
            ));
        }

        if !checksum.is_empty() {
            let mut hasher = Sha256::new();
            hasher.update(&bytes);
            let computed_hash = hex::encode(hasher.finalize());

            if computed_hash != checksum {
                return Err(VisionError::Model(format!(
                    "Checksum mismatch for model {}: expected {}, got {}",
                    model_name, checksum, computed_hash
                )));
            }
            info!("Verified checksum for model {}", model_name);
        } else {
            info!(
                "Downloaded {} bytes for model {} (checksum verification skipped)",
                bytes.len(),
                model_name
            );
        }

        // Write to a temp file first so a failed download never leaves a
        // half-written model behind
        let temp_path = model_path.with_extension("tmp");
        fs::write(&temp_path, &bytes)?;

        fs::rename(&temp_path, &model_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            VisionError::Io(e)
        })?;

        info!("Model {} saved to {:?}", model_name, model_path);
        Ok(model_path)
    }

    /// Get the YOLO model path, downloading if needed.
    pub async fn get_yolo_model(&self) -> Result<PathBuf, VisionError> {
        self.ensure_model(YOLO_MODEL_NAME, YOLO_MODEL_URL, YOLO_MODEL_CHECKSUM)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager_with_temp_dir() -> (ModelManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let mut config = VisionConfig::default();
        config.model_path = temp_dir.path().to_path_buf();
        (ModelManager::new(Arc::new(config)), temp_dir)
    }

    #[tokio::test]
    async fn test_ensure_model_dir_is_idempotent() {
        let (manager, _temp_dir) = manager_with_temp_dir();
        assert!(manager.ensure_model_dir().is_ok());
        assert!(manager.ensure_model_dir().is_ok());
    }

    #[tokio::test]
    async fn test_ensure_model_invalid_name() {
        let (manager, _temp_dir) = manager_with_temp_dir();

        let result = manager
            .ensure_model("", "https://example.com/model.onnx", "")
            .await;
        assert!(result.is_err());

        let result = manager
            .ensure_model("../evil", "https://example.com/model.onnx", "")
            .await;
        assert!(result.is_err());

        let result = manager
            .ensure_model("model/name", "https://example.com/model.onnx", "")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ensure_model_invalid_url() {
        let (manager, _temp_dir) = manager_with_temp_dir();

        let result = manager.ensure_model("model.onnx", "", "").await;
        assert!(result.is_err());

        let result = manager
            .ensure_model("model.onnx", "http://example.com/model.onnx", "")
            .await;
        assert!(result.is_err());

        let result = manager
            .ensure_model("model.onnx", "ftp://example.com/model.onnx", "")
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_ensure_model_existing_file_short_circuits() {
        let (manager, temp_dir) = manager_with_temp_dir();
        let existing = temp_dir.path().join("model.onnx");
        fs::write(&existing, b"weights").unwrap();

        // URL is never fetched when the file already exists
        let path = manager
            .ensure_model("model.onnx", "https://example.invalid/model.onnx", "")
            .await
            .unwrap();
        assert_eq!(path, existing);
    }
}
