//! Detector class-name list

use crate::error::VisionError;
use std::fs;
use std::path::Path;

/// Class names for the detection model, one per line, line index = class
/// index. The file contents are not validated beyond being UTF-8 text.
#[derive(Debug, Clone)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    /// Load from a newline-delimited file. A missing file is a
    /// configuration error naming the expected path.
    pub fn load(path: &Path) -> Result<Self, VisionError> {
        if !path.exists() {
            return Err(VisionError::Config(format!(
                "class names file not found: {}",
                path.display()
            )));
        }

        let text = fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    pub fn from_text(text: &str) -> Self {
        let names = text.trim().lines().map(|line| line.to_string()).collect();
        Self { names }
    }

    pub fn get(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
