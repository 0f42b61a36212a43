//! JSON configuration for the demos.
//!
//! Every field has a default, so an empty object (or no file at all) is a valid config.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Largest dataset edge we accept; record fields are packed into 8-bit channels.
pub const MAX_DATASET_SIZE: u32 = 256;

/// Smallest dataset edge that holds the hot-reload demo's two 5-pixel records.
pub const MIN_DATASET_SIZE: u32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames per second the host paces redraws to. `0` redraws as fast as possible.
    pub target_fps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "dust".to_string(),
            width: 800,
            height: 450,
            target_fps: 60,
        }
    }
}

impl WindowConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn validate(&self, path: &Path) -> Result<(), EngineError> {
        if self.width == 0 || self.height == 0 {
            return Err(EngineError::InvalidConfig {
                path: path.to_path_buf(),
                msg: format!(
                    "window size must be non-zero (got {}x{})",
                    self.width, self.height
                ),
            });
        }
        Ok(())
    }
}

/// Settings for the hot-reload demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HotReloadConfig {
    pub window: WindowConfig,
    /// Fragment shader to watch. Relative paths resolve against the asset root.
    pub shader_path: PathBuf,
    /// Edge length of the square dataset texture, in pixels.
    pub dataset_size: u32,
    /// Start in auto-reload mode instead of manual.
    pub auto_reload: bool,
}

impl Default for HotReloadConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "dust: hot reloading".to_string(),
                width: 512,
                height: 512,
                target_fps: 60,
            },
            shader_path: PathBuf::from("res/reload.fs"),
            dataset_size: 10,
            auto_reload: false,
        }
    }
}

impl HotReloadConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let cfg: HotReloadConfig = load_typed_json(path)?;
        cfg.validate(path)?;
        Ok(cfg)
    }

    pub fn validate(&self, path: &Path) -> Result<(), EngineError> {
        self.window.validate(path)?;
        if !(MIN_DATASET_SIZE..=MAX_DATASET_SIZE).contains(&self.dataset_size) {
            return Err(EngineError::InvalidConfig {
                path: path.to_path_buf(),
                msg: format!(
                    "dataset_size must be in {MIN_DATASET_SIZE}..={MAX_DATASET_SIZE} (got {})",
                    self.dataset_size
                ),
            });
        }
        Ok(())
    }
}

/// Read and deserialize a JSON file, keeping the path in the error.
pub fn load_typed_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, EngineError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| EngineError::Json {
        path: path.to_path_buf(),
        source,
    })
}
