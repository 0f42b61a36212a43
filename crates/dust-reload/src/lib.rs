#![forbid(unsafe_code)]

//! Shader hot-reload policy: when to look at the file, and whether it changed.
//!
//! Change detection compares the file's modification time with the last one seen.
//! Compiling the new source is the backend's job; this crate never touches GL.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};

pub use dust_core::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReloadMode {
    /// Look at the file only when the host asks (e.g. on a mouse click).
    #[default]
    Manual,
    /// Look at the file every frame.
    Auto,
}

impl ReloadMode {
    pub fn toggle(self) -> Self {
        match self {
            ReloadMode::Manual => ReloadMode::Auto,
            ReloadMode::Auto => ReloadMode::Manual,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReloadMode::Manual => "MANUAL",
            ReloadMode::Auto => "AUTO",
        }
    }
}

/// A detected modification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderChange {
    pub previous: Option<SystemTime>,
    pub current: Option<SystemTime>,
}

/// Tracks one shader file's modification time.
#[derive(Debug, Clone)]
pub struct ShaderWatch {
    path: PathBuf,
    last_modified: Option<SystemTime>,
    mode: ReloadMode,
}

impl ShaderWatch {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let last_modified = modified_time(&path);
        if last_modified.is_none() {
            tracing::warn!("shader watch: cannot stat {}", path.display());
        }
        Self {
            path,
            last_modified,
            mode: ReloadMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ReloadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mode(&self) -> ReloadMode {
        self.mode
    }

    pub fn toggle_mode(&mut self) -> ReloadMode {
        self.mode = self.mode.toggle();
        tracing::info!("shader autoloading: {}", self.mode.label());
        self.mode
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified
    }

    /// Whether this frame should stat the file.
    pub fn should_check(&self, manual_trigger: bool) -> bool {
        self.mode == ReloadMode::Auto || manual_trigger
    }

    /// Stat the file and report a change against the last recorded time.
    ///
    /// The new time is recorded immediately, whether or not the caller manages to reload,
    /// so a broken shader is tried once per edit rather than every frame.
    pub fn poll(&mut self) -> Option<ShaderChange> {
        let current = modified_time(&self.path);
        if current == self.last_modified {
            return None;
        }
        let change = ShaderChange {
            previous: self.last_modified,
            current,
        };
        self.last_modified = current;
        tracing::debug!(
            "shader watch: {} changed ({} -> {})",
            self.path.display(),
            format_mod_time(change.previous),
            format_mod_time(change.current)
        );
        Some(change)
    }

    pub fn read_source(&self) -> Result<String, EngineError> {
        fs::read_to_string(&self.path).map_err(|source| EngineError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Local time in `asctime` layout, e.g. `Sat Oct 17 10:00:00 2026`.
pub fn format_mod_time(t: Option<SystemTime>) -> String {
    match t {
        Some(t) => DateTime::<Local>::from(t)
            .format("%a %b %e %H:%M:%S %Y")
            .to_string(),
        None => "unknown".to_string(),
    }
}
