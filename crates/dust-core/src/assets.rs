use std::path::{Path, PathBuf};

use crate::EngineError;

/// Directory that holds the demo resources (e.g. the one containing `res/`).
///
/// Demos may be launched from the workspace root or from their own crate directory,
/// so the root is discovered by walking up from a starting directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsRoot {
    root: PathBuf,
}

impl AssetsRoot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// First directory at or above `start_dir` that contains `marker`.
    pub fn discover(start_dir: impl AsRef<Path>, marker: &str) -> Result<Self, EngineError> {
        let start_dir = start_dir.as_ref();
        start_dir
            .ancestors()
            .find(|dir| dir.join(marker).exists())
            .map(Self::new)
            .ok_or_else(|| EngineError::AssetsNotFound {
                start_dir: start_dir.to_path_buf(),
            })
    }

    /// Like [`AssetsRoot::discover`], also trying the directory of the running executable.
    pub fn discover_from_env(marker: &str) -> Result<Self, EngineError> {
        let cwd = std::env::current_dir().map_err(|source| EngineError::Io {
            path: PathBuf::from("."),
            source,
        })?;
        match Self::discover(&cwd, marker) {
            Ok(found) => Ok(found),
            Err(err) => {
                let exe_dir = std::env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf));
                match exe_dir {
                    Some(dir) => Self::discover(dir, marker).map_err(|_| err),
                    None => Err(err),
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Join `rel` onto the root. Absolute paths are returned unchanged.
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        let rel = rel.as_ref();
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_tree(name: &str) -> PathBuf {
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let base = std::env::temp_dir().join(format!("dust_assets_{name}_{ts}"));
        fs::create_dir_all(base.join("res")).unwrap();
        fs::create_dir_all(base.join("demos/hot_reload/src")).unwrap();
        base
    }

    #[test]
    fn discovers_marker_in_ancestor() {
        let base = temp_tree("ancestor");
        let root = AssetsRoot::discover(base.join("demos/hot_reload/src"), "res").unwrap();
        assert_eq!(root.path(), base.as_path());
        assert_eq!(root.resolve("res/reload.fs"), base.join("res/reload.fs"));
        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn missing_marker_reports_start_dir() {
        let base = temp_tree("missing");
        let start = base.join("demos");
        let err = AssetsRoot::discover(&start, "no_such_marker_dir_xyz").unwrap_err();
        match err {
            EngineError::AssetsNotFound { start_dir } => assert_eq!(start_dir, start),
            other => panic!("unexpected error: {other}"),
        }
        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn absolute_paths_pass_through() {
        let root = AssetsRoot::new("/opt/dust");
        let abs = std::env::temp_dir().join("x.fs");
        assert_eq!(root.resolve(&abs), abs);
    }
}
