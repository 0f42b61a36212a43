use std::fmt;
use std::path::PathBuf;

/// Errors shared by every dust crate.
///
/// Backends and demos re-export this type instead of defining their own.
#[derive(Debug)]
pub enum EngineError {
    // ---- Core / assets / config ----
    AssetsNotFound {
        start_dir: PathBuf,
    },

    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    InvalidConfig {
        path: PathBuf,
        msg: String,
    },

    // ---- Dataset encoding ----
    DatasetOverflow {
        index: usize,
        capacity: usize,
    },

    // ---- Runtime-facing (backend) ----
    VertexCompile(String),
    FragmentCompile(String),
    Link(String),
    GlCreate(String),

    // ---- Fallback ----
    Other(String),
}

impl EngineError {
    pub fn other<T: Into<String>>(s: T) -> Self {
        EngineError::Other(s.into())
    }

    /// True for the errors a shader reload can produce from bad GLSL.
    pub fn is_shader_compile(&self) -> bool {
        matches!(
            self,
            EngineError::VertexCompile(_) | EngineError::FragmentCompile(_) | EngineError::Link(_)
        )
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use EngineError::*;
        match self {
            AssetsNotFound { start_dir } => write!(
                f,
                "no asset directory in {} or any parent",
                start_dir.display()
            ),
            Io { path, source } => write!(f, "{}: {source}", path.display()),
            Json { path, source } => write!(f, "{}: bad json: {source}", path.display()),
            InvalidConfig { path, msg } => write!(f, "{}: {msg}", path.display()),
            DatasetOverflow { index, capacity } => write!(
                f,
                "record ending at pixel {index} does not fit a {capacity}-pixel dataset"
            ),
            VertexCompile(log) => write!(f, "vertex shader:\n{log}"),
            FragmentCompile(log) => write!(f, "fragment shader:\n{log}"),
            Link(log) => write!(f, "link:\n{log}"),
            GlCreate(what) => write!(f, "could not create GL object ({what})"),
            Other(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Io { source, .. } => Some(source),
            EngineError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn io_error_keeps_source_and_path() {
        let err = EngineError::Io {
            path: PathBuf::from("res/reload.fs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let msg = err.to_string();
        assert!(msg.contains("res/reload.fs"), "{msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn compile_errors_are_classified() {
        assert!(EngineError::FragmentCompile("0:1 syntax".into()).is_shader_compile());
        assert!(EngineError::Link("x".into()).is_shader_compile());
        assert!(!EngineError::GlCreate("x".into()).is_shader_compile());
        assert!(!EngineError::other("x").is_shader_compile());
    }

    #[test]
    fn compile_log_follows_the_stage() {
        let msg = EngineError::FragmentCompile("0:12(3): error: syntax error".into()).to_string();
        assert!(msg.starts_with("fragment shader"), "{msg}");
        assert!(msg.ends_with("syntax error"), "{msg}");
    }

    #[test]
    fn overflow_mentions_capacity() {
        let err = EngineError::DatasetOverflow {
            index: 102,
            capacity: 100,
        };
        assert!(err.to_string().contains("100"));
    }
}
