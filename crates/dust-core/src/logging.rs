//! Subscriber setup.
//!
//! Library crates only emit `tracing` events; binaries install the subscriber here.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// `env_filter` uses `EnvFilter` directive syntax (e.g. "info", "dust_reload=debug").
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            ansi: true,
        }
    }
}

static INIT: Once = Once::new();

/// Installs the global subscriber once; later calls are ignored.
///
/// Filter precedence: `config.env_filter`, then `RUST_LOG`, then `info`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config
            .env_filter
            .as_deref()
            .and_then(|f| EnvFilter::try_new(f).ok())
            .or_else(|| EnvFilter::try_from_default_env().ok())
            .unwrap_or_else(|| EnvFilter::new("info"));

        // A test harness may already own the global subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(config.ansi)
            .try_init();

        tracing::debug!("logging initialized");
    });
}
