#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod assets;
pub mod config;
pub mod error;
pub mod logging;

pub use error::EngineError;

pub use assets::AssetsRoot;

pub use config::{load_typed_json, HotReloadConfig, WindowConfig};

pub use logging::{init_logging, LoggingConfig};
