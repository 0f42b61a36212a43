//! Host glue (policy layer).
//!
//! winit window + glutin context creation, per-frame input edges and frame pacing.
//! Kept apart from the GL runtime so that crate stays windowing-free.

mod gl_host;
mod input;
mod pacer;

pub use gl_host::GlHost;
pub use input::InputState;
pub use pacer::FramePacer;

pub use dust_core::EngineError;
