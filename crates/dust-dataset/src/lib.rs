#![forbid(unsafe_code)]

//! Entity records packed into the pixels of a small RGBA8 image.
//!
//! A shader cannot take a variable-length list of shapes as uniforms, so the host writes
//! each entity as a run of pixels and the shader decodes them with `texelFetch`.
//! Two 16-bit values fit in one pixel: low/high byte of `x` in `r`/`g`, of `y` in `b`/`a`.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

mod image;
mod pack;
mod record;

pub use dust_core::EngineError;

pub use image::DatasetImage;
pub use pack::{color_to_pos, index_to_pos, pack_f32, pos_to_color, Pos16, Rgba8};
pub use record::{decode_entities, Entity, ShapeType, RECORD_FIELDS, RECORD_LEN};
