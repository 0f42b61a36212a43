use crate::image::DatasetImage;
use crate::pack::{color_to_pos, pack_f32, pos_to_color, Rgba8};

/// Field pixels following the header pixel: type, position, size, rotation.
pub const RECORD_FIELDS: u8 = 4;

/// Pixels one entity occupies, header included.
pub const RECORD_LEN: usize = 1 + RECORD_FIELDS as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ShapeType {
    Circle = 0,
    Box = 1,
}

impl ShapeType {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(ShapeType::Circle),
            1 => Some(ShapeType::Box),
            _ => None,
        }
    }
}

/// A shape as the shader sees it. Coordinates are window pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub shape: ShapeType,
    pub position: (f32, f32),
    /// Circles use `size.0` as radius; boxes use both as half extents.
    pub size: (f32, f32),
    /// Whole degrees. Stored as 16 bits, so values wrap modulo 65536.
    pub rotation: i32,
}

impl Entity {
    pub fn circle(position: (f32, f32), radius: f32) -> Self {
        Self {
            shape: ShapeType::Circle,
            position,
            size: (radius, 0.0),
            rotation: 0,
        }
    }

    pub fn rect(position: (f32, f32), half_extents: (f32, f32), rotation: i32) -> Self {
        Self {
            shape: ShapeType::Box,
            position,
            size: half_extents,
            rotation,
        }
    }

    /// The record's pixels, header first.
    pub fn encode(&self) -> [Rgba8; RECORD_LEN] {
        [
            Rgba8::new(RECORD_FIELDS, 0, 0, 0),
            Rgba8::new(self.shape as u8, 0, 0, 0),
            pos_to_color(pack_f32(self.position.0), pack_f32(self.position.1)),
            pos_to_color(pack_f32(self.size.0), pack_f32(self.size.1)),
            pos_to_color(self.rotation as u16, 0),
        ]
    }
}

/// Walk the records from index 0 until an empty header.
///
/// Records with an unknown shape are skipped using their header's field count.
/// Records that declare fewer fields than we need, or run past the image, end the walk.
pub fn decode_entities(image: &DatasetImage) -> Vec<Entity> {
    let capacity = image.capacity();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < capacity {
        let Some(header) = image.pixel_at(i) else {
            break;
        };
        let fields = header.r as usize;
        if fields == 0 {
            break;
        }
        if fields < RECORD_FIELDS as usize || i + 1 + fields > capacity {
            tracing::debug!("dataset: malformed record header at {i} (fields={fields})");
            break;
        }

        let field = |n: usize| image.pixel_at(i + 1 + n).unwrap_or_default();
        if let Some(shape) = ShapeType::from_u8(field(0).r) {
            let pos = color_to_pos(field(1));
            let size = color_to_pos(field(2));
            let rot = color_to_pos(field(3));
            out.push(Entity {
                shape,
                position: (f32::from(pos.x), f32::from(pos.y)),
                size: (f32::from(size.x), f32::from(size.y)),
                rotation: i32::from(rot.x as i16),
            });
        }

        i += 1 + fields;
    }

    out
}
