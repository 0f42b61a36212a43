use dust_core::EngineError;

use crate::pack::{index_to_pos, Rgba8};
use crate::record::{Entity, RECORD_LEN};

/// CPU copy of the square dataset texture (RGBA8, row-major, row 0 first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetImage {
    size: usize,
    pixels: Vec<u8>,
}

impl DatasetImage {
    /// A transparent `size x size` image. `size` is clamped to at least 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            pixels: vec![0; size * size * 4],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of pixels.
    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    /// Raw RGBA bytes, ready for a texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba8> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let o = (y * self.size + x) * 4;
        let px: [u8; 4] = self.pixels.get(o..o + 4)?.try_into().ok()?;
        Some(Rgba8::from_array(px))
    }

    pub fn pixel_at(&self, index: usize) -> Option<Rgba8> {
        let (x, y) = index_to_pos(index, self.size)?;
        self.pixel(x, y)
    }

    /// Overwrite one pixel. Out-of-range indices are ignored.
    pub fn set_pixel_at(&mut self, index: usize, c: Rgba8) {
        if let Some(slot) = self.slot_mut(index) {
            slot.copy_from_slice(&c.to_array());
        }
    }

    /// Add `c` onto the pixel at `index`, clamping each channel.
    pub fn blend_add(&mut self, index: usize, c: Rgba8) {
        if let Some(slot) = self.slot_mut(index) {
            let cur = Rgba8::from_array([slot[0], slot[1], slot[2], slot[3]]);
            slot.copy_from_slice(&cur.saturating_add(c).to_array());
        }
    }

    fn slot_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let (x, y) = index_to_pos(index, self.size)?;
        if y >= self.size {
            return None;
        }
        let o = (y * self.size + x) * 4;
        self.pixels.get_mut(o..o + 4)
    }

    /// Write `entity` as a record starting at pixel `shift` and return the next free index.
    ///
    /// Pixels are blended additively, so writing onto a cleared image stores the exact bytes.
    /// A record that would not fit is rejected whole.
    pub fn write_entity(&mut self, shift: usize, entity: &Entity) -> Result<usize, EngineError> {
        let capacity = self.capacity();
        let end = shift
            .checked_add(RECORD_LEN)
            .filter(|&end| end <= capacity)
            .ok_or(EngineError::DatasetOverflow {
                index: shift.saturating_add(RECORD_LEN),
                capacity,
            })?;
        for (i, px) in entity.encode().into_iter().enumerate() {
            self.blend_add(shift + i, px);
        }
        Ok(end)
    }

    /// Clear, then write `entities` back to back from index 0.
    pub fn write_entities(&mut self, entities: &[Entity]) -> Result<usize, EngineError> {
        self.clear();
        entities
            .iter()
            .try_fold(0, |shift, e| self.write_entity(shift, e))
    }
}
