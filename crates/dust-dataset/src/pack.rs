/// One RGBA8 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Channel-wise add, clamped at 255 (additive blending into an 8-bit target).
    pub fn saturating_add(self, other: Rgba8) -> Rgba8 {
        Rgba8 {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
            a: self.a.saturating_add(other.a),
        }
    }
}

/// Pair of 16-bit values carried by a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pos16 {
    pub x: u16,
    pub y: u16,
}

impl Pos16 {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

pub fn pos_to_color(x: u16, y: u16) -> Rgba8 {
    Rgba8 {
        r: x as u8,
        g: (x >> 8) as u8,
        b: y as u8,
        a: (y >> 8) as u8,
    }
}

pub fn color_to_pos(c: Rgba8) -> Pos16 {
    Pos16 {
        x: u16::from(c.r) | (u16::from(c.g) << 8),
        y: u16::from(c.b) | (u16::from(c.a) << 8),
    }
}

/// Float coordinate to 16 bits: truncates, negatives and NaN become 0, large values clamp.
pub fn pack_f32(v: f32) -> u16 {
    // `as` on floats saturates and maps NaN to 0.
    v as u16
}

/// Linear pixel index to `(x, y)` for a row-major image `width` pixels wide.
pub fn index_to_pos(index: usize, width: usize) -> Option<(usize, usize)> {
    if width == 0 {
        return None;
    }
    Some((index % width, index / width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_low_and_high_bytes() {
        let c = pos_to_color(0x1234, 0xABCD);
        assert_eq!(c, Rgba8::new(0x34, 0x12, 0xCD, 0xAB));
    }

    #[test]
    fn unpack_inverts_pack_at_edges() {
        for &(x, y) in &[(0, 0), (255, 256), (u16::MAX, 1), (512, 45), (1, u16::MAX)] {
            assert_eq!(color_to_pos(pos_to_color(x, y)), Pos16::new(x, y));
        }
    }

    #[test]
    fn small_values_only_touch_low_bytes() {
        let c = pos_to_color(20, 0);
        assert_eq!(c, Rgba8::new(20, 0, 0, 0));
    }

    #[test]
    fn float_packing_truncates_and_saturates() {
        assert_eq!(pack_f32(100.9), 100);
        assert_eq!(pack_f32(-3.0), 0);
        assert_eq!(pack_f32(70_000.0), u16::MAX);
        assert_eq!(pack_f32(f32::NAN), 0);
    }

    #[test]
    fn index_math_is_row_major() {
        assert_eq!(index_to_pos(0, 10), Some((0, 0)));
        assert_eq!(index_to_pos(9, 10), Some((9, 0)));
        assert_eq!(index_to_pos(10, 10), Some((0, 1)));
        assert_eq!(index_to_pos(57, 10), Some((7, 5)));
        assert_eq!(index_to_pos(3, 0), None);
    }

    #[test]
    fn additive_blend_clamps() {
        let a = Rgba8::new(250, 1, 0, 128);
        let b = Rgba8::new(10, 1, 0, 128);
        assert_eq!(a.saturating_add(b), Rgba8::new(255, 2, 0, 255));
    }
}
