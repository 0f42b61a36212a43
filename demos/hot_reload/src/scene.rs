use dust_dataset::{DatasetImage, EngineError, Entity};

/// Radius of the circle that follows the cursor.
pub const CURSOR_RADIUS: f32 = 20.0;

/// The entities drawn every frame: a circle under the cursor and a fixed rotated box.
pub fn frame_entities(mouse: (f32, f32)) -> [Entity; 2] {
    [
        Entity::circle(mouse, CURSOR_RADIUS),
        Entity::rect((100.0, 100.0), (20.0, 20.0), 45),
    ]
}

/// Rewrite `image` with this frame's entities; returns the first unused pixel index.
pub fn write_frame(image: &mut DatasetImage, mouse: (f32, f32)) -> Result<usize, EngineError> {
    image.write_entities(&frame_entities(mouse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dust_core::config::MIN_DATASET_SIZE;
    use dust_dataset::{decode_entities, Rgba8, ShapeType};

    #[test]
    fn two_records_fill_the_first_row() {
        let mut image = DatasetImage::new(10);
        let used = write_frame(&mut image, (256.0, 300.0)).unwrap();
        assert_eq!(used, 10);
        assert_eq!(image.pixel(2, 0), Some(Rgba8::new(0, 1, 44, 1)));
        assert_eq!(image.pixel(0, 1), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn circle_follows_the_mouse() {
        let mut image = DatasetImage::new(10);
        write_frame(&mut image, (10.0, 20.0)).unwrap();
        write_frame(&mut image, (30.0, 40.0)).unwrap();

        let decoded = decode_entities(&image);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].shape, ShapeType::Circle);
        assert_eq!(decoded[0].position, (30.0, 40.0));
    }

    #[test]
    fn cursor_outside_window_clamps_to_zero() {
        let mut image = DatasetImage::new(10);
        write_frame(&mut image, (-15.0, -1.0)).unwrap();
        assert_eq!(image.pixel(2, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn smallest_configurable_dataset_holds_a_frame() {
        let mut image = DatasetImage::new(MIN_DATASET_SIZE as usize);
        let used = write_frame(&mut image, (512.0, 512.0)).unwrap();
        assert_eq!(used, 10);
        assert!(used <= image.capacity());
    }

    #[test]
    fn too_small_dataset_is_an_error() {
        let mut image = DatasetImage::new(3);
        assert!(write_frame(&mut image, (0.0, 0.0)).is_err());
    }
}
