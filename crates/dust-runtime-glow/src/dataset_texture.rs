use glow::HasContext;

use dust_dataset::DatasetImage;

use crate::EngineError;

/// GPU side of a [`DatasetImage`].
///
/// Filtering is NEAREST: texels are data, interpolating them would corrupt the packed values.
/// Row 0 of the image is uploaded first, so record index `i` sits at texel
/// `(i % size, i / size)`.
#[derive(Debug)]
pub struct DatasetTexture {
    pub tex: glow::NativeTexture,
    pub size: i32,
}

impl DatasetTexture {
    pub unsafe fn new(gl: &glow::Context, size: usize) -> Result<Self, EngineError> {
        let size = i32::try_from(size.max(1))
            .map_err(|_| EngineError::other(format!("dataset size {size} too large")))?;
        let tex = gl
            .create_texture()
            .map_err(|e| EngineError::GlCreate(format!("create_texture failed: {e:?}")))?;

        gl.bind_texture(glow::TEXTURE_2D, Some(tex));
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MIN_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_MAG_FILTER,
            glow::NEAREST as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_S,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_WRAP_T,
            glow::CLAMP_TO_EDGE as i32,
        );
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            size,
            size,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            None,
        );
        gl.bind_texture(glow::TEXTURE_2D, None);

        Ok(Self { tex, size })
    }

    pub unsafe fn upload(&self, gl: &glow::Context, image: &DatasetImage) -> Result<(), EngineError> {
        if image.size() as i32 != self.size {
            return Err(EngineError::other(format!(
                "dataset image is {0}x{0}, texture is {1}x{1}",
                image.size(),
                self.size
            )));
        }
        gl.bind_texture(glow::TEXTURE_2D, Some(self.tex));
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_sub_image_2d(
            glow::TEXTURE_2D,
            0,
            0,
            0,
            self.size,
            self.size,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(image.as_bytes()),
        );
        gl.bind_texture(glow::TEXTURE_2D, None);
        Ok(())
    }

    pub unsafe fn bind(&self, gl: &glow::Context, unit: u32) {
        gl.active_texture(glow::TEXTURE0 + unit);
        gl.bind_texture(glow::TEXTURE_2D, Some(self.tex));
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_texture(self.tex);
    }
}
