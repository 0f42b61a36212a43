use std::path::PathBuf;

use glow::HasContext;
use winit::event::{MouseButton, VirtualKeyCode};

use dust_core::{EngineError, HotReloadConfig};
use dust_dataset::{decode_entities, DatasetImage};
use dust_host_winit::InputState;
use dust_reload::{format_mod_time, ReloadMode, ShaderWatch};
use dust_runtime_glow as rt;

use crate::scene;

const DATASET_UNIT: u32 = 0;

/// Everything the hot-reload demo keeps between frames.
#[derive(Debug)]
pub struct HotReloadApp {
    title: String,
    shader: rt::HotShader,
    watch: ShaderWatch,
    tri: rt::FullscreenTriangle,
    dataset: DatasetImage,
    dataset_tex: rt::DatasetTexture,
    total_time: f32,
    resolution: (u32, u32),
    /// `resolution` must be re-sent (new program, or window resized).
    resolution_dirty: bool,
}

impl HotReloadApp {
    pub unsafe fn new(
        gl: &glow::Context,
        cfg: &HotReloadConfig,
        shader_path: PathBuf,
        resolution: (u32, u32),
    ) -> Result<Self, EngineError> {
        let mode = if cfg.auto_reload {
            ReloadMode::Auto
        } else {
            ReloadMode::Manual
        };
        let watch = ShaderWatch::new(shader_path).with_mode(mode);
        tracing::info!("watching {}", watch.path().display());

        let shader = rt::HotShader::new_or_fallback(gl, watch.read_source())?;
        let tri = rt::FullscreenTriangle::new(gl)?;

        let size = cfg.dataset_size as usize;
        let mut dataset = DatasetImage::new(size);
        // Fail here, before the event loop, if one frame's records do not fit.
        scene::write_frame(&mut dataset, (0.0, 0.0))?;
        let dataset_tex = rt::DatasetTexture::new(gl, size)?;

        Ok(Self {
            title: cfg.window.title.clone(),
            shader,
            watch,
            tri,
            dataset,
            dataset_tex,
            total_time: 0.0,
            resolution,
            resolution_dirty: true,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.resolution = (width.max(1), height.max(1));
        self.resolution_dirty = true;
    }

    /// One frame: encode entities, advance time, maybe reload, handle the mode key, draw.
    pub unsafe fn frame(
        &mut self,
        gl: &glow::Context,
        input: &InputState,
        dt: f32,
    ) -> Result<(), EngineError> {
        let mouse = input.cursor();

        scene::write_frame(&mut self.dataset, mouse)?;
        self.dataset_tex.upload(gl, &self.dataset)?;

        self.total_time += dt;

        if self.watch.should_check(input.mouse_pressed(MouseButton::Left))
            && self.watch.poll().is_some()
        {
            self.reload_shader(gl);
        }

        if input.key_pressed(VirtualKeyCode::A) {
            self.watch.toggle_mode();
        }

        self.draw(gl, mouse);
        Ok(())
    }

    unsafe fn reload_shader(&mut self, gl: &glow::Context) {
        let result = match self.watch.read_source() {
            Ok(src) => self.shader.reload(gl, &src),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                self.resolution_dirty = true;
                tracing::info!(
                    "shader reloaded: {} ({})",
                    self.watch.path().display(),
                    format_mod_time(self.watch.last_modified())
                );
                tracing::debug!("dataset records: {:?}", decode_entities(&self.dataset));
            }
            Err(e) if e.is_shader_compile() => {
                tracing::warn!("shader has errors, keeping current program: {e}")
            }
            Err(e) => tracing::warn!("shader reload failed, keeping current program: {e}"),
        }
    }

    unsafe fn draw(&mut self, gl: &glow::Context, mouse: (f32, f32)) {
        let (w, h) = self.resolution;
        gl.bind_framebuffer(glow::FRAMEBUFFER, None);
        gl.viewport(0, 0, w as i32, h as i32);
        gl.disable(glow::BLEND);
        rt::clear_color(gl, rt::RAYWHITE);

        gl.use_program(Some(self.shader.program()));
        let uniforms = self.shader.uniforms();
        if self.resolution_dirty {
            uniforms.set_resolution(gl, w as f32, h as f32);
            self.resolution_dirty = false;
        }
        uniforms.set_time(gl, self.total_time);
        uniforms.set_mouse(gl, mouse.0, mouse.1);

        self.dataset_tex.bind(gl, DATASET_UNIT);
        uniforms.set_dataset_unit(gl, DATASET_UNIT);

        self.tri.draw(gl);

        gl.bind_texture(glow::TEXTURE_2D, None);
        gl.use_program(None);
    }

    /// Reload mode and shader timestamp, shown in the window title.
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "{} | [A] autoload: {} | shader modified: {}",
            self.title,
            self.watch.mode().label(),
            format_mod_time(self.watch.last_modified())
        );
        if self.shader.is_fallback() {
            line.push_str(" | fallback shader");
        }
        line
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        self.shader.destroy(gl);
        self.tri.destroy(gl);
        self.dataset_tex.destroy(gl);
    }
}
