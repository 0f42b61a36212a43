use std::ffi::CString;
use std::fmt;
use std::num::NonZeroU32;

use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{ContextAttributesBuilder, GlProfile, PossiblyCurrentContext};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasRawWindowHandle;
use winit::dpi::LogicalSize;
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use dust_core::{EngineError, WindowConfig};

/// A window with a current core-profile GL context and a loaded `glow::Context`.
///
/// Fields drop in order: GL objects go before the window they render into.
pub struct GlHost {
    pub gl: glow::Context,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    pub window: Window,
    title: String,
}

impl fmt::Debug for GlHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // glutin surface/context handles carry no useful Debug output.
        f.debug_struct("GlHost")
            .field("window", &self.window.id())
            .field("size", &self.size())
            .field("title", &self.title)
            .finish()
    }
}

impl GlHost {
    pub fn new<T>(event_loop: &EventLoop<T>, cfg: &WindowConfig) -> Result<Self, EngineError> {
        let window_builder = WindowBuilder::new()
            .with_title(cfg.title.clone())
            .with_inner_size(LogicalSize::new(cfg.width as f64, cfg.height as f64));

        let template = ConfigTemplateBuilder::new()
            .with_alpha_size(8)
            .with_depth_size(0)
            .with_stencil_size(0)
            .with_transparency(false);

        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));

        // The picker must return a `Config`. An empty match fails in `find_configs`,
        // which `build` reports as an error before the picker runs.
        let (window, gl_config) = display_builder
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|accum, config| {
                        if config.num_samples() > accum.num_samples() {
                            config
                        } else {
                            accum
                        }
                    })
                    .expect("find_configs returned an empty set")
            })
            .map_err(|e| EngineError::GlCreate(format!("DisplayBuilder.build: {e}")))?;

        let window = window
            .ok_or_else(|| EngineError::GlCreate("DisplayBuilder did not create a window".into()))?;
        let gl_display = gl_config.display();

        let raw_window_handle = window.raw_window_handle();

        let context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .build(Some(raw_window_handle));

        let fallback_context_attributes = ContextAttributesBuilder::new()
            .with_profile(GlProfile::Core)
            .build(None);

        let not_current_gl_context = unsafe {
            gl_display
                .create_context(&gl_config, &context_attributes)
                .or_else(|_| gl_display.create_context(&gl_config, &fallback_context_attributes))
                .map_err(|e| EngineError::GlCreate(format!("create_context: {e}")))?
        };

        let (width, height) = non_zero_size(window.inner_size().width, window.inner_size().height);

        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            width,
            height,
        );

        let surface = unsafe {
            gl_display
                .create_window_surface(&gl_config, &attrs)
                .map_err(|e| EngineError::GlCreate(format!("create_window_surface: {e}")))?
        };

        let context = not_current_gl_context
            .make_current(&surface)
            .map_err(|e| EngineError::GlCreate(format!("make_current: {e}")))?;

        // FramePacer owns frame timing.
        if let Err(e) = surface.set_swap_interval(&context, SwapInterval::DontWait) {
            tracing::debug!("set_swap_interval: {e}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| match CString::new(s) {
                Ok(name) => gl_display.get_proc_address(name.as_c_str()) as *const _,
                Err(_) => std::ptr::null(),
            })
        };

        tracing::info!(
            "window '{}' {}x{} (physical {}x{})",
            cfg.title,
            cfg.width,
            cfg.height,
            width,
            height
        );

        Ok(Self {
            gl,
            surface,
            context,
            window,
            title: cfg.title.clone(),
        })
    }

    /// Physical framebuffer size, never zero.
    pub fn size(&self) -> (u32, u32) {
        let s = self.window.inner_size();
        (s.width.max(1), s.height.max(1))
    }

    pub fn resize(&self, width: u32, height: u32) {
        let (w, h) = non_zero_size(width, height);
        self.surface.resize(&self.context, w, h);
    }

    pub fn swap(&self) -> Result<(), EngineError> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| EngineError::other(format!("swap_buffers: {e}")))
    }

    /// No-op when `title` is already shown.
    pub fn set_title_if_changed(&mut self, title: &str) {
        if self.title != title {
            self.window.set_title(title);
            self.title = title.to_string();
        }
    }
}

fn non_zero_size(width: u32, height: u32) -> (NonZeroU32, NonZeroU32) {
    (
        NonZeroU32::new(width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(height).unwrap_or(NonZeroU32::MIN),
    )
}
