use glow::HasContext;

/// Uniforms the hot-reload shader may declare. Any of them can be missing (or optimized out).
#[derive(Debug, Clone, Default)]
pub struct ShaderUniforms {
    pub resolution: Option<glow::NativeUniformLocation>,
    pub mouse: Option<glow::NativeUniformLocation>,
    pub time: Option<glow::NativeUniformLocation>,
    pub dataset: Option<glow::NativeUniformLocation>,
}

impl ShaderUniforms {
    pub const RESOLUTION: &'static str = "resolution";
    pub const MOUSE: &'static str = "mouse";
    pub const TIME: &'static str = "time";
    pub const DATASET: &'static str = "dataset";

    pub unsafe fn locate(gl: &glow::Context, program: glow::NativeProgram) -> Self {
        let found = Self {
            resolution: gl.get_uniform_location(program, Self::RESOLUTION),
            mouse: gl.get_uniform_location(program, Self::MOUSE),
            time: gl.get_uniform_location(program, Self::TIME),
            dataset: gl.get_uniform_location(program, Self::DATASET),
        };
        tracing::debug!(
            "uniforms: resolution={} mouse={} time={} dataset={}",
            found.resolution.is_some(),
            found.mouse.is_some(),
            found.time.is_some(),
            found.dataset.is_some()
        );
        found
    }

    // Setters expect the program to be bound.

    pub unsafe fn set_resolution(&self, gl: &glow::Context, w: f32, h: f32) {
        if let Some(loc) = &self.resolution {
            gl.uniform_2_f32(Some(loc), w, h);
        }
    }

    pub unsafe fn set_mouse(&self, gl: &glow::Context, x: f32, y: f32) {
        if let Some(loc) = &self.mouse {
            gl.uniform_2_f32(Some(loc), x, y);
        }
    }

    pub unsafe fn set_time(&self, gl: &glow::Context, t: f32) {
        if let Some(loc) = &self.time {
            gl.uniform_1_f32(Some(loc), t);
        }
    }

    pub unsafe fn set_dataset_unit(&self, gl: &glow::Context, unit: u32) {
        if let Some(loc) = &self.dataset {
            gl.uniform_1_i32(Some(loc), unit as i32);
        }
    }
}
