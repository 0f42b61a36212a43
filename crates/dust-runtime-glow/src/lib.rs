//! dust runtime (glow/OpenGL backend)
//
// GL side of the demos: shader programs that can be swapped in place, the
// full-screen pass, and the dataset texture fed from `DatasetImage`.
// Windowing, file IO and reload policy live elsewhere.
#![allow(clippy::missing_safety_doc)]

use glow::HasContext;

mod dataset_texture;
mod uniforms;

pub use dataset_texture::DatasetTexture;
pub use uniforms::ShaderUniforms;

pub use dust_core::EngineError;
pub use dust_dataset::Rgba8;

/// Background used by both demos (245, 245, 245).
pub const RAYWHITE: Rgba8 = Rgba8::new(245, 245, 245, 255);

unsafe fn compile_stage(
    gl: &glow::Context,
    stage: u32,
    src: &str,
) -> Result<glow::NativeShader, EngineError> {
    let (name, compile_err): (&str, fn(String) -> EngineError) = match stage {
        glow::VERTEX_SHADER => ("vertex", EngineError::VertexCompile),
        _ => ("fragment", EngineError::FragmentCompile),
    };
    let shader = gl
        .create_shader(stage)
        .map_err(|e| EngineError::GlCreate(format!("{name} shader: {e}")))?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if gl.get_shader_compile_status(shader) {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        Err(compile_err(log))
    }
}

/// Compile both stages and link them. Shader objects never outlive the call.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vert_src: &str,
    frag_src: &str,
) -> Result<glow::NativeProgram, EngineError> {
    let vs = compile_stage(gl, glow::VERTEX_SHADER, vert_src)?;
    let fs = match compile_stage(gl, glow::FRAGMENT_SHADER, frag_src) {
        Ok(fs) => fs,
        Err(e) => {
            gl.delete_shader(vs);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(e) => {
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(EngineError::GlCreate(format!("program: {e}")));
        }
    };
    for shader in [vs, fs] {
        gl.attach_shader(program, shader);
    }
    gl.link_program(program);
    for shader in [vs, fs] {
        gl.detach_shader(program, shader);
        gl.delete_shader(shader);
    }

    if !gl.get_program_link_status(program) {
        let log = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(EngineError::Link(log));
    }
    Ok(program)
}

/// A full-screen fragment program plus its uniform locations.
///
/// Reloading builds the new program first and only then deletes the current one, so a
/// broken edit leaves the last good program in place. Locations are looked up again
/// after every successful swap.
#[derive(Debug)]
pub struct HotShader {
    program: glow::NativeProgram,
    uniforms: ShaderUniforms,
    /// True while running `FALLBACK_FRAG` because no user shader ever compiled.
    fallback: bool,
}

impl HotShader {
    pub unsafe fn new(gl: &glow::Context, frag_src: &str) -> Result<Self, EngineError> {
        let program = compile_program(gl, FULLSCREEN_VERT, frag_src)?;
        Ok(Self {
            program,
            uniforms: ShaderUniforms::locate(gl, program),
            fallback: false,
        })
    }

    /// Try `frag_src`; on failure log it and use [`FALLBACK_FRAG`] instead.
    pub unsafe fn new_or_fallback(
        gl: &glow::Context,
        frag_src: Result<String, EngineError>,
    ) -> Result<Self, EngineError> {
        let loaded = match frag_src {
            Ok(src) => Self::new(gl, &src),
            Err(e) => Err(e),
        };
        let err = match loaded {
            Ok(shader) => return Ok(shader),
            Err(e) => e,
        };
        tracing::error!("shader load failed, using fallback: {err}");
        let mut shader = Self::new(gl, FALLBACK_FRAG)?;
        shader.fallback = true;
        Ok(shader)
    }

    pub unsafe fn reload(&mut self, gl: &glow::Context, frag_src: &str) -> Result<(), EngineError> {
        let program = compile_program(gl, FULLSCREEN_VERT, frag_src)?;
        gl.delete_program(self.program);
        self.program = program;
        self.uniforms = ShaderUniforms::locate(gl, program);
        self.fallback = false;
        Ok(())
    }

    pub fn program(&self) -> glow::NativeProgram {
        self.program
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_program(self.program);
    }
}

/// Clear the bound framebuffer to `c`.
pub unsafe fn clear_color(gl: &glow::Context, c: Rgba8) {
    let f = |v: u8| f32::from(v) / 255.0;
    gl.clear_color(f(c.r), f(c.g), f(c.b), f(c.a));
    gl.clear(glow::COLOR_BUFFER_BIT);
}

/// One oversized triangle covering clip space; draws with 3 vertices and no index buffer.
#[derive(Debug)]
pub struct FullscreenTriangle {
    vao: glow::NativeVertexArray,
    vbo: glow::NativeBuffer,
}

impl FullscreenTriangle {
    const CORNERS: [[f32; 2]; 3] = [[-1.0, -1.0], [3.0, -1.0], [-1.0, 3.0]];

    pub unsafe fn new(gl: &glow::Context) -> Result<Self, EngineError> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| EngineError::GlCreate(format!("fullscreen vao: {e}")))?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(e) => {
                gl.delete_vertex_array(vao);
                return Err(EngineError::GlCreate(format!("fullscreen vbo: {e}")));
            }
        };

        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&Self::CORNERS),
            glow::STATIC_DRAW,
        );
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, 2 * 4, 0);
        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Self { vao, vbo })
    }

    pub unsafe fn draw(&self, gl: &glow::Context) {
        gl.bind_vertex_array(Some(self.vao));
        gl.draw_arrays(glow::TRIANGLES, 0, Self::CORNERS.len() as i32);
        gl.bind_vertex_array(None);
    }

    pub unsafe fn destroy(&mut self, gl: &glow::Context) {
        gl.delete_buffer(self.vbo);
        gl.delete_vertex_array(self.vao);
    }
}

/// Passes clip-space corners through; `v_uv` is 0..1 across the visible screen.
pub const FULLSCREEN_VERT: &str = r#"#version 330 core
layout (location = 0) in vec2 a_pos;
out vec2 v_uv;
void main() {
    v_uv = a_pos * 0.5 + 0.5;
    gl_Position = vec4(a_pos, 0.0, 1.0);
}
"#;

/// Plain white, what the screen shows when no user shader is loaded.
pub const FALLBACK_FRAG: &str = r#"#version 330 core
in vec2 v_uv;
out vec4 fragColor;
void main() { fragColor = vec4(1.0); }
"#;
