//! WebGL capability probe and shader backend
//!
//! Thin wrappers over the raw WebGL bindings: the throwaway capability
//! probe, shader compilation/linking with info-log errors, the
//! fullscreen quad geometry and the per-frame uniform upload.

use wasm_bindgen::JsCast;
use web_sys::{
    HtmlCanvasElement, WebGlProgram, WebGlRenderingContext as GL, WebGlShader,
    WebGlUniformLocation,
};

use crate::engine::FrameUniforms;
use crate::shaders::{FLOW_FRAGMENT_SHADER, VERTEX_SHADER};

/// Live GL resources for the shader backend.
pub(crate) struct GlState {
    pub gl: GL,
    #[allow(dead_code)]
    program: WebGlProgram,
    uniforms: UniformLocations,
}

struct UniformLocations {
    time: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    colors: [Option<WebGlUniformLocation>; 4],
}

/// Obtain a WebGL context, trying the standard name first and the
/// legacy prefixed one second.
fn get_webgl_context(canvas: &HtmlCanvasElement) -> Option<GL> {
    for name in ["webgl", "experimental-webgl"] {
        if let Ok(Some(ctx)) = canvas.get_context(name) {
            if let Ok(gl) = ctx.dyn_into::<GL>() {
                return Some(gl);
            }
        }
    }
    None
}

/// Capability probe: can this host create a working GL context and two
/// shader stages?
///
/// Advisory only: the throwaway surface is discarded and the real
/// backend derives its own context. Never throws; every failure maps to
/// `false`.
pub(crate) fn detect_webgl_support() -> bool {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return false,
    };
    let canvas = match document
        .create_element("canvas")
        .ok()
        .and_then(|e| e.dyn_into::<HtmlCanvasElement>().ok())
    {
        Some(c) => c,
        None => return false,
    };
    let gl = match get_webgl_context(&canvas) {
        Some(gl) => gl,
        None => return false,
    };
    let vs = gl.create_shader(GL::VERTEX_SHADER);
    let fs = gl.create_shader(GL::FRAGMENT_SHADER);
    vs.is_some() && fs.is_some()
}

fn compile_shader(gl: &GL, shader_type: u32, source: &str) -> Result<WebGlShader, String> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| "could not create shader".to_string())?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(format!("shader compilation failed: {}", log))
    }
}

fn link_program(gl: &GL, vert: &WebGlShader, frag: &WebGlShader) -> Result<WebGlProgram, String> {
    let program = gl
        .create_program()
        .ok_or_else(|| "could not create program".to_string())?;
    gl.attach_shader(&program, vert);
    gl.attach_shader(&program, frag);
    gl.link_program(&program);
    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        Err(format!(
            "shader linking failed: {}",
            gl.get_program_info_log(&program).unwrap_or_default()
        ))
    }
}

impl GlState {
    /// Build the full shader backend on a canvas.
    ///
    /// Any compile/link failure here is a setup error the caller must
    /// redirect to the CSS fallback; it is distinct from the advisory
    /// probe and can still fail after a positive probe.
    pub(crate) fn new(canvas: &HtmlCanvasElement) -> Result<Self, String> {
        let gl =
            get_webgl_context(canvas).ok_or_else(|| "failed to get WebGL context".to_string())?;

        let vert = compile_shader(&gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let frag = compile_shader(&gl, GL::FRAGMENT_SHADER, FLOW_FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vert, &frag)?;
        gl.use_program(Some(&program));

        // Fullscreen triangle-strip quad
        let vertices: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| "could not create vertex buffer".to_string())?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        let array = js_sys::Float32Array::from(&vertices[..]);
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);

        let position = gl.get_attrib_location(&program, "a_position");
        if position < 0 {
            return Err("missing a_position attribute".to_string());
        }
        gl.enable_vertex_attrib_array(position as u32);
        gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);

        let uniforms = UniformLocations {
            time: gl.get_uniform_location(&program, "u_time"),
            resolution: gl.get_uniform_location(&program, "u_resolution"),
            mouse: gl.get_uniform_location(&program, "u_mouse"),
            colors: [
                gl.get_uniform_location(&program, "u_color1"),
                gl.get_uniform_location(&program, "u_color2"),
                gl.get_uniform_location(&program, "u_color3"),
                gl.get_uniform_location(&program, "u_color4"),
            ],
        };

        Ok(Self { gl, program, uniforms })
    }

    /// Match the GL viewport to the canvas backing store.
    pub(crate) fn set_viewport(&self, width: u32, height: u32) {
        self.gl.viewport(0, 0, width as i32, height as i32);
    }

    /// Upload one frame's uniforms and issue the draw call.
    pub(crate) fn draw(&self, u: &FrameUniforms) {
        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.uniform1f(self.uniforms.time.as_ref(), u.time);
        gl.uniform2f(self.uniforms.resolution.as_ref(), u.resolution[0], u.resolution[1]);
        gl.uniform2f(self.uniforms.mouse.as_ref(), u.pointer[0], u.pointer[1]);
        for (loc, c) in self.uniforms.colors.iter().zip(u.colors.iter()) {
            gl.uniform3f(loc.as_ref(), c[0], c[1], c[2]);
        }

        gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
    }
}
