/// Pass-through vertex stage for the fullscreen quad.
///
/// Forwards the clip-space quad position unchanged and derives a
/// `[0, 1]` UV alongside the raw `[-1, 1]` position for the fragment
/// stage's noise and mouse math.
pub const VERTEX_SHADER: &str = r#"
attribute vec2 a_position;
varying vec2 v_uv;
varying vec2 v_position;

void main() {
    v_uv = a_position * 0.5 + 0.5;
    v_position = a_position;
    gl_Position = vec4(a_position, 0.0, 1.0);
}
"#;
