/// Flowing-gradient fragment stage.
///
/// Hashed-lattice value noise sampled at two spatial/temporal
/// frequencies and averaged into a scalar flow field; pointer proximity
/// adds intensity with a smooth radial falloff (zero beyond 1.5
/// clip-space units); three oscillating weights blend the four palette
/// colors pairwise; a low-amplitude breathing term scales brightness
/// within `[0.8, 1.0]`. Output is opaque RGB.
pub const FLOW_FRAGMENT_SHADER: &str = r#"
precision mediump float;

uniform float u_time;
uniform vec2 u_resolution;
uniform vec2 u_mouse;
uniform vec3 u_color1;
uniform vec3 u_color2;
uniform vec3 u_color3;
uniform vec3 u_color4;

varying vec2 v_uv;
varying vec2 v_position;

float random(vec2 st) {
    return fract(sin(dot(st.xy, vec2(12.9898, 78.233))) * 43758.5453123);
}

float noise(vec2 st) {
    vec2 i = floor(st);
    vec2 f = fract(st);

    float a = random(i);
    float b = random(i + vec2(1.0, 0.0));
    float c = random(i + vec2(0.0, 1.0));
    float d = random(i + vec2(1.0, 1.0));

    vec2 u = f * f * (3.0 - 2.0 * f);

    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

void main() {
    vec2 pos = v_position;

    float n1 = noise(pos * 3.0 + u_time * 0.1);
    float n2 = noise(pos * 2.0 - u_time * 0.05);
    float flow = (n1 + n2) * 0.5;

    vec2 mousePos = (u_mouse - 0.5) * 2.0;
    float mouseDist = length(pos - mousePos);
    float mouseEffect = 1.0 - smoothstep(0.0, 1.5, mouseDist);
    flow += mouseEffect * 0.3;

    float mixer1 = sin(flow * 2.0 + u_time * 0.2) * 0.5 + 0.5;
    float mixer2 = cos(flow * 2.5 - u_time * 0.15) * 0.5 + 0.5;
    float mixer3 = sin(u_time * 0.1 + flow) * 0.5 + 0.5;

    vec3 blend1 = mix(u_color1, u_color2, mixer1);
    vec3 blend2 = mix(u_color3, u_color4, mixer2);
    vec3 gradient = mix(blend1, blend2, mixer3);

    gradient *= 0.8 + 0.2 * (sin(flow * 4.0 + u_time * 0.5) * 0.5 + 0.5);

    gl_FragColor = vec4(gradient, 1.0);
}
"#;
