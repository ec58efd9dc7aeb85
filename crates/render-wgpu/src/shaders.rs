/// WGSL shader for the full-screen fractal pass.
///
/// The vertex stage synthesizes a single screen-covering triangle from the
/// vertex index, so no vertex buffer is bound. The fragment stage maps each
/// pixel to a complex point through center/zoom/aspect and runs the
/// escape-time iteration, with `kind` selecting Mandelbrot (z starts at the
/// pixel, c is the pixel) or Julia (z starts at the pixel, c is the uniform
/// constant).
pub const FRACTAL_SHADER: &str = r#"
struct Uniforms {
    center: vec2<f32>,
    julia_c: vec2<f32>,
    zoom: f32,
    aspect: f32,
    max_iter: u32,
    kind: u32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) ndc: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOutput {
    // Full-screen triangle: (-1,-1), (-1,3), (3,-1).
    let x = f32(index / 2u) * 4.0 - 1.0;
    let y = f32(index % 2u) * 4.0 - 1.0;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(x, y, 0.0, 1.0);
    out.ndc = vec2<f32>(x, y);
    return out;
}

const BASE_HALF_HEIGHT: f32 = 1.25;
const ESCAPE_RADIUS_SQ: f32 = 4.0;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let half_h = BASE_HALF_HEIGHT / uniforms.zoom;
    let point = uniforms.center
        + vec2<f32>(in.ndc.x * half_h * uniforms.aspect, in.ndc.y * half_h);

    var z: vec2<f32>;
    var c: vec2<f32>;
    if (uniforms.kind == 1u) {
        z = point;
        c = uniforms.julia_c;
    } else {
        z = vec2<f32>(0.0, 0.0);
        c = point;
    }

    var i: u32 = 0u;
    loop {
        if (i >= uniforms.max_iter) {
            break;
        }
        z = vec2<f32>(z.x * z.x - z.y * z.y, 2.0 * z.x * z.y) + c;
        if (dot(z, z) > ESCAPE_RADIUS_SQ) {
            break;
        }
        i = i + 1u;
    }

    if (i >= uniforms.max_iter) {
        return vec4<f32>(0.0, 0.0, 0.0, 1.0);
    }

    // Smooth iteration count, then a cosine palette.
    let log_zn = log2(max(dot(z, z), 1e-10)) * 0.5;
    let smooth_i = f32(i) + 1.0 - log2(max(log_zn, 1e-10));
    let t = smooth_i / f32(uniforms.max_iter);

    let phase = vec3<f32>(0.0, 0.33, 0.67);
    let color = 0.5 + 0.5 * cos(6.28318 * (3.0 * t + phase));
    return vec4<f32>(color, 1.0);
}
"#;
