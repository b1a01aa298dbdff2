//! GPU-side data layout and the WGSL used to draw boids.
//!
//! Each boid is one instance of a three-vertex arrow glyph. The vertex shader
//! orients the glyph along the boid's heading and maps world coordinates
//! (origin top-left, y down) to clip space.

use crate::boid::BoidView;
use bytemuck::{Pod, Zeroable};

/// Per-boid instance data.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoidInstance {
    pub position: [f32; 2],
    pub heading: [f32; 2],
}

impl BoidInstance {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BoidInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

impl From<BoidView> for BoidInstance {
    fn from(view: BoidView) -> Self {
        Self {
            position: view.position.to_array(),
            heading: view.heading.to_array(),
        }
    }
}

/// Render uniforms. Must match `Uniforms` in [`RENDER_SHADER`].
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    pub world_size: [f32; 2],
    pub glyph_size: f32,
    pub _pad: f32,
}

impl Uniforms {
    pub fn new(width: f32, height: f32, glyph_size: f32) -> Self {
        Self {
            world_size: [width, height],
            glyph_size,
            _pad: 0.0,
        }
    }
}

/// Glyph length in world units.
pub const GLYPH_SIZE: f32 = 6.0;

pub const RENDER_SHADER: &str = r#"
struct Uniforms {
    world_size: vec2<f32>,
    glyph_size: f32,
    _pad: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) boid_pos: vec2<f32>,
    @location(1) heading: vec2<f32>,
) -> VertexOutput {
    var glyph = array<vec2<f32>, 3>(
        vec2<f32>( 1.0,  0.0),
        vec2<f32>(-0.6,  0.5),
        vec2<f32>(-0.6, -0.5),
    );

    // Motionless boids point along +x.
    var forward = heading;
    if dot(forward, forward) < 1e-12 {
        forward = vec2<f32>(1.0, 0.0);
    }
    let side = vec2<f32>(-forward.y, forward.x);

    let local = glyph[vertex_index];
    let world = boid_pos + (forward * local.x + side * local.y) * uniforms.glyph_size;
    let ndc = vec2<f32>(
        world.x / uniforms.world_size.x * 2.0 - 1.0,
        1.0 - world.y / uniforms.world_size.y * 2.0,
    );

    var out: VertexOutput;
    out.clip_position = vec4<f32>(ndc, 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(0.0, 0.0, 1.0, 1.0);
}
"#;
