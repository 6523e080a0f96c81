use crate::backend::{Backend, BufferId, BufferKind, Draw, ProgramDesc, ProgramId, ShaderStage};
use crate::config::{ContextProfile, WindowConfig};
use crate::model::{ColorVertex, TRIANGLE_VERTICES};

use super::Scene;

const VERTEX_SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(position, 1.0);
    out.color = color;
    return out;
}
"#;

const FRAGMENT_SHADER: &str = r#"
struct TimeUniform {
    multiplier: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: TimeUniform;

@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color * uniforms.multiplier, 1.0);
}
"#;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.1,
    g: 0.1,
    b: 0.1,
    a: 1.0,
};

/// Brightness factor at `elapsed` seconds, always within `[0, 1]`.
pub fn color_multiplier(elapsed: f32) -> f32 {
    elapsed.sin() / 2.0 + 0.5
}

/// RGB triangle whose brightness pulses with time.
pub struct ColorTriangle {
    program: ProgramId,
    vertices: BufferId,
}

impl Scene for ColorTriangle {
    const WINDOW: WindowConfig = WindowConfig::new("Color Changing Triangle", ContextProfile::Core);

    fn setup<B: Backend>(gfx: &mut B) -> Self {
        let vertex = gfx.compile_shader(ShaderStage::Vertex, "Triangle Vertex Shader", VERTEX_SHADER);
        let fragment = gfx.compile_shader(
            ShaderStage::Fragment,
            "Triangle Fragment Shader",
            FRAGMENT_SHADER,
        );
        let program = gfx.link_program(&ProgramDesc {
            label: "Triangle Pipeline",
            vertex,
            fragment,
            layout: ColorVertex::layout(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            uniform: true,
        });
        gfx.delete_shader(vertex);
        gfx.delete_shader(fragment);

        let vertices = gfx.upload_buffer(
            BufferKind::Vertex,
            "Triangle Vertex Buffer",
            bytemuck::cast_slice(TRIANGLE_VERTICES),
        );

        Self { program, vertices }
    }

    fn render<B: Backend>(&mut self, gfx: &mut B, elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        gfx.clear(CLEAR_COLOR)?;
        gfx.set_uniform(self.program, color_multiplier(elapsed));
        gfx.draw(Draw::Arrays {
            program: self.program,
            vertices: self.vertices,
            count: TRIANGLE_VERTICES.len() as u32,
        })
    }

    fn teardown<B: Backend>(self, gfx: &mut B) {
        gfx.release_buffer(self.vertices);
        gfx.release_program(self.program);
    }
}
