use crate::backend::{Backend, BufferId, BufferKind, Draw, ProgramDesc, ProgramId, ShaderStage};
use crate::config::{ContextProfile, WindowConfig};
use crate::model::{LINE_STRIP, PointVertex};

use super::Scene;

const VERTEX_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(0.0, 1.0, 0.0, 1.0);
}
"#;

/// Green zig-zag drawn as a single line strip on black.
pub struct GreenLine {
    program: ProgramId,
    vertices: BufferId,
}

impl Scene for GreenLine {
    const WINDOW: WindowConfig = WindowConfig::new("Green Line", ContextProfile::Legacy);

    fn setup<B: Backend>(gfx: &mut B) -> Self {
        let vertex = gfx.compile_shader(ShaderStage::Vertex, "Line Vertex Shader", VERTEX_SHADER);
        let fragment =
            gfx.compile_shader(ShaderStage::Fragment, "Line Fragment Shader", FRAGMENT_SHADER);
        let program = gfx.link_program(&ProgramDesc {
            label: "Line Pipeline",
            vertex,
            fragment,
            layout: PointVertex::layout(),
            topology: wgpu::PrimitiveTopology::LineStrip,
            uniform: false,
        });
        gfx.delete_shader(vertex);
        gfx.delete_shader(fragment);

        let vertices = gfx.upload_buffer(
            BufferKind::Vertex,
            "Line Vertex Buffer",
            bytemuck::cast_slice(LINE_STRIP),
        );

        Self { program, vertices }
    }

    fn render<B: Backend>(&mut self, gfx: &mut B, _elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        gfx.clear(wgpu::Color::BLACK)?;
        gfx.draw(Draw::Arrays {
            program: self.program,
            vertices: self.vertices,
            count: LINE_STRIP.len() as u32,
        })
    }

    fn teardown<B: Backend>(self, gfx: &mut B) {
        gfx.release_buffer(self.vertices);
        gfx.release_program(self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, Recorder};

    #[test]
    fn draws_ten_point_strip_on_black() {
        let mut gfx = Recorder::default();
        let mut line = GreenLine::setup(&mut gfx);
        assert_eq!(gfx.uploads().len(), 1);
        assert_eq!(gfx.uploads()[0].1.len(), 10 * 2 * 4);

        gfx.calls.clear();
        line.render(&mut gfx, 3.0).unwrap();
        assert_eq!(
            gfx.calls,
            vec![
                Call::Clear(wgpu::Color::BLACK),
                Call::Draw(Draw::Arrays {
                    program: line.program,
                    vertices: line.vertices,
                    count: 10,
                }),
            ]
        );
    }

    #[test]
    fn links_a_line_strip() {
        let mut gfx = Recorder::default();
        GreenLine::setup(&mut gfx);
        assert_eq!(
            gfx.count(|c| matches!(
                c,
                Call::LinkProgram {
                    topology: wgpu::PrimitiveTopology::LineStrip,
                    stride: 8,
                    uniform: false,
                    ..
                }
            )),
            1
        );
    }
}
