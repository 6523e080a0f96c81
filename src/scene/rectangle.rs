use crate::backend::{Backend, BufferId, BufferKind, Draw, ProgramDesc, ProgramId, ShaderStage};
use crate::config::{ContextProfile, WindowConfig};
use crate::model::{RECTANGLE_INDICES, RECTANGLE_VERTICES, Vertex};

use super::Scene;

const VERTEX_SHADER: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0, 1.0, 0.0, 1.0);
}
"#;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.2,
    g: 0.3,
    b: 0.3,
    a: 1.0,
};

/// Yellow quad assembled from four vertices and six indices.
pub struct Rectangle {
    program: ProgramId,
    vertices: BufferId,
    indices: BufferId,
}

impl Scene for Rectangle {
    const WINDOW: WindowConfig = WindowConfig::new("Rectangle", ContextProfile::Core);

    fn setup<B: Backend>(gfx: &mut B) -> Self {
        let vertices = gfx.upload_buffer(
            BufferKind::Vertex,
            "Rectangle Vertex Buffer",
            bytemuck::cast_slice(RECTANGLE_VERTICES),
        );
        let indices = gfx.upload_buffer(
            BufferKind::Index,
            "Rectangle Index Buffer",
            bytemuck::cast_slice(RECTANGLE_INDICES),
        );

        let vertex =
            gfx.compile_shader(ShaderStage::Vertex, "Rectangle Vertex Shader", VERTEX_SHADER);
        let fragment = gfx.compile_shader(
            ShaderStage::Fragment,
            "Rectangle Fragment Shader",
            FRAGMENT_SHADER,
        );
        let program = gfx.link_program(&ProgramDesc {
            label: "Rectangle Pipeline",
            vertex,
            fragment,
            layout: Vertex::layout(),
            topology: wgpu::PrimitiveTopology::TriangleList,
            uniform: false,
        });
        gfx.delete_shader(vertex);
        gfx.delete_shader(fragment);

        Self {
            program,
            vertices,
            indices,
        }
    }

    fn render<B: Backend>(&mut self, gfx: &mut B, _elapsed: f32) -> Result<(), wgpu::SurfaceError> {
        gfx.clear(CLEAR_COLOR)?;
        gfx.draw(Draw::Elements {
            program: self.program,
            vertices: self.vertices,
            indices: self.indices,
            count: RECTANGLE_INDICES.len() as u32,
        })
    }

    fn teardown<B: Backend>(self, gfx: &mut B) {
        gfx.release_buffer(self.vertices);
        gfx.release_buffer(self.indices);
        gfx.release_program(self.program);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{Call, Recorder};

    #[test]
    fn uploads_vertices_then_indices() {
        let mut gfx = Recorder::default();
        Rectangle::setup(&mut gfx);

        let uploads = gfx.uploads();
        assert_eq!(uploads.len(), 2);
        assert_eq!(uploads[0].0, BufferKind::Vertex);
        let positions: [f32; 12] = [0.5, 0.5, 0.0, 0.5, -0.5, 0.0, -0.5, -0.5, 0.0, -0.5, 0.5, 0.0];
        assert_eq!(uploads[0].1, bytemuck::cast_slice::<f32, u8>(&positions));
        assert_eq!(uploads[1].0, BufferKind::Index);
        let indices: [u32; 6] = [0, 1, 3, 1, 2, 3];
        assert_eq!(uploads[1].1, bytemuck::cast_slice::<u32, u8>(&indices));
    }

    #[test]
    fn fragment_shader_is_well_formed() {
        let mut gfx = Recorder::default();
        Rectangle::setup(&mut gfx);
        let fragment = gfx.calls.iter().find_map(|c| match c {
            Call::CompileShader(ShaderStage::Fragment, source) => Some(source.clone()),
            _ => None,
        });
        let fragment = fragment.unwrap();
        assert!(fragment.contains("@fragment"));
        assert!(fragment.contains("fn fs_main"));
    }

    #[test]
    fn draws_six_indices() {
        let mut gfx = Recorder::default();
        let mut rect = Rectangle::setup(&mut gfx);
        gfx.calls.clear();
        rect.render(&mut gfx, 0.0).unwrap();

        assert_eq!(gfx.calls[0], Call::Clear(CLEAR_COLOR));
        assert!(matches!(
            gfx.calls[1],
            Call::Draw(Draw::Elements { count: 6, .. })
        ));
        assert_eq!(gfx.calls.len(), 2);
    }
}
