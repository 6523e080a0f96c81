// The handful of GPU calls the scenes need, kept behind a trait so a scene can
// be driven by the real wgpu device or by a recorder in tests.

/// Pipeline stage a shader source is compiled for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// WGSL entry point every stage source exposes.
    pub fn entry_point(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vs_main",
            ShaderStage::Fragment => "fs_main",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Vertex,
    Index,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ShaderId(pub(crate) usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub(crate) usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BufferId(pub(crate) usize);

/// Everything needed to link two compiled stages into a program.
#[derive(Clone, Debug)]
pub struct ProgramDesc<'a> {
    pub label: &'a str,
    pub vertex: ShaderId,
    pub fragment: ShaderId,
    pub layout: wgpu::VertexBufferLayout<'a>,
    pub topology: wgpu::PrimitiveTopology,
    /// Whether the program reads a single `f32` uniform at group 0, binding 0.
    pub uniform: bool,
}

/// One draw call against a linked program.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Draw {
    Arrays {
        program: ProgramId,
        vertices: BufferId,
        count: u32,
    },
    Elements {
        program: ProgramId,
        vertices: BufferId,
        indices: BufferId,
        count: u32,
    },
}

pub trait Backend {
    fn compile_shader(&mut self, stage: ShaderStage, label: &str, source: &str) -> ShaderId;

    fn delete_shader(&mut self, shader: ShaderId);

    fn link_program(&mut self, desc: &ProgramDesc) -> ProgramId;

    /// Uploads `contents` once; the buffer is immutable afterwards.
    fn upload_buffer(&mut self, kind: BufferKind, label: &str, contents: &[u8]) -> BufferId;

    fn set_uniform(&mut self, program: ProgramId, value: f32);

    /// Starts a frame and clears the colour target.
    fn clear(&mut self, color: wgpu::Color) -> Result<(), wgpu::SurfaceError>;

    fn draw(&mut self, draw: Draw) -> Result<(), wgpu::SurfaceError>;

    fn present(&mut self);

    fn resize(&mut self, width: u32, height: u32);

    fn release_buffer(&mut self, buffer: BufferId);

    fn release_program(&mut self, program: ProgramId);
}
