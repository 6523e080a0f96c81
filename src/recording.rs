use crate::backend::{Backend, BufferId, BufferKind, Draw, ProgramDesc, ProgramId, ShaderId, ShaderStage};

#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    CompileShader(ShaderStage, String),
    DeleteShader(ShaderId),
    LinkProgram {
        vertex: ShaderId,
        fragment: ShaderId,
        topology: wgpu::PrimitiveTopology,
        stride: u64,
        uniform: bool,
    },
    UploadBuffer(BufferKind, Vec<u8>),
    SetUniform(ProgramId, f32),
    Clear(wgpu::Color),
    Draw(Draw),
    Present,
    Resize(u32, u32),
    ReleaseBuffer(BufferId),
    ReleaseProgram(ProgramId),
}

/// Backend that records every call instead of touching a GPU.
#[derive(Default)]
pub struct Recorder {
    pub calls: Vec<Call>,
    shaders: usize,
    programs: usize,
    buffers: usize,
}

impl Recorder {
    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|&c| f(c)).count()
    }

    pub fn uploads(&self) -> Vec<(BufferKind, &[u8])> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::UploadBuffer(kind, bytes) => Some((*kind, bytes.as_slice())),
                _ => None,
            })
            .collect()
    }
}

impl Backend for Recorder {
    fn compile_shader(&mut self, stage: ShaderStage, _label: &str, source: &str) -> ShaderId {
        self.calls.push(Call::CompileShader(stage, source.to_string()));
        self.shaders += 1;
        ShaderId(self.shaders - 1)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.calls.push(Call::DeleteShader(shader));
    }

    fn link_program(&mut self, desc: &ProgramDesc) -> ProgramId {
        self.calls.push(Call::LinkProgram {
            vertex: desc.vertex,
            fragment: desc.fragment,
            topology: desc.topology,
            stride: desc.layout.array_stride,
            uniform: desc.uniform,
        });
        self.programs += 1;
        ProgramId(self.programs - 1)
    }

    fn upload_buffer(&mut self, kind: BufferKind, _label: &str, contents: &[u8]) -> BufferId {
        self.calls.push(Call::UploadBuffer(kind, contents.to_vec()));
        self.buffers += 1;
        BufferId(self.buffers - 1)
    }

    fn set_uniform(&mut self, program: ProgramId, value: f32) {
        self.calls.push(Call::SetUniform(program, value));
    }

    fn clear(&mut self, color: wgpu::Color) -> Result<(), wgpu::SurfaceError> {
        self.calls.push(Call::Clear(color));
        Ok(())
    }

    fn draw(&mut self, draw: Draw) -> Result<(), wgpu::SurfaceError> {
        self.calls.push(Call::Draw(draw));
        Ok(())
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Resize(width, height));
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        self.calls.push(Call::ReleaseBuffer(buffer));
    }

    fn release_program(&mut self, program: ProgramId) {
        self.calls.push(Call::ReleaseProgram(program));
    }
}
