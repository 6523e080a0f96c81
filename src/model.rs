#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    position: [f32; 2],
}

impl PointVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    position: [f32; 3],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Position followed by colour, interleaved.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorVertex {
    position: [f32; 3],
    color: [f32; 3],
}

impl ColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

// Zig-zag path; the repeated centre point is intentional.
pub const LINE_STRIP: &[PointVertex] = &[
    PointVertex { position: [-0.8, -0.8] },
    PointVertex { position: [0.0, 0.0] },
    PointVertex { position: [0.0, 0.0] },
    PointVertex { position: [0.8, -0.8] },
    PointVertex { position: [0.65, -0.9] },
    PointVertex { position: [0.36, -0.6] },
    PointVertex { position: [0.0, -0.8] },
    PointVertex { position: [-0.36, -0.6] },
    PointVertex { position: [-0.65, -0.9] },
    PointVertex { position: [-0.8, -0.8] },
];

pub const RECTANGLE_VERTICES: &[Vertex] = &[
    // top right
    Vertex {
        position: [0.5, 0.5, 0.0],
    },
    // bottom right
    Vertex {
        position: [0.5, -0.5, 0.0],
    },
    // bottom left
    Vertex {
        position: [-0.5, -0.5, 0.0],
    },
    // top left
    Vertex {
        position: [-0.5, 0.5, 0.0],
    },
];

pub const RECTANGLE_INDICES: &[u32] = &[0, 1, 3, 1, 2, 3];

pub const TRIANGLE_VERTICES: &[ColorVertex] = &[
    ColorVertex {
        position: [0.0, 0.5, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColorVertex {
        position: [-0.5, -0.5, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColorVertex {
        position: [0.5, -0.5, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];
