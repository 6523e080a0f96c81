use std::{iter, sync::Arc};

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::backend::{Backend, BufferId, BufferKind, Draw, ProgramDesc, ProgramId, ShaderId, ShaderStage};
use crate::config::WindowConfig;

struct Program {
    pipeline: wgpu::RenderPipeline,
    uniform: Option<Uniform>,
}

struct Uniform {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Uniform blocks are padded to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct UniformBlock {
    value: f32,
    _padding: [f32; 3],
}

struct Frame {
    output: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
    clear: Option<wgpu::Color>,
}

/// wgpu device, surface and every resource a scene created on them.
pub struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    shaders: Vec<Option<(ShaderStage, wgpu::ShaderModule)>>,
    programs: Vec<Option<Program>>,
    buffers: Vec<Option<wgpu::Buffer>>,
    frame: Option<Frame>,
}

impl Gpu {
    pub async fn new(window: Arc<Window>, window_config: &WindowConfig) -> Result<Gpu> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no compatible graphics adapter")?;

        let info = adapter.get_info();
        log::info!("using {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: window_config.profile.limits(),
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to initialize graphics device")?;

        // Broken shaders render nothing instead of aborting.
        device.on_uncaptured_error(Box::new(|error: wgpu::Error| {
            log::error!("uncaptured gpu error: {error}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);

        // Linear formats keep clear colours identical to the values written.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &config);
        log::info!(
            "surface configured: {:?} {}x{}",
            config.format,
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            shaders: Vec::new(),
            programs: Vec::new(),
            buffers: Vec::new(),
            frame: None,
        })
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    /// Validation errors from `f` are logged and otherwise ignored.
    fn report_errors<T>(&self, what: &str, f: impl FnOnce(&wgpu::Device) -> T) -> T {
        self.device.push_error_scope(wgpu::ErrorFilter::Validation);
        let value = f(&self.device);
        if let Some(error) = pollster::block_on(self.device.pop_error_scope()) {
            log::error!("{what} failed: {error}");
        }
        value
    }

    fn begin_frame(&mut self) -> Result<(), wgpu::SurfaceError> {
        if self.frame.is_some() {
            return Ok(());
        }

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.frame = Some(Frame {
            output,
            view,
            encoder,
            clear: None,
        });
        Ok(())
    }
}

impl Backend for Gpu {
    fn compile_shader(&mut self, stage: ShaderStage, label: &str, source: &str) -> ShaderId {
        let module = self.report_errors(label, |device| {
            device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            })
        });
        log::debug!("compiled {stage:?} shader {label}");

        self.shaders.push(Some((stage, module)));
        ShaderId(self.shaders.len() - 1)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        if let Some(slot) = self.shaders.get_mut(shader.0) {
            slot.take();
        }
    }

    fn link_program(&mut self, desc: &ProgramDesc) -> ProgramId {
        let module = |id: ShaderId| {
            self.shaders
                .get(id.0)
                .and_then(Option::as_ref)
                .map(|(_, module)| module)
        };

        let (Some(vertex), Some(fragment)) = (module(desc.vertex), module(desc.fragment)) else {
            log::error!("{}: linking against a deleted shader", desc.label);
            self.programs.push(None);
            return ProgramId(self.programs.len() - 1);
        };

        let format = self.config.format;
        let program = self.report_errors(desc.label, |device| {
            let uniform_layout = desc.uniform.then(|| {
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Uniform Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                })
            });

            let bind_group_layouts: Vec<&wgpu::BindGroupLayout> =
                uniform_layout.iter().collect();

            let render_pipeline_layout =
                device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: Some("Render Pipeline Layout"),
                    bind_group_layouts: &bind_group_layouts,
                    push_constant_ranges: &[],
                });

            let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(desc.label),
                layout: Some(&render_pipeline_layout),
                vertex: wgpu::VertexState {
                    module: vertex,
                    entry_point: Some(ShaderStage::Vertex.entry_point()),
                    buffers: &[desc.layout.clone()],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: fragment,
                    entry_point: Some(ShaderStage::Fragment.entry_point()),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: desc.topology,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            });

            let uniform = uniform_layout.map(|layout| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("Uniform Buffer"),
                    contents: bytemuck::bytes_of(&UniformBlock {
                        value: 0.0,
                        _padding: [0.0; 3],
                    }),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("Uniform Bind Group"),
                    layout: &layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                Uniform { buffer, bind_group }
            });

            Program { pipeline, uniform }
        });
        log::debug!("linked program {}", desc.label);

        self.programs.push(Some(program));
        ProgramId(self.programs.len() - 1)
    }

    fn upload_buffer(&mut self, kind: BufferKind, label: &str, contents: &[u8]) -> BufferId {
        let usage = match kind {
            BufferKind::Vertex => wgpu::BufferUsages::VERTEX,
            BufferKind::Index => wgpu::BufferUsages::INDEX,
        };
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            });
        log::debug!("uploaded {} bytes to {label}", contents.len());

        self.buffers.push(Some(buffer));
        BufferId(self.buffers.len() - 1)
    }

    fn set_uniform(&mut self, program: ProgramId, value: f32) {
        let Some(uniform) = self
            .programs
            .get(program.0)
            .and_then(Option::as_ref)
            .and_then(|p| p.uniform.as_ref())
        else {
            return;
        };

        self.queue.write_buffer(
            &uniform.buffer,
            0,
            bytemuck::bytes_of(&UniformBlock {
                value,
                _padding: [0.0; 3],
            }),
        );
    }

    fn clear(&mut self, color: wgpu::Color) -> Result<(), wgpu::SurfaceError> {
        self.begin_frame()?;
        if let Some(frame) = self.frame.as_mut() {
            frame.clear = Some(color);
        }
        Ok(())
    }

    fn draw(&mut self, draw: Draw) -> Result<(), wgpu::SurfaceError> {
        self.begin_frame()?;
        let Some(frame) = self.frame.as_mut() else {
            return Ok(());
        };

        let load = match frame.clear.take() {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        };

        let mut render_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        let buffer = |id: BufferId| self.buffers.get(id.0).and_then(Option::as_ref);
        let program = |id: ProgramId| self.programs.get(id.0).and_then(Option::as_ref);

        match draw {
            Draw::Arrays {
                program: program_id,
                vertices,
                count,
            } => {
                let (Some(program), Some(vertices)) = (program(program_id), buffer(vertices))
                else {
                    return Ok(());
                };
                render_pass.set_pipeline(&program.pipeline);
                if let Some(uniform) = &program.uniform {
                    render_pass.set_bind_group(0, &uniform.bind_group, &[]);
                }
                render_pass.set_vertex_buffer(0, vertices.slice(..));
                render_pass.draw(0..count, 0..1);
            }
            Draw::Elements {
                program: program_id,
                vertices,
                indices,
                count,
            } => {
                let (Some(program), Some(vertices), Some(indices)) =
                    (program(program_id), buffer(vertices), buffer(indices))
                else {
                    return Ok(());
                };
                render_pass.set_pipeline(&program.pipeline);
                if let Some(uniform) = &program.uniform {
                    render_pass.set_bind_group(0, &uniform.bind_group, &[]);
                }
                render_pass.set_vertex_buffer(0, vertices.slice(..));
                render_pass.set_index_buffer(indices.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..count, 0, 0..1);
            }
        }

        Ok(())
    }

    fn present(&mut self) {
        let Some(mut frame) = self.frame.take() else {
            return;
        };

        // A frame that was cleared but never drawn still needs its clear pass.
        if let Some(color) = frame.clear.take() {
            let _clear_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Clear Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
        }

        self.queue.submit(iter::once(frame.encoder.finish()));
        frame.output.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.size = winit::dpi::PhysicalSize::new(width, height);
            self.config.width = width;
            self.config.height = height;
            // Frames acquired at the old size are dropped unpresented.
            self.frame = None;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn release_buffer(&mut self, buffer: BufferId) {
        if let Some(buffer) = self.buffers.get_mut(buffer.0).and_then(Option::take) {
            buffer.destroy();
        }
    }

    fn release_program(&mut self, program: ProgramId) {
        if let Some(program) = self.programs.get_mut(program.0).and_then(Option::take) {
            if let Some(uniform) = program.uniform {
                uniform.buffer.destroy();
            }
        }
    }
}
