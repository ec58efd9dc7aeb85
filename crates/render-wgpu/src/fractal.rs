use crate::shaders;
use bytemuck::{Pod, Zeroable};
use mandelscope_view::{FractalKind, FractalView};

/// Per-frame shader parameters. Layout mirrors the WGSL `Uniforms` struct:
/// two vec2s then four scalars, 32 bytes with no padding.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Uniforms {
    center: [f32; 2],
    julia_c: [f32; 2],
    zoom: f32,
    aspect: f32,
    max_iter: u32,
    kind: u32,
}

impl Uniforms {
    pub fn from_view(view: &FractalView, aspect: f32) -> Self {
        Self {
            center: view.center().to_array(),
            julia_c: view.julia_c().to_array(),
            zoom: view.zoom(),
            aspect,
            max_iter: view.max_iterations(),
            kind: match view.kind() {
                FractalKind::Mandelbrot => 0,
                FractalKind::Julia => 1,
            },
        }
    }
}

/// wgpu-based fractal renderer: one uniform buffer, one full-screen
/// triangle pass, no vertex or depth buffers.
pub struct FractalRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl FractalRenderer {
    /// Build the renderer. If `shader_override` is given it is validated
    /// first; on validation failure the error is logged and the embedded
    /// shader is used instead, so a broken shader file never takes the
    /// viewer down.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_override: Option<&str>,
    ) -> Self {
        let shader = Self::compile_shader(device, shader_override);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal_uniform_buffer"),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("fractal_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractal_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("fractal_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("fractal_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            uniform_buffer,
            uniform_bind_group,
        }
    }

    /// Compile the override shader under a validation error scope, falling
    /// back to the embedded shader when it fails.
    fn compile_shader(
        device: &wgpu::Device,
        shader_override: Option<&str>,
    ) -> wgpu::ShaderModule {
        if let Some(source) = shader_override {
            device.push_error_scope(wgpu::ErrorFilter::Validation);
            let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("fractal_shader_override"),
                source: wgpu::ShaderSource::Wgsl(source.into()),
            });
            match pollster::block_on(device.pop_error_scope()) {
                None => {
                    tracing::info!("using shader override");
                    return module;
                }
                Some(e) => {
                    tracing::error!("shader override failed to compile: {e}");
                }
            }
        }

        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("fractal_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::FRACTAL_SHADER.into()),
        })
    }

    /// Render one frame: upload the uniforms and draw the full-screen
    /// triangle. The renderer never mutates view state.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target: &wgpu::TextureView,
        view: &FractalView,
        aspect: f32,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_view(view, aspect)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("fractal_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractal_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}
