use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::coords::FramebufferSize;
use crate::render::mesh::{self, Vertex};
use crate::render::ShaderCompileError;

const SHADER_LABEL: &str = "twirl triangle shader";

/// The compiled triangle program and its static vertex buffer.
///
/// Everything is created once at setup; per frame only the transform uniform
/// is rewritten.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    transform_ubo: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
}

impl TriangleRenderer {
    /// Compiles the shader, builds the pipeline and uploads the vertices.
    ///
    /// Fails with a [`ShaderCompileError`] carrying the compiler log if the
    /// shader module does not compile.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat) -> Result<Self> {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(SHADER_LABEL),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/triangle.wgsl").into()),
        });

        let info = pollster::block_on(shader.get_compilation_info());
        if let Some(err) = ShaderCompileError::from_info(SHADER_LABEL, &info) {
            return Err(err.into());
        }
        for msg in &info.messages {
            log::warn!("{SHADER_LABEL}: {:?}: {}", msg.message_type, msg.message);
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("twirl triangle bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<TransformUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("twirl triangle pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("twirl triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Vertex::layout()],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            // No culling: the back face shows for half of every turn.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let transform_ubo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("twirl transform ubo"),
            contents: bytemuck::bytes_of(&TransformUniform::from(Mat4::IDENTITY)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("twirl triangle bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_ubo.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("twirl triangle vbo"),
            contents: mesh::vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        log::debug!(
            "triangle program ready ({} vertices, {:?})",
            mesh::TRIANGLE_VERTEX_COUNT,
            format
        );

        Ok(Self {
            pipeline,
            bind_group,
            transform_ubo,
            vertex_buffer,
        })
    }

    /// Uploads `transform` and records one draw of the triangle into `view`.
    ///
    /// The pass loads the existing color contents; clearing is a separate pass.
    pub fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        transform: &Mat4,
        size: FramebufferSize,
    ) {
        queue.write_buffer(
            &self.transform_ubo,
            0,
            bytemuck::bytes_of(&TransformUniform::from(*transform)),
        );

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("twirl triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, size.width as f32, size.height as f32, 0.0, 1.0);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..mesh::TRIANGLE_VERTEX_COUNT, 0..1);
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct TransformUniform {
    mvp: [[f32; 4]; 4],
}

impl From<Mat4> for TransformUniform {
    fn from(m: Mat4) -> Self {
        Self {
            mvp: m.to_cols_array_2d(),
        }
    }
}
