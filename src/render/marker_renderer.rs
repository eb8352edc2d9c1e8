//! Marker-Renderer mit GPU-Instancing für Pin-Symbole.

use super::texture;
use super::types::{GrowableBuffer, MarkerInstance, QuadVertex, UniformBinding};
use crate::shared::MapScene;
use eframe::{egui_wgpu, wgpu};
use image::RgbaImage;
use wgpu::util::DeviceExt;

/// Renderer für Marker-Pins (ein Pin pro Geo-Eintrag).
pub struct MarkerRenderer {
    pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    uniforms: UniformBinding,
    icon_bind_group: wgpu::BindGroup,
    instances: GrowableBuffer,
}

impl MarkerRenderer {
    /// Erstellt einen neuen Marker-Renderer.
    /// Das Pin-Icon wird einmalig als Texture hochgeladen.
    pub fn new(
        render_state: &egui_wgpu::RenderState,
        shader: &wgpu::ShaderModule,
        icon: &RgbaImage,
    ) -> Self {
        let device = &render_state.device;
        let uniforms = UniformBinding::new(device, "Marker Uniforms");

        // Pin-Icon als Texture (group(1), Bindings 2/3 laut Shader)
        let icon_tex = texture::upload_rgba(device, &render_state.queue, icon, "Marker Icon");

        let icon_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Marker Icon Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let icon_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Marker Icon"),
            layout: &icon_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&icon_tex.view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&icon_tex.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Marker Pipeline Layout"),
            bind_group_layouts: &[&uniforms.layout, &icon_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Marker Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_marker"),
                buffers: &[QuadVertex::desc(), MarkerInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_marker"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: render_state.target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 4,
                mask: !0,
                alpha_to_coverage_enabled: true,
            },
            multiview: None,
            cache: None,
        });

        let quad = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Marker Quad"),
            contents: bytemuck::cast_slice(&QuadVertex::UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            quad,
            uniforms,
            icon_bind_group,
            instances: GrowableBuffer::new("Marker Instances"),
        }
    }

    /// Rendert alle einzeln sichtbaren Marker per GPU-Instancing.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'static>,
        scene: &MapScene,
    ) {
        let instances: Vec<MarkerInstance> = scene
            .markers
            .iter()
            .map(|m| MarkerInstance::new(m.screen_pos, scene.marker_size_px))
            .collect();
        let Some(instance_buffer) = self.instances.upload(device, queue, &instances) else {
            return;
        };
        self.uniforms.write(queue, scene.viewport_size, [0.0; 4]);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        render_pass.set_bind_group(1, &self.icon_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.draw(0..6, 0..instances.len() as u32);
    }
}
