//! Cluster-Renderer: instanzierte Kreis-Badges mit Ring.
//! Die Mitgliederzahl zeichnet das UI-Overlay als Text darüber.

use super::types::{ClusterInstance, GrowableBuffer, QuadVertex, UniformBinding};
use crate::shared::MapScene;
use eframe::{egui_wgpu, wgpu};
use wgpu::util::DeviceExt;

/// Kantenglättungs-Breite der Badge-Ränder in Pixeln (params.x).
const BADGE_AA_PX: f32 = 1.5;

/// Renderer für Cluster-Badges.
pub struct ClusterRenderer {
    pipeline: wgpu::RenderPipeline,
    quad: wgpu::Buffer,
    uniforms: UniformBinding,
    instances: GrowableBuffer,
}

impl ClusterRenderer {
    /// Erstellt einen neuen Cluster-Renderer.
    pub fn new(render_state: &egui_wgpu::RenderState, shader: &wgpu::ShaderModule) -> Self {
        let device = &render_state.device;
        let uniforms = UniformBinding::new(device, "Cluster Uniforms");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cluster Pipeline Layout"),
            bind_group_layouts: &[&uniforms.layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cluster Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_cluster"),
                buffers: &[QuadVertex::desc(), ClusterInstance::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_cluster"),
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
            label: Some("Cluster Quad"),
            contents: bytemuck::cast_slice(&QuadVertex::UNIT_QUAD),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            pipeline,
            quad,
            uniforms,
            instances: GrowableBuffer::new("Cluster Instances"),
        }
    }

    /// Rendert alle Cluster-Badges per GPU-Instancing.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'static>,
        scene: &MapScene,
    ) {
        let instances: Vec<ClusterInstance> = scene
            .clusters
            .iter()
            .map(|c| {
                ClusterInstance::new(
                    c.screen_pos,
                    scene.cluster_color,
                    scene.cluster_outline_color,
                    scene.cluster_size_px,
                )
            })
            .collect();
        let Some(instance_buffer) = self.instances.upload(device, queue, &instances) else {
            return;
        };
        self.uniforms
            .write(queue, scene.viewport_size, [BADGE_AA_PX, 0.0, 0.0, 0.0]);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.quad.slice(..));
        render_pass.set_vertex_buffer(1, instance_buffer.slice(..));
        render_pass.draw(0..6, 0..instances.len() as u32);
    }
}
