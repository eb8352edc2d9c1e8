//! Kachel-Renderer: zeichnet die sichtbaren Basis-Kacheln als
//! texturierte Quads und hält einen GPU-seitigen Kachel-Cache.

use super::texture;
use super::types::{GrowableBuffer, TileVertex, UniformBinding};
use crate::shared::MapScene;
use crate::tiles::TileId;
use eframe::{egui_wgpu, wgpu};
use image::RgbaImage;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Kapazität des GPU-Kachel-Caches (Anzahl Texturen).
const GPU_TILE_CAPACITY: usize = 256;

/// Eine hochgeladene Kachel (Texture lebt über die Bind-Group weiter).
struct TileGpu {
    bind_group: wgpu::BindGroup,
}

/// Renderer für die Basis-Kachelebene.
pub struct TileRenderer {
    pipeline: wgpu::RenderPipeline,
    tile_layout: wgpu::BindGroupLayout,
    uniforms: UniformBinding,
    vertices: GrowableBuffer,
    tiles: LruCache<TileId, TileGpu>,
}

impl TileRenderer {
    /// Erstellt einen neuen Kachel-Renderer.
    pub fn new(render_state: &egui_wgpu::RenderState, shader: &wgpu::ShaderModule) -> Self {
        let device = &render_state.device;
        let uniforms = UniformBinding::new(device, "Tile Uniforms");

        // Bind-Group-Layout pro Kachel (Texture + Sampler, group(1))
        let tile_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Tile Texture Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Tile Pipeline Layout"),
            bind_group_layouts: &[&uniforms.layout, &tile_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Tile Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_tile"),
                buffers: &[TileVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_tile"),
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
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let capacity = NonZeroUsize::new(GPU_TILE_CAPACITY).expect("Kapazität > 0");
        Self {
            pipeline,
            tile_layout,
            uniforms,
            vertices: GrowableBuffer::new("Tile Vertices"),
            tiles: LruCache::new(capacity),
        }
    }

    /// Lädt eine dekodierte Kachel in den GPU-Cache hoch.
    /// Die älteste Kachel fällt bei vollem Cache automatisch heraus.
    pub fn upload_tile(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        id: TileId,
        image: &RgbaImage,
    ) {
        if self.tiles.contains(&id) {
            return;
        }

        let label = format!("Tile {}/{}/{}", id.z, id.x, id.y);
        let tex = texture::upload_rgba(device, queue, image, &label);
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&label),
            layout: &self.tile_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&tex.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&tex.sampler),
                },
            ],
        });

        self.tiles.put(id, TileGpu { bind_group });
    }

    /// Verwirft alle hochgeladenen Kacheln (Quellenwechsel).
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    /// Zeichnet alle sichtbaren Kacheln, für die eine Texture vorliegt.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        render_pass: &mut wgpu::RenderPass<'static>,
        scene: &MapScene,
    ) {
        // Nur Kacheln mit GPU-Texture einsammeln
        let mut vertices: Vec<TileVertex> = Vec::with_capacity(scene.tiles.len() * 6);
        let mut draws: Vec<TileId> = Vec::with_capacity(scene.tiles.len());
        for quad in &scene.tiles {
            if self.tiles.get(&quad.id).is_none() {
                continue;
            }
            let [x, y] = quad.origin;
            let s = quad.size;
            let corners = [
                ([x, y], [0.0, 0.0]),
                ([x + s, y], [1.0, 0.0]),
                ([x + s, y + s], [1.0, 1.0]),
                ([x, y], [0.0, 0.0]),
                ([x + s, y + s], [1.0, 1.0]),
                ([x, y + s], [0.0, 1.0]),
            ];
            for (position, uv) in corners {
                vertices.push(TileVertex { position, uv });
            }
            draws.push(quad.id);
        }

        let Some(vertex_buffer) = self.vertices.upload(device, queue, &vertices) else {
            return;
        };
        self.uniforms.write(queue, scene.viewport_size, [0.0; 4]);

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniforms.bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for (i, id) in draws.iter().enumerate() {
            if let Some(tile) = self.tiles.peek(id) {
                render_pass.set_bind_group(1, &tile.bind_group, &[]);
                let start = (i * 6) as u32;
                render_pass.draw(start..start + 6, 0..1);
            }
        }
    }
}
