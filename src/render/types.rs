//! Rendering-Typen, Projektions-Helfer und gemeinsame GPU-Bausteine
//! der Sub-Renderer.

use bytemuck::{Pod, Zeroable};
use eframe::wgpu;
use glam::Mat4;

/// Vertex für ein Einheits-Quad (-1..1).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct QuadVertex {
    /// Quad-Ecke in [-1, 1]
    pub position: [f32; 2],
}

impl QuadVertex {
    /// Beschreibt das Vertex-Layout für wgpu.
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            }],
        }
    }

    /// Die sechs Ecken zweier Dreiecke eines Einheits-Quads.
    pub const UNIT_QUAD: [QuadVertex; 6] = [
        QuadVertex {
            position: [-1.0, -1.0],
        },
        QuadVertex {
            position: [1.0, -1.0],
        },
        QuadVertex {
            position: [1.0, 1.0],
        },
        QuadVertex {
            position: [-1.0, -1.0],
        },
        QuadVertex {
            position: [1.0, 1.0],
        },
        QuadVertex {
            position: [-1.0, 1.0],
        },
    ];
}

/// Vertex für Kachel-Quads (Position in Screen-Pixeln + UV).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct TileVertex {
    /// Position in Screen-Pixeln
    pub position: [f32; 2],
    /// Textur-Koordinate
    pub uv: [f32; 2],
}

impl TileVertex {
    /// Beschreibt das Vertex-Layout für wgpu.
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TileVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}

/// Instanz-Daten für einen Marker-Pin.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct MarkerInstance {
    /// Pin-Spitze in Screen-Pixeln
    pub position: [f32; 2],
    /// Pin-Höhe in Pixeln
    pub size: f32,
    _padding: [f32; 1],
}

impl MarkerInstance {
    /// Erstellt eine neue Marker-Instanz.
    pub fn new(position: [f32; 2], size: f32) -> Self {
        Self {
            position,
            size,
            _padding: [0.0; 1],
        }
    }

    /// Beschreibt das Instanz-Layout für wgpu.
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MarkerInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Instanz-Daten für ein Cluster-Badge.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ClusterInstance {
    /// Badge-Zentrum in Screen-Pixeln
    pub position: [f32; 2],
    /// Füllfarbe (RGBA)
    pub fill: [f32; 4],
    /// Ringfarbe (RGBA)
    pub outline: [f32; 4],
    /// Durchmesser in Pixeln
    pub size: f32,
    _padding: [f32; 1],
}

impl ClusterInstance {
    /// Erstellt eine neue Cluster-Instanz.
    pub fn new(position: [f32; 2], fill: [f32; 4], outline: [f32; 4], size: f32) -> Self {
        Self {
            position,
            fill,
            outline,
            size,
            _padding: [0.0; 1],
        }
    }

    /// Beschreibt das Instanz-Layout für wgpu.
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ClusterInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 10]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}

/// Uniform-Buffer für die Pixel-Projektion.
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    /// View-Projection-Matrix (4x4)
    pub view_proj: [[f32; 4]; 4],
    /// x: Antialiasing-Breite in Pixeln
    pub params: [f32; 4],
}

/// Orthographische Projektion vom Pixel-Raum (Ursprung links oben,
/// y nach unten) nach NDC.
pub(crate) fn build_pixel_projection(viewport_size: [f32; 2]) -> Mat4 {
    Mat4::orthographic_rh(
        0.0,
        viewport_size[0].max(1.0),
        viewport_size[1].max(1.0),
        0.0,
        -1.0,
        1.0,
    )
}

/// Uniform-Buffer samt Layout und Bind-Group — `group(0)` jeder Pipeline.
pub(crate) struct UniformBinding {
    buffer: wgpu::Buffer,
    /// Layout für die Pipeline-Erzeugung
    pub layout: wgpu::BindGroupLayout,
    /// Fertige Bind-Group für den Render-Pass
    pub bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    pub fn new(device: &wgpu::Device, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<Uniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }

    /// Lädt die Pixel-Projektion (und Shader-Parameter) für diesen Frame hoch.
    pub fn write(&self, queue: &wgpu::Queue, viewport_size: [f32; 2], params: [f32; 4]) {
        let uniforms = Uniforms {
            view_proj: build_pixel_projection(viewport_size).to_cols_array_2d(),
            params,
        };
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniforms]));
    }
}

/// Vertex-/Instanz-Buffer, der bei Bedarf auf die nächste Zweierpotenz
/// wächst. Schrumpft nie; die Kapazität zählt in Elementen.
pub(crate) struct GrowableBuffer {
    label: &'static str,
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl GrowableBuffer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            buffer: None,
            capacity: 0,
        }
    }

    /// Lädt die Daten hoch und gibt den (ggf. neu allozierten) Buffer zurück.
    /// `None` bei leerer Eingabe.
    pub fn upload<T: Pod>(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
    ) -> Option<&wgpu::Buffer> {
        if data.is_empty() {
            return None;
        }

        if self.buffer.is_none() || self.capacity < data.len() {
            let capacity = data.len().max(64).next_power_of_two();
            self.buffer = Some(device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(self.label),
                size: (capacity * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = capacity;
        }

        let buffer = self.buffer.as_ref()?;
        queue.write_buffer(buffer, 0, bytemuck::cast_slice(data));
        Some(buffer)
    }
}
