//! GPU-Rendering mit wgpu.

mod callback;
mod cluster_renderer;
pub mod icon;
mod marker_renderer;
mod texture;
mod tile_renderer;
mod types;

pub use crate::shared::MapScene;
pub use callback::MapPaintCallback;
pub(crate) use cluster_renderer::ClusterRenderer;
pub(crate) use marker_renderer::MarkerRenderer;
pub(crate) use tile_renderer::TileRenderer;

use crate::tiles::TileId;
use eframe::egui_wgpu;
use image::RgbaImage;

/// Pixel-Höhe, in der das Pin-Icon gerastert wird (2x für HiDPI).
const ICON_RASTER_SIZE: u32 = 72;

/// Haupt-Renderer für die Karten-Szene.
///
/// Dieser Renderer verwaltet seinen eigenen Zustand (GPU-Buffer,
/// Pipelines, Kachel-Texturen) und bietet eine schmale API:
/// `new()` + `render_scene()` + `upload_tile()`.
pub struct Renderer {
    tile_renderer: TileRenderer,
    marker_renderer: MarkerRenderer,
    cluster_renderer: ClusterRenderer,
}

impl Renderer {
    /// Erstellt einen neuen Renderer
    pub fn new(render_state: &egui_wgpu::RenderState) -> Self {
        let device = &render_state.device;

        // Shader einmalig laden — alle Sub-Renderer teilen dasselbe ShaderModule
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("DeadTree Map Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders.wgsl").into()),
        });

        // Pin-Icon einmalig rastern (statische Asset-Konfiguration)
        let pin = icon::rasterize_marker_icon(ICON_RASTER_SIZE);

        let tile_renderer = TileRenderer::new(render_state, &shader);
        let marker_renderer = MarkerRenderer::new(render_state, &shader, &pin);
        let cluster_renderer = ClusterRenderer::new(render_state, &shader);

        Self {
            tile_renderer,
            marker_renderer,
            cluster_renderer,
        }
    }

    /// Rendert die komplette Szene
    ///
    /// Reihenfolge: Kacheln zuunterst, dann Marker, Cluster zuoberst.
    pub fn render_scene(
        &mut self,
        device: &eframe::wgpu::Device,
        queue: &eframe::wgpu::Queue,
        render_pass: &mut eframe::wgpu::RenderPass<'static>,
        scene: &MapScene,
    ) {
        log::trace!(
            "render_scene: {} Kacheln, {} Marker, {} Cluster",
            scene.tiles.len(),
            scene.markers.len(),
            scene.clusters.len()
        );

        self.tile_renderer.render(device, queue, render_pass, scene);
        self.marker_renderer.render(device, queue, render_pass, scene);
        self.cluster_renderer.render(device, queue, render_pass, scene);
    }

    /// Lädt eine dekodierte Kachel in den GPU-Cache hoch.
    pub fn upload_tile(
        &mut self,
        device: &eframe::wgpu::Device,
        queue: &eframe::wgpu::Queue,
        id: TileId,
        image: &RgbaImage,
    ) {
        self.tile_renderer.upload_tile(device, queue, id, image);
    }

    /// Verwirft alle hochgeladenen Kacheln (Quellenwechsel).
    pub fn clear_tiles(&mut self) {
        self.tile_renderer.clear();
    }
}
