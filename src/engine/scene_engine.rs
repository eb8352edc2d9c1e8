//! Die Szenen-Engine: einzige stateful Render-Ressource der Komponente.
//!
//! Implementiert das `MapEngine`-Trait über dem wgpu-Renderer und dem
//! Kachel-Fetcher. Pro Frame baut sie aus Viewport, Kachel-Cache und
//! angehängtem Marker-Layer einen `MapScene`-Schnappschuss.

use crate::core::{cluster, GeoBounds, MapViewport, PointIndex};
use crate::map::{EngineError, LayerId, MapEngine, MapHit, MarkerData, MarkerLayer};
use crate::render::Renderer;
use crate::shared::{ClusterVis, MapScene, MarkerVis, TileQuad, ViewerOptions};
use crate::tiles::{self, TileFetcher, TileSourceConfig};
use eframe::egui_wgpu;
use glam::DVec2;
use std::sync::{Arc, Mutex};

/// Engine über Viewport, Kachel-Layer und Marker-Layer.
pub struct SceneEngine {
    device: eframe::wgpu::Device,
    queue: eframe::wgpu::Queue,
    renderer: Arc<Mutex<Renderer>>,
    fetcher: TileFetcher,
    options: ViewerOptions,
    viewport: MapViewport,
    surface_size: [f32; 2],
    layer: Option<(LayerId, MarkerLayer)>,
    next_layer_id: u64,
    /// Kleinste Mitglieds-ID des aktuell aufgefächerten Clusters
    spiderfied: Option<String>,
    torn_down: bool,
}

impl SceneEngine {
    /// Erstellt die Engine samt wgpu-Renderer (Pipelines, Icon-Texture).
    pub fn new(render_state: &egui_wgpu::RenderState, options: ViewerOptions) -> Self {
        let renderer = Arc::new(Mutex::new(Renderer::new(render_state)));
        let fetcher = TileFetcher::new(
            TileSourceConfig::from_options(&options),
            options.tile_cache_capacity,
        );

        Self {
            device: render_state.device.clone(),
            queue: render_state.queue.clone(),
            renderer,
            fetcher,
            viewport: MapViewport::new(options.initial_center(), options.initial_zoom),
            options,
            surface_size: [0.0, 0.0],
            layer: None,
            next_layer_id: 1,
            spiderfied: None,
            torn_down: false,
        }
    }

    /// Geteilter Renderer für den egui-Paint-Callback.
    pub fn renderer(&self) -> Arc<Mutex<Renderer>> {
        Arc::clone(&self.renderer)
    }

    /// Popup-Daten eines Markers.
    pub fn marker_popup(&self, entry_id: &str) -> Option<&MarkerData> {
        self.layer.as_ref().and_then(|(_, layer)| layer.get(entry_id))
    }

    /// Aktuelle Screen-Position eines Markers (Pin-Spitze).
    /// Berücksichtigt eine laufende Auffächerung.
    pub fn marker_screen_pos(&self, entry_id: &str) -> Option<[f32; 2]> {
        let (markers, _) = self.build_marker_scene();
        markers
            .into_iter()
            .find(|m| m.entry_id == entry_id)
            .map(|m| m.screen_pos)
    }

    /// Baut den Frame-Schnappschuss und stößt Kachel-Beschaffung an.
    pub fn handle_frame(&mut self, surface_size: [f32; 2]) -> MapScene {
        if self.torn_down {
            return MapScene::default();
        }
        self.surface_size = surface_size;

        // Eingetroffene Kacheln auf die GPU heben
        let arrived = self.fetcher.poll();
        if !arrived.is_empty() {
            if let Ok(mut renderer) = self.renderer.lock() {
                for id in arrived {
                    if let Some(image) = self.fetcher.get(id) {
                        renderer.upload_tile(&self.device, &self.queue, id, image);
                    }
                }
            }
        }

        // Sichtbare Kacheln bestimmen und fehlende anfordern
        let size = DVec2::new(surface_size[0] as f64, surface_size[1] as f64);
        let max_level = self.options.zoom_max.floor().clamp(0.0, 22.0) as u8;
        let placed = tiles::visible_tiles(&self.viewport, size, max_level);

        let mut tile_quads = Vec::with_capacity(placed.len());
        for tile in &placed {
            self.fetcher.request(tile.id);
            tile_quads.push(TileQuad {
                id: tile.id,
                origin: [tile.origin.x as f32, tile.origin.y as f32],
                size: tile.size as f32,
            });
        }

        let (markers, clusters) = self.build_marker_scene();

        MapScene {
            viewport_size: surface_size,
            tiles: tile_quads,
            markers,
            clusters,
            marker_size_px: self.options.marker_size_px,
            cluster_size_px: self.options.cluster_size_px,
            cluster_color: self.options.cluster_color,
            cluster_outline_color: self.options.cluster_outline_color,
        }
    }

    /// Laufen noch Kachel-Anfragen? (Repaint-Steuerung des Hosts)
    pub fn has_pending_tiles(&self) -> bool {
        self.fetcher.pending_count() > 0
    }

    /// Hit-Test für Klicks: Cluster liegen über Markern.
    fn hit_test_scene(&self, screen: [f32; 2]) -> Option<MapHit> {
        let query = DVec2::new(screen[0] as f64, screen[1] as f64);
        let pick_radius = self.options.marker_pick_radius_px as f64;
        let (markers, clusters) = self.build_marker_scene();

        if !clusters.is_empty() {
            let positions: Vec<DVec2> = clusters
                .iter()
                .map(|c| DVec2::new(c.screen_pos[0] as f64, c.screen_pos[1] as f64))
                .collect();
            let index = PointIndex::from_points(&positions);
            if let Some(hit) = index.nearest(query) {
                let badge_radius = self.options.cluster_size_px as f64 * 0.5;
                if hit.distance <= badge_radius.max(pick_radius) {
                    return Some(MapHit::Cluster {
                        member_ids: clusters[hit.index].member_ids.clone(),
                    });
                }
            }
        }

        if !markers.is_empty() {
            // Pins hängen über der Spitze; Pick-Zentrum liegt eine halbe
            // Pin-Höhe darüber
            let lift = self.options.marker_size_px as f64 * 0.5;
            let positions: Vec<DVec2> = markers
                .iter()
                .map(|m| DVec2::new(m.screen_pos[0] as f64, m.screen_pos[1] as f64 - lift))
                .collect();
            let index = PointIndex::from_points(&positions);
            if let Some(hit) = index.nearest(query) {
                if hit.distance <= pick_radius {
                    return Some(MapHit::Marker {
                        entry_id: markers[hit.index].entry_id.clone(),
                    });
                }
            }
        }

        None
    }

    /// Marker- und Cluster-Sichtbarkeit für den aktuellen Viewport.
    fn build_marker_scene(&self) -> (Vec<MarkerVis>, Vec<ClusterVis>) {
        let Some((_, layer)) = self.layer.as_ref() else {
            return (Vec::new(), Vec::new());
        };

        let size = DVec2::new(self.surface_size[0] as f64, self.surface_size[1] as f64);
        let ids: Vec<&str> = layer.markers().map(|m| m.id.as_str()).collect();
        let positions: Vec<DVec2> = layer
            .markers()
            .map(|m| self.viewport.latlng_to_screen(m.position, size))
            .collect();

        let clusters = cluster::cluster_points(&positions, layer.cluster.radius_px);

        let mut marker_vis = Vec::new();
        let mut cluster_vis = Vec::new();
        for c in clusters {
            if c.is_single() {
                let i = c.members[0];
                marker_vis.push(MarkerVis {
                    entry_id: ids[i].to_string(),
                    screen_pos: [positions[i].x as f32, positions[i].y as f32],
                });
                continue;
            }

            let anchor = ids[c.members[0]];
            if self.spiderfied.as_deref() == Some(anchor) {
                // Aufgefächerte Mitglieder einzeln um das Zentrum legen
                let offsets = cluster::spiderfy_offsets(c.len());
                for (&i, offset) in c.members.iter().zip(offsets) {
                    let pos = c.center + offset;
                    marker_vis.push(MarkerVis {
                        entry_id: ids[i].to_string(),
                        screen_pos: [pos.x as f32, pos.y as f32],
                    });
                }
            } else {
                cluster_vis.push(ClusterVis {
                    screen_pos: [c.center.x as f32, c.center.y as f32],
                    member_ids: c.members.iter().map(|&i| ids[i].to_string()).collect(),
                });
            }
        }

        (marker_vis, cluster_vis)
    }
}

impl MapEngine for SceneEngine {
    fn hit_test(&self, screen: [f32; 2]) -> Option<MapHit> {
        self.hit_test_scene(screen)
    }

    fn set_spiderfied(&mut self, anchor: Option<String>) {
        self.spiderfied = anchor;
    }

    fn cluster_bounds(&self, member_ids: &[String]) -> Option<GeoBounds> {
        let (_, layer) = self.layer.as_ref()?;
        GeoBounds::from_points(
            member_ids
                .iter()
                .filter_map(|id| layer.get(id))
                .map(|m| m.position),
        )
    }

    fn apply_options(&mut self, options: &ViewerOptions) {
        self.fetcher.set_source(TileSourceConfig::from_options(options));
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.clear_tiles();
        }
        self.options = options.clone();
    }

    fn set_base_layer(&mut self, source: TileSourceConfig) {
        if self.torn_down {
            return;
        }
        self.fetcher.set_source(source);
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.clear_tiles();
        }
    }

    fn viewport(&self) -> MapViewport {
        self.viewport
    }

    fn set_viewport(&mut self, mut viewport: MapViewport) {
        if self.torn_down {
            return;
        }
        viewport.clamp_zoom(self.options.zoom_min, self.options.zoom_max);
        // Zoom-Wechsel ändert die Cluster-Zusammensetzung: einklappen
        if (viewport.zoom - self.viewport.zoom).abs() > f64::EPSILON {
            self.spiderfied = None;
        }
        self.viewport = viewport;
    }

    fn surface_size(&self) -> [f32; 2] {
        self.surface_size
    }

    fn attach_layer(&mut self, layer: MarkerLayer) -> Result<LayerId, EngineError> {
        if self.torn_down {
            return Err(EngineError::NotReady);
        }
        let id = LayerId(self.next_layer_id);
        self.next_layer_id += 1;
        self.layer = Some((id, layer));
        self.spiderfied = None;
        Ok(id)
    }

    fn detach_layer(&mut self, id: LayerId) -> Result<(), EngineError> {
        match self.layer.take() {
            Some((current, _)) if current == id => {
                self.spiderfied = None;
                Ok(())
            }
            Some(other) => {
                // Fremde ID: aktuellen Layer behalten
                self.layer = Some(other);
                Err(EngineError::LayerAlreadyDetached)
            }
            None => Err(EngineError::LayerAlreadyDetached),
        }
    }

    fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.layer = None;
        self.spiderfied = None;
        if let Ok(mut renderer) = self.renderer.lock() {
            renderer.clear_tiles();
        }
        self.torn_down = true;
        log::info!("Szenen-Engine abgebaut");
    }
}
