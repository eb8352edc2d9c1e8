//! Gemeinsame Test-Helfer: Recording-Engine und Eintrags-Fabrik.

use dead_tree_map::{
    EngineError, GeoBounds, GeoEntry, LatLng, LayerId, MapEngine, MapHit, MapViewport,
    MarkerLayer, SurfaceHandle, TileSourceConfig, ViewerOptions,
};

/// Engine-Attrappe: zeichnet alle Operationen auf, statt zu rendern.
pub struct MockEngine {
    /// Aktueller Viewport (öffentlich für Test-Vorbereitung)
    pub viewport: MapViewport,
    /// Gemeldete Flächengröße
    pub surface_size: [f32; 2],
    /// Aktuell angehängter Layer
    pub attached: Option<(LayerId, MarkerLayer)>,
    next_layer_id: u64,
    /// Anzahl `attach_layer`-Aufrufe
    pub attach_count: usize,
    /// Anzahl `detach_layer`-Aufrufe
    pub detach_count: usize,
    /// Anzahl `set_viewport`-Aufrufe (Zeichenbefehls-Indikator)
    pub viewport_history: Vec<MapViewport>,
    /// Zuletzt gesetzte Basis-Kachelquelle
    pub base_layer: Option<TileSourceConfig>,
    /// Nächster `detach_layer`-Aufruf antwortet mit „bereits entfernt“
    pub answer_next_detach_as_already_detached: bool,
    /// Vorgegebenes Hit-Test-Ergebnis
    pub hit_result: Option<MapHit>,
    /// Aktueller Spiderfy-Anker
    pub spiderfied: Option<String>,
    torn_down: bool,
}

impl MockEngine {
    /// Erstellt eine Engine-Attrappe mit 800x600-Fläche.
    pub fn new() -> Self {
        Self {
            viewport: MapViewport::new(LatLng::new(0.0, 0.0), 2.0),
            surface_size: [800.0, 600.0],
            attached: None,
            next_layer_id: 1,
            attach_count: 0,
            detach_count: 0,
            viewport_history: Vec::new(),
            base_layer: None,
            answer_next_detach_as_already_detached: false,
            hit_result: None,
            spiderfied: None,
            torn_down: false,
        }
    }

    /// Anzahl der aktuell angehängten Marker.
    pub fn marker_count(&self) -> usize {
        self.attached.as_ref().map_or(0, |(_, layer)| layer.len())
    }

    /// IDs der aktuell angehängten Marker (aufsteigend).
    pub fn marker_ids(&self) -> Vec<String> {
        self.attached
            .as_ref()
            .map(|(_, layer)| layer.markers().map(|m| m.id.clone()).collect())
            .unwrap_or_default()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEngine for MockEngine {
    fn set_base_layer(&mut self, source: TileSourceConfig) {
        self.base_layer = Some(source);
    }

    fn viewport(&self) -> MapViewport {
        self.viewport
    }

    fn set_viewport(&mut self, viewport: MapViewport) {
        self.viewport = viewport;
        self.viewport_history.push(viewport);
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
        self.attached = Some((id, layer));
        self.attach_count += 1;
        Ok(id)
    }

    fn detach_layer(&mut self, id: LayerId) -> Result<(), EngineError> {
        self.detach_count += 1;
        if self.answer_next_detach_as_already_detached {
            // Simulierter Teardown-Race: Engine hat den Layer schon entfernt
            self.answer_next_detach_as_already_detached = false;
            self.attached = None;
            return Err(EngineError::LayerAlreadyDetached);
        }
        match self.attached.take() {
            Some((current, _)) if current == id => Ok(()),
            Some(other) => {
                self.attached = Some(other);
                Err(EngineError::LayerAlreadyDetached)
            }
            None => Err(EngineError::LayerAlreadyDetached),
        }
    }

    fn teardown(&mut self) {
        self.attached = None;
        self.torn_down = true;
    }

    fn hit_test(&self, _screen: [f32; 2]) -> Option<MapHit> {
        self.hit_result.clone()
    }

    fn set_spiderfied(&mut self, anchor: Option<String>) {
        self.spiderfied = anchor;
    }

    fn cluster_bounds(&self, member_ids: &[String]) -> Option<GeoBounds> {
        let (_, layer) = self.attached.as_ref()?;
        GeoBounds::from_points(
            member_ids
                .iter()
                .filter_map(|id| layer.get(id))
                .map(|m| m.position),
        )
    }
}

/// Baut einen gültigen Eintrag an der gegebenen Koordinate.
pub fn entry(id: &str, lat: f64, lng: f64) -> GeoEntry {
    GeoEntry {
        id: id.into(),
        user_id: format!("user-{}", id),
        photo_url: format!("https://cdn.example.org/{}.jpg", id),
        latitude: lat,
        longitude: lng,
        created_at: "2024-06-10T08:15:00Z".into(),
        notes: None,
        username: None,
    }
}

/// Angehängtes Flächen-Handle.
pub fn attached_surface() -> SurfaceHandle {
    let surface = SurfaceHandle::new();
    surface.attach();
    surface
}

/// Standard-Optionen für Tests.
pub fn test_options() -> ViewerOptions {
    ViewerOptions::default()
}
