//! Abstraktion über die Karten-Render-Engine.
//!
//! Der Karten-Kern spricht die Engine ausschließlich über dieses Trait
//! an; die konkrete wgpu-Szenen-Engine und der Test-Mock sind dadurch
//! austauschbar.

use super::layer::MarkerLayer;
use crate::core::{GeoBounds, MapViewport};
use crate::tiles::TileSourceConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle eines an die Engine angehängten Layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub u64);

/// Fehler der Engine-Operationen. Werden lokal behandelt und nie an den
/// Aufrufer der Komponente weitergereicht.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Engine ist nicht bereit für Zeichenbefehle
    NotReady,
    /// Layer war bereits entfernt (Teardown-Race; als Erfolg zu werten)
    LayerAlreadyDetached,
    /// Layer konnte nicht angehängt werden
    AttachFailed(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotReady => write!(f, "Engine ist nicht bereit"),
            EngineError::LayerAlreadyDetached => write!(f, "Layer war bereits entfernt"),
            EngineError::AttachFailed(reason) => {
                write!(f, "Layer konnte nicht angehängt werden: {}", reason)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Ergebnis eines Klick-Hit-Tests auf den Marker-Bestand.
#[derive(Debug, Clone, PartialEq)]
pub enum MapHit {
    /// Ein einzelner Marker wurde getroffen
    Marker {
        /// ID des zugehörigen Eintrags
        entry_id: String,
    },
    /// Ein Cluster-Badge wurde getroffen
    Cluster {
        /// IDs der Cluster-Mitglieder (aufsteigend sortiert)
        member_ids: Vec<String>,
    },
}

/// Die vier Engine-Operationen des Karten-Kerns plus Viewport-Zugriff.
///
/// Eine Engine-Instanz gehört exklusiv einer Map-View-Komponente und
/// durchläuft genau einen Lebenszyklus: erzeugen, Layer anhängen /
/// lösen, `teardown`. Nach `teardown` werden Zeichenbefehle mit
/// [`EngineError::NotReady`] abgewiesen statt zu paniken.
pub trait MapEngine {
    /// Setzt die Basis-Kachelquelle (Hintergrund-Layer).
    fn set_base_layer(&mut self, source: TileSourceConfig);

    /// Aktueller Viewport.
    fn viewport(&self) -> MapViewport;

    /// Wendet einen neuen Viewport an.
    fn set_viewport(&mut self, viewport: MapViewport);

    /// Größe der Zeichenfläche in Pixeln.
    fn surface_size(&self) -> [f32; 2];

    /// Hängt den Marker-Layer (Clustering-Container) an.
    fn attach_layer(&mut self, layer: MarkerLayer) -> Result<LayerId, EngineError>;

    /// Löst einen zuvor angehängten Layer.
    fn detach_layer(&mut self, id: LayerId) -> Result<(), EngineError>;

    /// Gibt alle Engine-Ressourcen frei. Muss mehrfach aufrufbar sein.
    fn teardown(&mut self);

    /// Klick-Hit-Test gegen Marker und Cluster-Badges.
    fn hit_test(&self, _screen: [f32; 2]) -> Option<MapHit> {
        None
    }

    /// Fächert den Cluster mit dem gegebenen Anker auf (None = einklappen).
    fn set_spiderfied(&mut self, _anchor: Option<String>) {}

    /// Umgebungsrechteck einer Cluster-Mitgliedermenge.
    fn cluster_bounds(&self, _member_ids: &[String]) -> Option<GeoBounds> {
        None
    }

    /// Übernimmt geänderte Viewer-Optionen (Kachelquelle, Darstellung).
    fn apply_options(&mut self, _options: &crate::shared::ViewerOptions) {}
}

/// Handle auf die Zeichenfläche der Komponente.
///
/// Der Host setzt das Attached-Flag, sobald die Fläche im sichtbaren
/// Dokument hängt, und löscht es beim Abbau. Die Komponente prüft das
/// Flag defensiv vor jedem Render, weil das Abhängen der Fläche mit
/// asynchron eintreffenden Daten racen kann.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHandle {
    attached: Arc<AtomicBool>,
}

impl SurfaceHandle {
    /// Erstellt ein Handle im abgehängten Zustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Markiert die Fläche als angehängt.
    pub fn attach(&self) {
        self.attached.store(true, Ordering::Release);
    }

    /// Markiert die Fläche als abgehängt.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::Release);
    }

    /// Hängt die Fläche aktuell im Dokument?
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::Acquire)
    }
}
