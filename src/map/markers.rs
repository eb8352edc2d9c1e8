//! Marker-Layer-Manager: ersetzt bei jedem Update den kompletten
//! sichtbaren Marker-Bestand (kein inkrementelles Patchen).

use super::engine::{EngineError, LayerId, MapEngine};
use super::layer::{ClusterConfig, MarkerData, MarkerLayer};
use crate::core::{GeoBounds, GeoEntry};
use crate::shared::ViewerOptions;

/// Ergebnis eines Render-Durchlaufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Anzahl gebauter Marker
    pub rendered: usize,
    /// Anzahl wegen ungültiger Koordinaten übersprungener Einträge
    pub skipped: usize,
}

/// Verwaltet den aktuell angehängten Clustering-Container.
#[derive(Default)]
pub struct MarkerLayerManager {
    attached: Option<LayerId>,
    marker_count: usize,
    last_bounds: Option<GeoBounds>,
}

impl MarkerLayerManager {
    /// Erstellt einen Manager ohne angehängten Layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Anzahl der zuletzt gerenderten Marker.
    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    /// Umgebungsrechteck des zuletzt gerenderten Marker-Bestands.
    pub fn last_bounds(&self) -> Option<GeoBounds> {
        self.last_bounds
    }

    /// Ersetzt den kompletten Marker-Bestand durch die übergebene Liste.
    ///
    /// Einträge mit ungültigen Koordinaten werden übersprungen und
    /// protokolliert; sie brechen den Durchlauf nie ab. Ein leerer
    /// gültiger Bestand lässt die Karte sauber zurück (kein Container
    /// angehängt — das ist kein Fehler).
    pub fn render<E: MapEngine>(
        &mut self,
        engine: &mut E,
        entries: &[GeoEntry],
        options: &ViewerOptions,
    ) -> RenderStats {
        // 1. Vorherigen Container lösen; „bereits entfernt“ ist Erfolg
        if let Some(id) = self.attached.take() {
            match engine.detach_layer(id) {
                Ok(()) | Err(EngineError::LayerAlreadyDetached) => {}
                Err(e) => log::warn!("Alter Marker-Layer ließ sich nicht lösen: {}", e),
            }
        }
        self.marker_count = 0;
        self.last_bounds = None;

        // 2.–3. Validieren und Marker bauen
        let mut stats = RenderStats::default();
        let mut markers: Vec<MarkerData> = Vec::with_capacity(entries.len());
        for entry in entries {
            if !entry.position().is_valid() {
                log::warn!(
                    "Eintrag {} mit ungültigen Koordinaten ({}, {}) übersprungen",
                    entry.id,
                    entry.latitude,
                    entry.longitude
                );
                stats.skipped += 1;
                continue;
            }
            markers.push(MarkerData::from_entry(entry));
        }

        if markers.is_empty() {
            return stats;
        }

        // 4. Alle Marker in einen Clustering-Container gruppieren
        let layer = MarkerLayer::new(markers, ClusterConfig::from_options(options));
        let bounds = layer.bounds();
        let count = layer.len();

        // 5. Nur bei mindestens einem Marker anhängen
        match engine.attach_layer(layer) {
            Ok(id) => {
                self.attached = Some(id);
                self.marker_count = count;
                self.last_bounds = bounds;
                stats.rendered = count;
            }
            Err(e) => {
                // Degradiert zur leeren Karte; der Fehler bleibt lokal
                log::error!("Marker-Layer konnte nicht angehängt werden: {}", e);
            }
        }
        stats
    }

    /// Verwirft alle internen Referenzen (beim Unmount).
    pub fn reset(&mut self) {
        self.attached = None;
        self.marker_count = 0;
        self.last_bounds = None;
    }
}
