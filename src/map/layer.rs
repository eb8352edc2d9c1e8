//! Marker-Layer: Marker-Daten, Popup-Inhalte und Cluster-Konfiguration.

use crate::core::{GeoBounds, GeoEntry, LatLng};
use crate::shared::ViewerOptions;
use indexmap::IndexMap;

/// Anzeigename für Einträge ohne aufgelösten Usernamen.
const ANONYMOUS_LABEL: &str = "Anonymous";

/// Fertig formatierter Popup-Inhalt eines Markers.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    /// URL des Beobachtungsfotos
    pub photo_url: String,
    /// Anzeigename des Melders (`@name` oder "Anonymous")
    pub submitter: String,
    /// Formatiertes Erstellungsdatum
    pub date: String,
    /// Optionale Notiz
    pub note: Option<String>,
    /// Koordinatenpaar, auf 6 Nachkommastellen formatiert
    pub coordinates: String,
}

impl PopupContent {
    /// Baut den Popup-Inhalt aus einem Eintrag.
    pub fn from_entry(entry: &GeoEntry) -> Self {
        let submitter = match entry.username.as_deref() {
            Some(name) if !name.is_empty() => format!("@{}", name),
            _ => ANONYMOUS_LABEL.to_string(),
        };

        Self {
            photo_url: entry.photo_url.clone(),
            submitter,
            date: entry.created_date(),
            note: entry.notes.clone(),
            coordinates: format!("{:.6}, {:.6}", entry.latitude, entry.longitude),
        }
    }
}

/// Ein renderbarer Marker für genau einen gültigen Eintrag.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerData {
    /// ID des zugrunde liegenden Eintrags
    pub id: String,
    /// Koordinate (validiert)
    pub position: LatLng,
    /// Popup-Inhalt
    pub popup: PopupContent,
}

impl MarkerData {
    /// Baut einen Marker aus einem Eintrag. Die Koordinaten-Validierung
    /// ist Sache des Aufrufers (Marker-Layer-Manager).
    pub fn from_entry(entry: &GeoEntry) -> Self {
        Self {
            id: entry.id.clone(),
            position: entry.position(),
            popup: PopupContent::from_entry(entry),
        }
    }
}

/// Konfiguration des Clustering-Containers.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Cluster-Radius in Screen-Pixeln
    pub radius_px: f64,
    /// Cluster auf maximaler Zoom-Stufe auffächern
    pub spiderfy_on_max_zoom: bool,
    /// Abdeckungs-Polygon beim Hovern (immer aus)
    pub show_coverage_on_hover: bool,
    /// Klick auf Cluster zoomt auf dessen Mitglieder-Bounds
    pub zoom_to_bounds_on_click: bool,
}

impl ClusterConfig {
    /// Baut die Konfiguration aus den Viewer-Optionen.
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            radius_px: options.cluster_radius_px,
            spiderfy_on_max_zoom: options.spiderfy_on_max_zoom,
            show_coverage_on_hover: options.show_coverage_on_hover,
            zoom_to_bounds_on_click: options.zoom_to_bounds_on_click,
        }
    }
}

/// Der Clustering-Container: alle Marker eines Render-Durchlaufs.
///
/// Die Marker liegen in einer nach ID sortierten `IndexMap`; damit ist
/// das Render-Ergebnis unabhängig von der Reihenfolge der Eingabeliste
/// und doppelte IDs kollabieren auf den letzten Stand.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    markers: IndexMap<String, MarkerData>,
    /// Cluster-Konfiguration des Containers
    pub cluster: ClusterConfig,
}

impl MarkerLayer {
    /// Baut den Container aus bereits validierten Markern.
    pub fn new(markers: Vec<MarkerData>, cluster: ClusterConfig) -> Self {
        let mut map: IndexMap<String, MarkerData> = markers
            .into_iter()
            .map(|m| (m.id.clone(), m))
            .collect();
        map.sort_keys();
        Self {
            markers: map,
            cluster,
        }
    }

    /// Anzahl der Marker.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Gibt `true` zurück, wenn der Container leer ist.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Marker in deterministischer Reihenfolge (ID aufsteigend).
    pub fn markers(&self) -> impl Iterator<Item = &MarkerData> {
        self.markers.values()
    }

    /// Marker per ID.
    pub fn get(&self, id: &str) -> Option<&MarkerData> {
        self.markers.get(id)
    }

    /// Kleinstes Umgebungsrechteck aller Marker.
    pub fn bounds(&self) -> Option<GeoBounds> {
        GeoBounds::from_points(self.markers.values().map(|m| m.position))
    }
}
