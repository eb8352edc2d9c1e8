//! Render-Szene: unveränderlicher Frame-Schnappschuss für Renderer und UI.

use crate::tiles::TileId;

/// Eine sichtbare Kachel mit Screen-Position.
#[derive(Debug, Clone, PartialEq)]
pub struct TileQuad {
    /// Kachel-Adresse
    pub id: TileId,
    /// Linke obere Ecke in Screen-Pixeln
    pub origin: [f32; 2],
    /// Kantenlänge in Screen-Pixeln
    pub size: f32,
}

/// Ein einzeln gezeichneter Marker (Pin).
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVis {
    /// ID des zugrunde liegenden Eintrags
    pub entry_id: String,
    /// Pin-Spitze in Screen-Pixeln
    pub screen_pos: [f32; 2],
}

/// Ein Cluster-Badge mit Mitgliederzahl.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterVis {
    /// Badge-Zentrum in Screen-Pixeln
    pub screen_pos: [f32; 2],
    /// IDs der Mitglieder (aufsteigend sortiert)
    pub member_ids: Vec<String>,
}

impl ClusterVis {
    /// Mitgliederzahl des Badges.
    pub fn count(&self) -> usize {
        self.member_ids.len()
    }
}

/// Kompletter Frame-Schnappschuss der Karte.
///
/// Wird pro Frame von der Szenen-Engine gebaut und unverändert an den
/// wgpu-Callback sowie das UI-Overlay (Cluster-Zahlen, Popup-Anker)
/// gereicht.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapScene {
    /// Viewport-Größe in Pixeln [width, height]
    pub viewport_size: [f32; 2],
    /// Sichtbare Basis-Kacheln
    pub tiles: Vec<TileQuad>,
    /// Einzeln gezeichnete Marker
    pub markers: Vec<MarkerVis>,
    /// Cluster-Badges
    pub clusters: Vec<ClusterVis>,
    /// Pin-Höhe in Pixeln
    pub marker_size_px: f32,
    /// Badge-Durchmesser in Pixeln
    pub cluster_size_px: f32,
    /// Badge-Füllfarbe (RGBA)
    pub cluster_color: [f32; 4],
    /// Badge-Ringfarbe (RGBA)
    pub cluster_outline_color: [f32; 4],
}
