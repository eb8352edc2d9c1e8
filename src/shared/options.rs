//! Zentrale Konfiguration für den DeadTree Map Viewer.
//!
//! `ViewerOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kachel-Quelle ───────────────────────────────────────────────────

/// URL-Template der Basis-Kachelquelle ({s}/{z}/{x}/{y} werden ersetzt).
pub const TILE_URL_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
/// Subdomains für die Kachel-Lastverteilung.
pub const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];
/// Attributionstext der Kachelquelle (Statusleiste).
pub const TILE_ATTRIBUTION: &str = "© OpenStreetMap contributors";

// ── Viewport ────────────────────────────────────────────────────────

/// Minimale Zoom-Stufe.
pub const ZOOM_MIN: f64 = 2.0;
/// Maximale Zoom-Stufe (Kachelquelle liefert bis 19).
pub const ZOOM_MAX: f64 = 19.0;
/// Neutrale Start-Ansicht: Zentrum in Grad.
pub const INITIAL_CENTER: [f64; 2] = [51.505, -0.09];
/// Neutrale Start-Ansicht: Zoom-Stufe (ganze Welt sichtbar).
pub const INITIAL_ZOOM: f64 = 2.0;
/// Zoom-Schritt bei Menü-Buttons / Shortcuts.
pub const ZOOM_STEP: f64 = 1.0;
/// Zoom-Schritt pro Mausrad-Raste.
pub const SCROLL_ZOOM_STEP: f64 = 0.25;

// ── Clustering ──────────────────────────────────────────────────────

/// Cluster-Radius in Screen-Pixeln.
pub const CLUSTER_RADIUS_PX: f64 = 50.0;
/// Polsterung beim Einpassen der Marker-Bounds (Bruchteil pro Seite).
pub const FIT_PADDING_FRACTION: f64 = 0.1;

// ── Marker-Rendering ───────────────────────────────────────────────

/// Pin-Höhe in Screen-Pixeln.
pub const MARKER_SIZE_PX: f32 = 36.0;
/// Pick-Radius für Klicks auf Marker/Cluster in Screen-Pixeln.
pub const MARKER_PICK_RADIUS_PX: f32 = 18.0;
/// Durchmesser der Cluster-Badges in Screen-Pixeln.
pub const CLUSTER_SIZE_PX: f32 = 40.0;
/// Füllfarbe der Cluster-Badges (RGBA: Tannengrün).
pub const CLUSTER_COLOR: [f32; 4] = [0.13, 0.45, 0.22, 0.9];
/// Ringfarbe der Cluster-Badges (RGBA: helles Grün).
pub const CLUSTER_OUTLINE_COLOR: [f32; 4] = [0.55, 0.8, 0.45, 0.6];

// ── Backend ─────────────────────────────────────────────────────────

/// Endpunkt der Entries-Collection (JSON-Array von Geo-Einträgen).
pub const ENTRIES_ENDPOINT: &str = "https://deadtreemap.app/api/entries";
/// Endpunkt der Top-Contributor-Liste.
pub const CONTRIBUTORS_ENDPOINT: &str = "https://deadtreemap.app/api/contributors";
/// Anzahl angezeigter Top-Contributor.
pub const LEADERBOARD_LIMIT: usize = 5;

// ── Tile-Cache ──────────────────────────────────────────────────────

/// Kapazität des dekodierten Kachel-Caches (Anzahl Kacheln).
pub const TILE_CACHE_CAPACITY: usize = 384;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Viewer-Optionen.
/// Wird als `dead_tree_map.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerOptions {
    // ── Kacheln ─────────────────────────────────────────────────
    /// URL-Template der Kachelquelle
    pub tile_url_template: String,
    /// Subdomains für die Lastverteilung
    pub tile_subdomains: Vec<String>,
    /// Attributionstext in der Statusleiste
    pub tile_attribution: String,

    // ── Viewport ────────────────────────────────────────────────
    /// Minimale Zoom-Stufe
    pub zoom_min: f64,
    /// Maximale Zoom-Stufe
    pub zoom_max: f64,
    /// Start-Zentrum [lat, lng]
    pub initial_center: [f64; 2],
    /// Start-Zoom
    pub initial_zoom: f64,
    /// Zoom-Schritt bei Menü-Buttons / Shortcuts
    pub zoom_step: f64,
    /// Zoom-Schritt pro Mausrad-Raste
    pub scroll_zoom_step: f64,

    // ── Clustering ──────────────────────────────────────────────
    /// Cluster-Radius in Screen-Pixeln
    pub cluster_radius_px: f64,
    /// Cluster auf maximaler Zoom-Stufe auffächern statt weiter zu zoomen
    pub spiderfy_on_max_zoom: bool,
    /// Abdeckungs-Polygon beim Hovern anzeigen (nicht unterstützt, immer aus)
    pub show_coverage_on_hover: bool,
    /// Klick auf einen Cluster zoomt auf dessen Mitglieder-Bounds
    pub zoom_to_bounds_on_click: bool,
    /// Polsterung beim Einpassen der Marker-Bounds (Bruchteil pro Seite)
    pub fit_padding_fraction: f64,

    // ── Marker ──────────────────────────────────────────────────
    /// Pin-Höhe in Screen-Pixeln
    pub marker_size_px: f32,
    /// Pick-Radius für Klicks in Screen-Pixeln
    pub marker_pick_radius_px: f32,
    /// Durchmesser der Cluster-Badges in Screen-Pixeln
    pub cluster_size_px: f32,
    /// Füllfarbe der Cluster-Badges
    pub cluster_color: [f32; 4],
    /// Ringfarbe der Cluster-Badges
    pub cluster_outline_color: [f32; 4],

    // ── Backend ─────────────────────────────────────────────────
    /// Endpunkt der Entries-Collection
    pub entries_endpoint: String,
    /// Endpunkt der Top-Contributor-Liste
    #[serde(default = "default_contributors_endpoint")]
    pub contributors_endpoint: String,
    /// Anzahl angezeigter Top-Contributor
    #[serde(default = "default_leaderboard_limit")]
    pub leaderboard_limit: usize,

    // ── Cache ───────────────────────────────────────────────────
    /// Kapazität des Kachel-Caches (Anzahl Kacheln)
    #[serde(default = "default_tile_cache_capacity")]
    pub tile_cache_capacity: usize,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            tile_url_template: TILE_URL_TEMPLATE.to_string(),
            tile_subdomains: TILE_SUBDOMAINS.iter().map(|s| s.to_string()).collect(),
            tile_attribution: TILE_ATTRIBUTION.to_string(),

            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            initial_center: INITIAL_CENTER,
            initial_zoom: INITIAL_ZOOM,
            zoom_step: ZOOM_STEP,
            scroll_zoom_step: SCROLL_ZOOM_STEP,

            cluster_radius_px: CLUSTER_RADIUS_PX,
            spiderfy_on_max_zoom: true,
            show_coverage_on_hover: false,
            zoom_to_bounds_on_click: true,
            fit_padding_fraction: FIT_PADDING_FRACTION,

            marker_size_px: MARKER_SIZE_PX,
            marker_pick_radius_px: MARKER_PICK_RADIUS_PX,
            cluster_size_px: CLUSTER_SIZE_PX,
            cluster_color: CLUSTER_COLOR,
            cluster_outline_color: CLUSTER_OUTLINE_COLOR,

            entries_endpoint: ENTRIES_ENDPOINT.to_string(),
            contributors_endpoint: CONTRIBUTORS_ENDPOINT.to_string(),
            leaderboard_limit: LEADERBOARD_LIMIT,

            tile_cache_capacity: TILE_CACHE_CAPACITY,
        }
    }
}

/// Serde-Default für `contributors_endpoint` (Abwärtskompatibilität).
fn default_contributors_endpoint() -> String {
    CONTRIBUTORS_ENDPOINT.to_string()
}

/// Serde-Default für `leaderboard_limit` (Abwärtskompatibilität).
fn default_leaderboard_limit() -> usize {
    LEADERBOARD_LIMIT
}

/// Serde-Default für `tile_cache_capacity` (Abwärtskompatibilität).
fn default_tile_cache_capacity() -> usize {
    TILE_CACHE_CAPACITY
}

impl ViewerOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("dead_tree_map"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("dead_tree_map.toml")
    }

    /// Start-Zentrum als Koordinate.
    pub fn initial_center(&self) -> crate::core::LatLng {
        crate::core::LatLng::new(self.initial_center[0], self.initial_center[1])
    }
}
