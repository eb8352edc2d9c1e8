//! Core-Domänentypen: Geo-Einträge, Koordinaten, Viewport, Clustering.

pub mod cluster;
pub mod entry;
/// Geographische Grundlagen
///
/// Dieses Modul definiert die Basis-Datentypen der Karte:
/// - LatLng: WGS84-Koordinate mit Validierung
/// - GeoBounds: geographisches Umgebungsrechteck
/// - Web-Mercator-Projektion für die Slippy-Map-Pixelwelt
pub mod geo;
pub mod spatial;
pub mod viewport;

pub use cluster::{cluster_points, spiderfy_offsets, Cluster};
pub use entry::GeoEntry;
pub use geo::{GeoBounds, LatLng, MAX_LATITUDE, TILE_SIZE};
pub use spatial::{PointIndex, PointMatch};
pub use viewport::MapViewport;
