//! Slippy-Map-Kacheln: Koordinaten, Sichtbarkeitsberechnung, Beschaffung.

mod fetch;
mod source;

pub use fetch::TileFetcher;
pub use source::TileSourceConfig;

use crate::core::geo::TILE_SIZE;
use crate::core::MapViewport;
use glam::DVec2;

/// Adresse einer Kachel im Slippy-Map-Schema (x nach Osten, y nach Süden).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    /// Kachelebene (0 = ganze Welt)
    pub z: u8,
    /// Spalte, 0 .. 2^z - 1
    pub x: u32,
    /// Zeile, 0 .. 2^z - 1
    pub y: u32,
}

/// Eine sichtbare Kachel mit ihrer Position auf dem Bildschirm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    /// Kachel-Adresse (x bereits auf 0..2^z gewrappt)
    pub id: TileId,
    /// Linke obere Ecke in Screen-Pixeln
    pub origin: DVec2,
    /// Kantenlänge in Screen-Pixeln (skaliert bei fraktionalem Zoom)
    pub size: f64,
}

/// Kachelebene für einen fraktionalen Zoom.
pub fn tile_level(zoom: f64, max_level: u8) -> u8 {
    zoom.floor().clamp(0.0, max_level as f64) as u8
}

/// Zählt alle im Viewport sichtbaren Kacheln auf.
///
/// Die x-Achse wird horizontal gewrappt (Datumsgrenze), die y-Achse auf
/// den gültigen Bereich der Ebene geklemmt. Die Screen-Position stammt
/// aus der ungewrappten Spalte, damit die Welt bei niedrigem Zoom
/// mehrfach nebeneinander erscheinen darf.
pub fn visible_tiles(viewport: &MapViewport, surface_size: DVec2, max_level: u8) -> Vec<PlacedTile> {
    if surface_size.x <= 0.0 || surface_size.y <= 0.0 {
        return Vec::new();
    }

    let level = tile_level(viewport.zoom, max_level);
    let tiles_per_axis = 1i64 << level;
    // Kachelgröße auf dem Bildschirm bei fraktionalem Zoom
    let scale = 2f64.powf(viewport.zoom - level as f64);
    let tile_px = TILE_SIZE * scale;

    // Weltpixel der linken oberen Viewport-Ecke (auf Viewport-Zoom)
    let top_left = viewport.center_world() - surface_size * 0.5;

    let x0 = (top_left.x / tile_px).floor() as i64;
    let y0 = (top_left.y / tile_px).floor() as i64;
    let x1 = ((top_left.x + surface_size.x) / tile_px).floor() as i64;
    let y1 = ((top_left.y + surface_size.y) / tile_px).floor() as i64;

    let mut placed = Vec::with_capacity(((x1 - x0 + 1) * (y1 - y0 + 1)).max(0) as usize);
    for yi in y0..=y1 {
        if yi < 0 || yi >= tiles_per_axis {
            continue;
        }
        for xi in x0..=x1 {
            let wrapped_x = xi.rem_euclid(tiles_per_axis);
            let origin = DVec2::new(xi as f64 * tile_px, yi as f64 * tile_px) - top_left;
            placed.push(PlacedTile {
                id: TileId {
                    z: level,
                    x: wrapped_x as u32,
                    y: yi as u32,
                },
                origin,
                size: tile_px,
            });
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LatLng;
    use approx::assert_relative_eq;

    #[test]
    fn test_tile_level_clamps() {
        assert_eq!(tile_level(3.7, 19), 3);
        assert_eq!(tile_level(25.0, 19), 19);
        assert_eq!(tile_level(-1.0, 19), 0);
    }

    #[test]
    fn test_world_view_covers_level_zero() {
        let vp = MapViewport::new(LatLng::new(0.0, 0.0), 0.0);
        let tiles = visible_tiles(&vp, DVec2::new(256.0, 256.0), 19);

        assert!(tiles
            .iter()
            .any(|t| t.id == TileId { z: 0, x: 0, y: 0 }));
        for t in &tiles {
            assert_relative_eq!(t.size, 256.0);
        }
    }

    #[test]
    fn test_fractional_zoom_scales_tiles() {
        let vp = MapViewport::new(LatLng::new(0.0, 0.0), 2.5);
        let tiles = visible_tiles(&vp, DVec2::new(512.0, 512.0), 19);
        assert!(!tiles.is_empty());
        let expected = 256.0 * 2f64.powf(0.5);
        assert_relative_eq!(tiles[0].size, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_x_wraps_at_dateline() {
        // Zentrum nahe der Datumsgrenze: westliche Nachbarkachel wrappt
        let vp = MapViewport::new(LatLng::new(0.0, 179.9), 4.0);
        let tiles = visible_tiles(&vp, DVec2::new(800.0, 400.0), 19);

        let max_x = (1u32 << 4) - 1;
        assert!(tiles.iter().any(|t| t.id.x == max_x));
        assert!(tiles.iter().any(|t| t.id.x == 0), "Wrap über die Grenze");
    }

    #[test]
    fn test_empty_surface_yields_nothing() {
        let vp = MapViewport::new(LatLng::new(0.0, 0.0), 4.0);
        assert!(visible_tiles(&vp, DVec2::ZERO, 19).is_empty());
    }
}
