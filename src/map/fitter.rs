//! Viewport-Fitter: passt den Kartenausschnitt auf den Marker-Bestand ein.

use super::engine::MapEngine;
use crate::core::{geo, GeoBounds, LatLng, MapViewport};
use crate::shared::ViewerOptions;

/// Berechnet und setzt den kleinsten Viewport, der alle Marker enthält.
pub struct ViewportFitter;

impl ViewportFitter {
    /// Wendet die Bounds als neuen Viewport an.
    ///
    /// Leerer Bestand (`None`) lässt den Viewport unangetastet, damit
    /// transiente Leerzustände den Nutzer nicht desorientieren.
    /// Degenerierte Bounds werden still übersprungen; der Viewport
    /// bleibt dann vollständig auf dem alten Stand.
    pub fn fit<E: MapEngine>(engine: &mut E, bounds: Option<GeoBounds>, options: &ViewerOptions) {
        let Some(bounds) = bounds else {
            return;
        };
        if !bounds.is_valid() {
            log::debug!("Viewport-Fit übersprungen: keine gültigen Bounds");
            return;
        }

        let padded = bounds.pad(options.fit_padding_fraction);
        let surface = engine.surface_size();
        if surface[0] <= 0.0 || surface[1] <= 0.0 {
            return;
        }

        let Some(viewport) =
            viewport_containing(&padded, surface, options.zoom_min, options.zoom_max)
        else {
            return;
        };
        engine.set_viewport(viewport);
    }
}

/// Kleinster Viewport (Zentrum + ganzzahlig gerasterter Zoom), der die
/// Bounds vollständig in die Fläche einpasst.
fn viewport_containing(
    bounds: &GeoBounds,
    surface: [f32; 2],
    zoom_min: f64,
    zoom_max: f64,
) -> Option<MapViewport> {
    // Pixel-Spanne der Bounds auf Zoom-Stufe 0
    let nw = geo::project(LatLng::new(bounds.north, bounds.west), 0.0);
    let se = geo::project(LatLng::new(bounds.south, bounds.east), 0.0);
    let span = (se - nw).abs();

    // Maximaler Zoom, bei dem die Spanne noch in die Fläche passt:
    // span * 2^z <= surface. Punkt-Bounds (Spanne 0) laufen auf den
    // Maximal-Zoom hinaus.
    let zoom_x = if span.x > 0.0 {
        (surface[0] as f64 / span.x).log2()
    } else {
        f64::INFINITY
    };
    let zoom_y = if span.y > 0.0 {
        (surface[1] as f64 / span.y).log2()
    } else {
        f64::INFINITY
    };

    let raw = zoom_x.min(zoom_y);
    let zoom = if raw.is_finite() {
        raw.floor().clamp(zoom_min, zoom_max)
    } else {
        zoom_max
    };
    if !zoom.is_finite() {
        return None;
    }

    Some(MapViewport::new(bounds.center(), zoom))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_bounds_fit_to_max_zoom() {
        let bounds = GeoBounds::from_point(LatLng::new(10.0, 20.0));
        let vp = viewport_containing(&bounds, [800.0, 600.0], 2.0, 19.0)
            .expect("Viewport erwartet");

        assert_relative_eq!(vp.center.lat, 10.0);
        assert_relative_eq!(vp.center.lng, 20.0);
        assert_relative_eq!(vp.zoom, 19.0);
    }

    #[test]
    fn test_world_bounds_fit_to_low_zoom() {
        let bounds = GeoBounds {
            south: -60.0,
            west: -170.0,
            north: 70.0,
            east: 170.0,
        };
        let vp = viewport_containing(&bounds, [800.0, 600.0], 2.0, 19.0)
            .expect("Viewport erwartet");
        assert_relative_eq!(vp.zoom, 2.0);
    }

    #[test]
    fn test_zoom_is_integer_snapped() {
        let bounds = GeoBounds {
            south: 48.0,
            west: 11.0,
            north: 48.5,
            east: 11.8,
        };
        let vp = viewport_containing(&bounds, [1024.0, 768.0], 2.0, 19.0)
            .expect("Viewport erwartet");
        assert_relative_eq!(vp.zoom, vp.zoom.floor());
        assert!(vp.zoom > 2.0 && vp.zoom < 19.0);
    }

    #[test]
    fn test_contained_after_fit() {
        // Nach dem Fit liegen alle Ecken der Bounds innerhalb der Fläche
        let bounds = GeoBounds {
            south: 10.0,
            west: 20.0,
            north: 12.0,
            east: 23.0,
        };
        let surface = [800.0f32, 600.0f32];
        let vp = viewport_containing(&bounds, surface, 2.0, 19.0).expect("Viewport erwartet");

        let size = glam::DVec2::new(surface[0] as f64, surface[1] as f64);
        for corner in [
            LatLng::new(bounds.south, bounds.west),
            LatLng::new(bounds.north, bounds.east),
        ] {
            let px = vp.latlng_to_screen(corner, size);
            assert!(px.x >= -1e-6 && px.x <= size.x + 1e-6, "x im Viewport: {}", px.x);
            assert!(px.y >= -1e-6 && px.y <= size.y + 1e-6, "y im Viewport: {}", px.y);
        }
    }
}
