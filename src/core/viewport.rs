//! Karten-Viewport: Zentrum + fraktionaler Zoom, Umrechnung Screen ↔ Geo.

use super::geo::{self, LatLng};
use glam::DVec2;

/// Sichtbarer Kartenausschnitt (Analogon einer 2D-Kamera).
///
/// Der Zoom ist fraktional; ganzzahlige Stufen entsprechen den
/// Slippy-Map-Kachelebenen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    /// Geographisches Zentrum des Ausschnitts
    pub center: LatLng,
    /// Zoom-Stufe (0 = ganze Welt auf einer Kachel)
    pub zoom: f64,
}

impl MapViewport {
    /// Erstellt einen neuen Viewport.
    pub fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }

    /// Klemmt den Zoom in den erlaubten Bereich.
    pub fn clamp_zoom(&mut self, min_zoom: f64, max_zoom: f64) {
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Absolute Weltpixel-Position des Zentrums.
    pub fn center_world(&self) -> DVec2 {
        geo::project(self.center, self.zoom)
    }

    /// Rechnet eine Koordinate in Screen-Pixel relativ zur linken oberen
    /// Ecke des Viewports um.
    pub fn latlng_to_screen(&self, pos: LatLng, viewport_size: DVec2) -> DVec2 {
        geo::project(pos, self.zoom) - self.center_world() + viewport_size * 0.5
    }

    /// Rechnet Screen-Pixel zurück in eine Koordinate.
    pub fn screen_to_latlng(&self, screen: DVec2, viewport_size: DVec2) -> LatLng {
        let world = self.center_world() + screen - viewport_size * 0.5;
        geo::unproject(world, self.zoom)
    }

    /// Verschiebt das Zentrum um ein Screen-Pixel-Delta.
    pub fn pan_by_pixels(&mut self, delta: DVec2) {
        let world = self.center_world() + delta;
        self.center = geo::unproject(world, self.zoom);
    }

    /// Zoomt auf eine neue Stufe und hält dabei den Punkt unter `focus`
    /// (Screen-Pixel) geographisch fest.
    pub fn zoom_towards(&mut self, new_zoom: f64, focus: DVec2, viewport_size: DVec2) {
        let anchor = self.screen_to_latlng(focus, viewport_size);
        self.zoom = new_zoom;

        // Zentrum so verschieben, dass der Anker wieder unter dem Cursor liegt
        let anchor_world = geo::project(anchor, self.zoom);
        let center_world = anchor_world - (focus - viewport_size * 0.5);
        self.center = geo::unproject(center_world, self.zoom);
    }
}
