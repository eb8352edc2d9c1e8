//! Geographische Grundtypen: LatLng, GeoBounds und Web-Mercator-Projektion.

use glam::DVec2;

/// Kachel-Kantenlänge in Pixeln (Slippy-Map-Standard).
pub const TILE_SIZE: f64 = 256.0;

/// Maximale projizierbare Breite (Web-Mercator-Grenze).
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Geographische Koordinate in WGS84-Grad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Breite in Grad, gültig in [-90, 90]
    pub lat: f64,
    /// Länge in Grad, gültig in [-180, 180]
    pub lng: f64,
}

impl LatLng {
    /// Erstellt eine neue Koordinate (ohne Validierung).
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Prüft ob die Koordinate endlich und im gültigen WGS84-Bereich liegt.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

/// Pixelgröße der Weltkarte beim gegebenen (fraktionalen) Zoom.
pub fn world_size(zoom: f64) -> f64 {
    TILE_SIZE * 2f64.powf(zoom)
}

/// Projiziert eine Koordinate in absolute Weltpixel beim gegebenen Zoom.
///
/// Die Breite wird auf die Mercator-Grenze geklemmt, damit die Projektion
/// auch für Pol-nahe Eingaben endlich bleibt.
pub fn project(pos: LatLng, zoom: f64) -> DVec2 {
    let size = world_size(zoom);
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = lat.to_radians().sin();

    let x = (pos.lng + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * std::f64::consts::PI)) * size;
    DVec2::new(x, y)
}

/// Rechnet absolute Weltpixel zurück in eine Koordinate.
pub fn unproject(point: DVec2, zoom: f64) -> LatLng {
    let size = world_size(zoom);
    let lng = point.x / size * 360.0 - 180.0;
    let n = std::f64::consts::PI * (1.0 - 2.0 * point.y / size);
    let lat = n.sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}

/// Achsenparalleles geographisches Rechteck (Süd/West/Nord/Ost).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoBounds {
    /// Südliche Grenze in Grad
    pub south: f64,
    /// Westliche Grenze in Grad
    pub west: f64,
    /// Nördliche Grenze in Grad
    pub north: f64,
    /// Östliche Grenze in Grad
    pub east: f64,
}

impl GeoBounds {
    /// Erstellt ein Rechteck aus einem einzelnen Punkt (Null-Ausdehnung).
    pub fn from_point(pos: LatLng) -> Self {
        Self {
            south: pos.lat,
            west: pos.lng,
            north: pos.lat,
            east: pos.lng,
        }
    }

    /// Erstellt das kleinste Rechteck über allen gültigen Punkten.
    /// Gibt `None` zurück, wenn kein Punkt übrig bleibt.
    pub fn from_points<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for p in points {
            if !p.is_valid() {
                continue;
            }
            match bounds.as_mut() {
                Some(b) => b.extend(p),
                None => bounds = Some(Self::from_point(p)),
            }
        }
        bounds
    }

    /// Erweitert das Rechteck, sodass es den Punkt enthält.
    pub fn extend(&mut self, pos: LatLng) {
        self.south = self.south.min(pos.lat);
        self.north = self.north.max(pos.lat);
        self.west = self.west.min(pos.lng);
        self.east = self.east.max(pos.lng);
    }

    /// Mittelpunkt des Rechtecks.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) * 0.5,
            (self.west + self.east) * 0.5,
        )
    }

    /// Prüft ob alle Grenzen endlich und konsistent geordnet sind.
    pub fn is_valid(&self) -> bool {
        self.south.is_finite()
            && self.west.is_finite()
            && self.north.is_finite()
            && self.east.is_finite()
            && self.south <= self.north
            && self.west <= self.east
    }

    /// Vergrößert das Rechteck symmetrisch um einen Bruchteil seiner
    /// Ausdehnung pro Seite (entspricht Leaflet `bounds.pad`).
    pub fn pad(&self, fraction: f64) -> Self {
        let lat_pad = (self.north - self.south) * fraction;
        let lng_pad = (self.east - self.west) * fraction;
        Self {
            south: self.south - lat_pad,
            west: self.west - lng_pad,
            north: self.north + lat_pad,
            east: self.east + lng_pad,
        }
    }
}
