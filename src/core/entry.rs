//! Geo-Entry-Datensatz: eine gemeldete Totholz-Beobachtung.

use super::geo::LatLng;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Eine vom Backend gelieferte Beobachtung (Foto + Koordinate + Metadaten).
///
/// Der Datensatz wird ausschließlich vom Daten-Layer erzeugt; der Karten-Kern
/// liest ihn nur für die Dauer eines Render-Durchlaufs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoEntry {
    /// Eindeutige, unveränderliche ID
    pub id: String,
    /// ID des meldenden Users
    pub user_id: String,
    /// URL des hochgeladenen Fotos
    pub photo_url: String,
    /// Breite in WGS84-Grad
    pub latitude: f64,
    /// Länge in WGS84-Grad
    pub longitude: f64,
    /// Erstellungszeitpunkt (RFC 3339)
    pub created_at: String,
    /// Optionale Freitext-Notiz
    #[serde(default)]
    pub notes: Option<String>,
    /// Anzeigename des Users, vom Backend aufgelöst (None = anonym)
    #[serde(default)]
    pub username: Option<String>,
}

impl GeoEntry {
    /// Koordinate des Eintrags.
    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Erstellungsdatum als `YYYY-MM-DD`.
    /// Bei unparsebarem Zeitstempel wird der Rohtext durchgereicht.
    pub fn created_date(&self) -> String {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(ts) => ts.format("%Y-%m-%d").to_string(),
            Err(_) => self.created_at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(lat: f64, lng: f64) -> GeoEntry {
        GeoEntry {
            id: "e1".into(),
            user_id: "u1".into(),
            photo_url: "https://example.org/tree.jpg".into(),
            latitude: lat,
            longitude: lng,
            created_at: "2024-05-17T09:30:00+00:00".into(),
            notes: None,
            username: None,
        }
    }

    #[test]
    fn test_created_date_formats_rfc3339() {
        assert_eq!(entry(0.0, 0.0).created_date(), "2024-05-17");
    }

    #[test]
    fn test_created_date_falls_back_to_raw() {
        let mut e = entry(0.0, 0.0);
        e.created_at = "gestern".into();
        assert_eq!(e.created_date(), "gestern");
    }

    #[test]
    fn test_deserialize_backend_shape() {
        // Entspricht der JSON-Antwort des Entries-Endpunkts
        let json = r#"{
            "id": "42",
            "user_id": "abc",
            "photo_url": "https://cdn.example.org/p.jpg",
            "latitude": 48.1,
            "longitude": 11.6,
            "created_at": "2024-01-02T03:04:05Z"
        }"#;
        let e: GeoEntry = serde_json::from_str(json).expect("Backend-Shape muss dekodierbar sein");
        assert_eq!(e.id, "42");
        assert!(e.notes.is_none());
        assert!(e.username.is_none());
        assert!(e.position().is_valid());
    }
}
