//! Konfiguration der URL-basierten Raster-Kachelquelle.

use super::TileId;
use crate::shared::ViewerOptions;

/// Beschreibt die Basis-Kachelquelle ({s}/{z}/{x}/{y}-Template).
#[derive(Debug, Clone, PartialEq)]
pub struct TileSourceConfig {
    /// URL-Template mit {s}/{z}/{x}/{y}-Platzhaltern
    pub url_template: String,
    /// Subdomains für {s} (Lastverteilung); leer = Platzhalter bleibt weg
    pub subdomains: Vec<String>,
    /// Attributionstext für die Statusleiste
    pub attribution: String,
}

impl TileSourceConfig {
    /// Baut die Quelle aus den Viewer-Optionen.
    pub fn from_options(options: &ViewerOptions) -> Self {
        Self {
            url_template: options.tile_url_template.clone(),
            subdomains: options.tile_subdomains.clone(),
            attribution: options.tile_attribution.clone(),
        }
    }

    /// Liefert die konkrete URL für eine Kachel.
    ///
    /// Die Subdomain rotiert deterministisch über die Kachelkoordinate,
    /// damit benachbarte Kacheln auf verschiedene Hosts verteilt werden.
    pub fn url_for(&self, tile: TileId) -> String {
        let mut url = self
            .url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string());

        if !self.subdomains.is_empty() {
            let pick = (tile.x as usize + tile.y as usize) % self.subdomains.len();
            url = url.replace("{s}", &self.subdomains[pick]);
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> TileSourceConfig {
        TileSourceConfig {
            url_template: "https://{s}.tile.example.org/{z}/{x}/{y}.png".into(),
            subdomains: vec!["a".into(), "b".into(), "c".into()],
            attribution: "Test".into(),
        }
    }

    #[test]
    fn test_url_template_substitution() {
        let url = source().url_for(TileId { z: 3, x: 4, y: 2 });
        assert_eq!(url, "https://a.tile.example.org/3/4/2.png");
    }

    #[test]
    fn test_subdomain_rotation_is_deterministic() {
        let s = source();
        let a = s.url_for(TileId { z: 5, x: 10, y: 11 });
        let b = s.url_for(TileId { z: 5, x: 10, y: 11 });
        assert_eq!(a, b);

        // Nachbarkachel landet auf anderer Subdomain
        let c = s.url_for(TileId { z: 5, x: 11, y: 11 });
        assert_ne!(a, c);
    }

    #[test]
    fn test_template_without_subdomains() {
        let mut s = source();
        s.url_template = "https://tiles.example.org/{z}/{x}/{y}.png".into();
        s.subdomains.clear();
        assert_eq!(
            s.url_for(TileId { z: 0, x: 0, y: 0 }),
            "https://tiles.example.org/0/0/0.png"
        );
    }
}
