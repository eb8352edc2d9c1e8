//! Marker-Pin-Icon: eingebettetes SVG, beim Engine-Start gerastert.
//!
//! Das Icon ist statische Asset-Konfiguration — es wird einmalig zur
//! Initialisierung in eine Texture überführt, nicht zur Laufzeit
//! umgebogen.

use image::RgbaImage;
use resvg::usvg;

/// Eingebettetes Pin-SVG (quadratische Zeichenfläche, Spitze unten).
const MARKER_PIN_SVG: &str = include_str!("../../assets/marker_pin.svg");

/// Rastert das Pin-SVG in ein quadratisches RGBA8-Bild.
/// Schlägt das Rastern fehl, kommt ein prozedurales Ersatz-Icon zurück.
pub fn rasterize_marker_icon(size_px: u32) -> RgbaImage {
    let size_px = size_px.max(8);
    match rasterize_svg(size_px) {
        Some(icon) => icon,
        None => {
            log::warn!("Pin-SVG nicht rasterbar, verwende Ersatz-Icon");
            fallback_icon(size_px)
        }
    }
}

fn rasterize_svg(size_px: u32) -> Option<RgbaImage> {
    let tree = usvg::Tree::from_data(MARKER_PIN_SVG.as_bytes(), &usvg::Options::default()).ok()?;

    let svg_size = tree.size();
    let scale = size_px as f32 / svg_size.width().max(svg_size.height());
    let transform = resvg::tiny_skia::Transform::from_scale(scale, scale);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size_px, size_px)?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    RgbaImage::from_raw(size_px, size_px, pixmap.data().to_vec())
}

/// Einfacher gefüllter Kreis als Fallback, falls das SVG kaputt ist.
fn fallback_icon(size_px: u32) -> RgbaImage {
    let mut icon = RgbaImage::new(size_px, size_px);
    let center = size_px as f32 / 2.0;
    let radius = center - 1.0;

    for (x, y, pixel) in icon.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if (dx * dx + dy * dy).sqrt() <= radius {
            *pixel = image::Rgba([42, 127, 63, 255]);
        }
    }
    icon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_has_requested_size() {
        let icon = rasterize_marker_icon(64);
        assert_eq!(icon.dimensions(), (64, 64));
    }

    #[test]
    fn test_icon_is_not_fully_transparent() {
        let icon = rasterize_marker_icon(32);
        assert!(
            icon.pixels().any(|p| p.0[3] > 0),
            "Icon muss sichtbare Pixel enthalten"
        );
    }

    #[test]
    fn test_fallback_icon_is_opaque_in_center() {
        let icon = fallback_icon(16);
        assert_eq!(icon.get_pixel(8, 8).0[3], 255);
    }
}
