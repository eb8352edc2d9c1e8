//! Handler für Kamera und Viewport.

use crate::app::AppState;
use crate::core::MapViewport;
use crate::map::MapEngine;
use glam::DVec2;

/// Verschiebt die Kamera um ein Screen-Pixel-Delta.
pub fn pan<E: MapEngine>(state: &mut AppState<E>, delta: [f32; 2]) {
    let Some(engine) = state.map_view.engine_mut() else {
        return;
    };
    let mut viewport = engine.viewport();
    viewport.pan_by_pixels(DVec2::new(delta[0] as f64, delta[1] as f64));
    engine.set_viewport(viewport);
}

/// Zoomt um die angegebenen Stufen, optional auf einen Fokuspunkt.
pub fn zoom<E: MapEngine>(state: &mut AppState<E>, steps: f64, focus_px: Option<[f32; 2]>) {
    let zoom_min = state.options.zoom_min;
    let zoom_max = state.options.zoom_max;
    let Some(engine) = state.map_view.engine_mut() else {
        return;
    };

    let mut viewport = engine.viewport();
    let new_zoom = (viewport.zoom + steps).clamp(zoom_min, zoom_max);

    match focus_px {
        Some(px) => {
            let size = engine.surface_size();
            viewport.zoom_towards(
                new_zoom,
                DVec2::new(px[0] as f64, px[1] as f64),
                DVec2::new(size[0] as f64, size[1] as f64),
            );
        }
        None => viewport.zoom = new_zoom,
    }
    engine.set_viewport(viewport);
}

/// Setzt die Kamera auf die Start-Ansicht zurück.
pub fn reset_camera<E: MapEngine>(state: &mut AppState<E>) {
    let initial = MapViewport::new(state.options.initial_center(), state.options.initial_zoom);
    let Some(engine) = state.map_view.engine_mut() else {
        return;
    };
    engine.set_viewport(initial);
}
