//! Handler für Karten-Interaktion: Klicks, Popup, Leaderboard.

use crate::app::AppState;
use crate::map::{MapEngine, MapHit, ViewportFitter};

/// Wertet einen Karten-Klick aus.
///
/// Marker-Treffer öffnen das Popup. Cluster-Treffer zoomen auf die
/// Mitglieder-Bounds; auf maximaler Zoom-Stufe wird stattdessen
/// aufgefächert (Spiderfy). Klick ins Leere schließt Popup und
/// Auffächerung.
pub fn handle_map_click<E: MapEngine>(state: &mut AppState<E>, pos: [f32; 2]) {
    let zoom_max = state.options.zoom_max;
    let spiderfy_enabled = state.options.spiderfy_on_max_zoom;
    let zoom_to_bounds = state.options.zoom_to_bounds_on_click;
    let fit_options = state.options.clone();

    let Some(engine) = state.map_view.engine_mut() else {
        return;
    };

    match engine.hit_test(pos) {
        Some(MapHit::Marker { entry_id }) => {
            state.ui.popup_entry_id = Some(entry_id);
        }
        Some(MapHit::Cluster { member_ids }) => {
            state.ui.popup_entry_id = None;
            let at_max_zoom = engine.viewport().zoom >= zoom_max - 1e-9;

            if at_max_zoom && spiderfy_enabled {
                engine.set_spiderfied(member_ids.first().cloned());
            } else if zoom_to_bounds {
                let bounds = engine.cluster_bounds(&member_ids);
                ViewportFitter::fit(engine, bounds, &fit_options);
            }
        }
        None => {
            state.ui.popup_entry_id = None;
            engine.set_spiderfied(None);
        }
    }
}

/// Schließt das Popup.
pub fn close_popup<E: MapEngine>(state: &mut AppState<E>) {
    state.ui.popup_entry_id = None;
}

/// Blendet das Leaderboard-Panel ein oder aus.
pub fn toggle_leaderboard<E: MapEngine>(state: &mut AppState<E>) {
    state.ui.show_leaderboard = !state.ui.show_leaderboard;
}
