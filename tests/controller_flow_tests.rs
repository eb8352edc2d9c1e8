//! Integrationstests für die Controller-Flows:
//! - Entries-Lebenszyklus (Laden, Fehler, Popup-Bereinigung)
//! - Karten-Interaktion (Klick, Cluster-Zoom, Spiderfy)
//! - Kamera-Commands

mod common;

use approx::assert_relative_eq;
use common::{attached_surface, entry, test_options, MockEngine};
use dead_tree_map::{AppController, AppIntent, AppState, LifecyclePhase, MapHit};

/// AppState mit gemounteter, bereiter Komponente über der Attrappe.
fn live_state() -> AppState<MockEngine> {
    let mut state: AppState<MockEngine> = AppState::new(test_options());
    state.surface = attached_surface();
    let surface = state.surface.clone();
    state.map_view.mount(&surface, MockEngine::new);
    state.map_view.notify_ready();
    assert_eq!(state.map_view.phase(), LifecyclePhase::Live);
    state
}

// ─── Entries-Lebenszyklus ────────────────────────────────────────────────────

#[test]
fn test_entries_loaded_rendert_marker() {
    let mut controller = AppController::new();
    let mut state = live_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoaded {
                entries: vec![entry("a", 10.0, 20.0), entry("b", 12.0, 22.0)],
            },
        )
        .expect("EntriesLoaded darf nicht fehlschlagen");

    assert_eq!(state.entries.len(), 2);
    assert_eq!(state.map_view.marker_count(), 2);
    assert!(!state.ui.loading_entries);
    assert!(state.ui.error_banner.is_none());
}

#[test]
fn test_entries_load_failed_setzt_banner() {
    let mut controller = AppController::new();
    let mut state = live_state();
    state.ui.loading_entries = true;

    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoadFailed {
                message: "Backend nicht erreichbar".into(),
            },
        )
        .expect("Fehler-Intent darf nicht fehlschlagen");

    assert!(!state.ui.loading_entries);
    assert_eq!(
        state.ui.error_banner.as_deref(),
        Some("Backend nicht erreichbar")
    );
}

#[test]
fn test_popup_schliesst_wenn_eintrag_verschwindet() {
    let mut controller = AppController::new();
    let mut state = live_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoaded {
                entries: vec![entry("a", 10.0, 20.0)],
            },
        )
        .expect("EntriesLoaded");
    state.ui.popup_entry_id = Some("a".into());

    // Neuer Bestand ohne "a": Popup darf nicht auf einen Geist zeigen
    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoaded {
                entries: vec![entry("b", 1.0, 1.0)],
            },
        )
        .expect("EntriesLoaded");

    assert!(state.ui.popup_entry_id.is_none());
}

// ─── Interaktion ─────────────────────────────────────────────────────────────

#[test]
fn test_marker_klick_oeffnet_popup() {
    let mut controller = AppController::new();
    let mut state = live_state();
    state.map_view.engine_mut().expect("Engine").hit_result = Some(MapHit::Marker {
        entry_id: "a".into(),
    });

    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: [100.0, 100.0] })
        .expect("MapClicked");

    assert_eq!(state.ui.popup_entry_id.as_deref(), Some("a"));
}

#[test]
fn test_klick_ins_leere_schliesst_popup_und_spiderfy() {
    let mut controller = AppController::new();
    let mut state = live_state();
    state.ui.popup_entry_id = Some("a".into());
    {
        let engine = state.map_view.engine_mut().expect("Engine");
        engine.hit_result = None;
        engine.spiderfied = Some("a".into());
    }

    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: [5.0, 5.0] })
        .expect("MapClicked");

    assert!(state.ui.popup_entry_id.is_none());
    assert!(state.map_view.engine().expect("Engine").spiderfied.is_none());
}

#[test]
fn test_cluster_klick_zoomt_auf_mitglieder_bounds() {
    let mut controller = AppController::new();
    let mut state = live_state();

    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoaded {
                entries: vec![entry("a", 10.0, 20.0), entry("b", 12.0, 22.0)],
            },
        )
        .expect("EntriesLoaded");

    {
        let engine = state.map_view.engine_mut().expect("Engine");
        engine.hit_result = Some(MapHit::Cluster {
            member_ids: vec!["a".into(), "b".into()],
        });
        // Unterhalb der Maximal-Zoom-Stufe
        engine.viewport.zoom = 5.0;
    }

    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: [50.0, 50.0] })
        .expect("MapClicked");

    let engine = state.map_view.engine().expect("Engine");
    assert!(engine.spiderfied.is_none(), "Unter Max-Zoom wird nicht aufgefächert");
    // Viewport wurde auf die Mitglieder-Bounds gefittet
    assert_relative_eq!(engine.viewport.center.lat, 11.0, epsilon = 1e-9);
    assert_relative_eq!(engine.viewport.center.lng, 21.0, epsilon = 1e-9);
    assert!(engine.viewport.zoom > 2.0);
}

#[test]
fn test_cluster_klick_auf_max_zoom_faechert_auf() {
    let mut controller = AppController::new();
    let mut state = live_state();
    let zoom_max = state.options.zoom_max;

    controller
        .handle_intent(
            &mut state,
            AppIntent::EntriesLoaded {
                entries: vec![entry("a", 10.0, 20.0), entry("b", 10.0001, 20.0001)],
            },
        )
        .expect("EntriesLoaded");

    {
        let engine = state.map_view.engine_mut().expect("Engine");
        engine.hit_result = Some(MapHit::Cluster {
            member_ids: vec!["a".into(), "b".into()],
        });
        engine.viewport.zoom = zoom_max;
    }
    let viewport_calls_before = state
        .map_view
        .engine()
        .expect("Engine")
        .viewport_history
        .len();

    controller
        .handle_intent(&mut state, AppIntent::MapClicked { pos: [50.0, 50.0] })
        .expect("MapClicked");

    let engine = state.map_view.engine().expect("Engine");
    assert_eq!(engine.spiderfied.as_deref(), Some("a"), "Anker = kleinste Mitglieds-ID");
    assert_eq!(
        engine.viewport_history.len(),
        viewport_calls_before,
        "Auffächern zoomt nicht weiter"
    );
}

// ─── Kamera ──────────────────────────────────────────────────────────────────

#[test]
fn test_zoom_in_und_out_respektieren_grenzen() {
    let mut controller = AppController::new();
    let mut state = live_state();
    let zoom_max = state.options.zoom_max;
    let zoom_min = state.options.zoom_min;

    state.map_view.engine_mut().expect("Engine").viewport.zoom = zoom_max - 0.5;
    controller
        .handle_intent(&mut state, AppIntent::ZoomInRequested)
        .expect("ZoomIn");
    assert_relative_eq!(
        state.map_view.engine().expect("Engine").viewport.zoom,
        zoom_max
    );

    state.map_view.engine_mut().expect("Engine").viewport.zoom = zoom_min + 0.5;
    controller
        .handle_intent(&mut state, AppIntent::ZoomOutRequested)
        .expect("ZoomOut");
    assert_relative_eq!(
        state.map_view.engine().expect("Engine").viewport.zoom,
        zoom_min
    );
}

#[test]
fn test_pan_verschiebt_zentrum() {
    let mut controller = AppController::new();
    let mut state = live_state();
    let before = state.map_view.engine().expect("Engine").viewport.center;

    controller
        .handle_intent(
            &mut state,
            AppIntent::CameraPan {
                delta: [120.0, 0.0],
            },
        )
        .expect("CameraPan");

    let after = state.map_view.engine().expect("Engine").viewport.center;
    assert!(after.lng > before.lng, "Pan nach rechts führt nach Osten");
}

#[test]
fn test_reset_view_kehrt_zur_startansicht_zurueck() {
    let mut controller = AppController::new();
    let mut state = live_state();
    let options = test_options();

    {
        let engine = state.map_view.engine_mut().expect("Engine");
        engine.viewport.zoom = 15.0;
        engine.viewport.center = dead_tree_map::LatLng::new(-30.0, 140.0);
    }

    controller
        .handle_intent(&mut state, AppIntent::ResetViewRequested)
        .expect("ResetView");

    let viewport = state.map_view.engine().expect("Engine").viewport;
    assert_relative_eq!(viewport.center.lat, options.initial_center[0]);
    assert_relative_eq!(viewport.center.lng, options.initial_center[1]);
    assert_relative_eq!(viewport.zoom, options.initial_zoom);
}

// ─── Anwendungssteuerung ─────────────────────────────────────────────────────

#[test]
fn test_exit_requested_setzt_exit_flag() {
    let mut controller = AppController::new();
    let mut state = live_state();

    controller
        .handle_intent(&mut state, AppIntent::ExitRequested)
        .expect("ExitRequested");

    assert!(state.should_exit);
}

#[test]
fn test_options_dialog_oeffnen_und_verwerfen() {
    let mut controller = AppController::new();
    let mut state = live_state();
    state.options.cluster_radius_px = 75.0;

    controller
        .handle_intent(&mut state, AppIntent::OptionsDialogRequested)
        .expect("Dialog öffnen");
    assert!(state.ui.show_options_dialog);
    assert_relative_eq!(state.ui.options_draft.cluster_radius_px, 75.0);

    controller
        .handle_intent(&mut state, AppIntent::OptionsDialogClosed)
        .expect("Dialog schließen");
    assert!(!state.ui.show_options_dialog);
}

#[test]
fn test_leaderboard_toggle() {
    let mut controller = AppController::new();
    let mut state = live_state();
    let before = state.ui.show_leaderboard;

    controller
        .handle_intent(&mut state, AppIntent::LeaderboardToggled)
        .expect("Toggle");

    assert_ne!(state.ui.show_leaderboard, before);
}
