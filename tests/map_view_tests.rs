//! Integrationstests für die Map-View-Komponente:
//! - Marker-Synchronisation (Ersetzen statt Patchen)
//! - Readiness-Ordnung und Last-Write-Wins
//! - Unmount-Idempotenz und Teardown-Races

mod common;

use approx::assert_relative_eq;
use common::{attached_surface, entry, test_options, MockEngine};
use dead_tree_map::{LifecyclePhase, MapView, SurfaceHandle};

/// Baut eine gemountete, bereite Komponente über der Engine-Attrappe.
fn live_view() -> (MapView<MockEngine>, SurfaceHandle) {
    let mut view = MapView::new(test_options());
    let surface = attached_surface();
    view.mount(&surface, MockEngine::new);
    view.notify_ready();
    assert_eq!(view.phase(), LifecyclePhase::Live);
    (view, surface)
}

// ─── Marker-Synchronisation ──────────────────────────────────────────────────

#[test]
fn test_doppeltes_rendern_erzeugt_keine_duplikate() {
    let (mut view, _surface) = live_view();
    let entries = vec![entry("a", 10.0, 20.0), entry("b", 11.0, 21.0)];

    view.set_entries(entries.clone());
    view.set_entries(entries);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_count(), 2, "Kein Duplikat nach zweitem Render");
    assert_eq!(engine.attach_count, 2, "Jeder Render hängt genau einen Container an");
    assert_eq!(engine.detach_count, 1, "Zweiter Render löst den ersten Container");
}

#[test]
fn test_leere_liste_laesst_karte_sauber_und_viewport_unveraendert() {
    let (mut view, _surface) = live_view();
    view.set_entries(vec![entry("a", 10.0, 20.0), entry("b", 12.0, 22.0)]);

    let engine = view.engine().expect("Engine muss leben");
    let fitted = engine.viewport;
    let viewport_calls = engine.viewport_history.len();

    view.set_entries(Vec::new());

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_count(), 0);
    assert!(engine.attached.is_none(), "Leerer Bestand: kein Container angehängt");
    assert_eq!(
        engine.viewport_history.len(),
        viewport_calls,
        "Leeres Update darf den Viewport nicht anfassen"
    );
    assert_eq!(engine.viewport, fitted, "Zuletzt gefitteter Viewport bleibt stehen");
}

#[test]
fn test_ungueltige_koordinaten_werden_uebersprungen() {
    let (mut view, _surface) = live_view();

    view.set_entries(vec![
        entry("ok-1", 10.0, 20.0),
        entry("bad-lat", 91.0, 0.0),
        entry("bad-lng", 0.0, 200.0),
        entry("ok-2", -45.0, 170.0),
    ]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_count(), 2);
    assert_eq!(engine.marker_ids(), vec!["ok-1", "ok-2"]);
}

#[test]
fn test_szenario_ein_gueltiger_von_zwei_eintraegen() {
    // [{id:"1",lat:10,lng:20}, {id:"2",lat:-91,lng:5}] → genau ein Marker,
    // Viewport auf den Einzelpunkt gefittet (gepolsterte Punkt-Bounds)
    let (mut view, _surface) = live_view();
    let options = test_options();

    view.set_entries(vec![entry("1", 10.0, 20.0), entry("2", -91.0, 5.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_count(), 1);
    assert_eq!(engine.marker_ids(), vec!["1"]);

    assert_relative_eq!(engine.viewport.center.lat, 10.0, epsilon = 1e-9);
    assert_relative_eq!(engine.viewport.center.lng, 20.0, epsilon = 1e-9);
    assert_relative_eq!(engine.viewport.zoom, options.zoom_max);
}

#[test]
fn test_sequenzielle_renders_ersetzen_den_bestand() {
    // {A,B} dann {B,C} → final exakt B und C; A ist gelöst
    let (mut view, _surface) = live_view();

    view.set_entries(vec![entry("a", 1.0, 1.0), entry("b", 2.0, 2.0)]);
    view.set_entries(vec![entry("b", 2.0, 2.0), entry("c", 3.0, 3.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_ids(), vec!["b", "c"]);
    assert_eq!(engine.detach_count, 1, "Der alte Container wurde gelöst");
}

#[test]
fn test_teardown_race_beim_loesen_ist_erfolg() {
    let (mut view, _surface) = live_view();
    view.set_entries(vec![entry("a", 1.0, 1.0)]);

    // Engine meldet beim nächsten Lösen „bereits entfernt“
    view.engine_mut()
        .expect("Engine muss leben")
        .answer_next_detach_as_already_detached = true;

    view.set_entries(vec![entry("b", 2.0, 2.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_ids(), vec!["b"], "Race bricht den Render nicht ab");
}

// ─── Readiness-Ordnung ───────────────────────────────────────────────────────

#[test]
fn test_keine_zeichenbefehle_vor_ready() {
    let mut view: MapView<MockEngine> = MapView::new(test_options());
    let surface = attached_surface();
    view.mount(&surface, MockEngine::new);
    assert_eq!(view.phase(), LifecyclePhase::AwaitingReady);

    view.set_entries(vec![entry("a", 1.0, 1.0)]);
    view.set_entries(vec![entry("b", 2.0, 2.0), entry("c", 3.0, 3.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.attach_count, 0, "Vor Ready darf nichts gezeichnet werden");
    // Initialize setzt genau einmal die neutrale Start-Ansicht
    assert_eq!(engine.viewport_history.len(), 1);

    view.notify_ready();

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.attach_count, 1, "Nur die letzte Liste wird angewendet");
    assert_eq!(engine.marker_ids(), vec!["b", "c"], "Last-Write-Wins");
}

#[test]
fn test_initialize_setzt_neutrale_startansicht() {
    let mut view: MapView<MockEngine> = MapView::new(test_options());
    let surface = attached_surface();
    view.mount(&surface, MockEngine::new);

    let engine = view.engine().expect("Engine muss leben");
    let options = test_options();
    assert_relative_eq!(engine.viewport.center.lat, options.initial_center[0]);
    assert_relative_eq!(engine.viewport.center.lng, options.initial_center[1]);
    assert_relative_eq!(engine.viewport.zoom, options.initial_zoom);
    assert!(engine.base_layer.is_some(), "Basis-Kachelquelle wurde gesetzt");
}

// ─── Lebenszyklus ────────────────────────────────────────────────────────────

#[test]
fn test_unmount_ist_idempotent() {
    let (mut view, _surface) = live_view();
    view.set_entries(vec![entry("a", 1.0, 1.0)]);

    view.unmount();
    assert_eq!(view.phase(), LifecyclePhase::Unmounted);
    assert!(view.engine().is_none(), "Engine-Referenz ist nach Unmount weg");
    assert_eq!(view.marker_count(), 0);

    // Zweiter Unmount: kein Fehler, Zustand unverändert
    view.unmount();
    assert_eq!(view.phase(), LifecyclePhase::Unmounted);
    assert!(view.engine().is_none());
}

#[test]
fn test_ready_nach_unmount_wird_ignoriert() {
    let mut view: MapView<MockEngine> = MapView::new(test_options());
    let surface = attached_surface();
    view.mount(&surface, MockEngine::new);
    view.unmount();

    view.notify_ready();

    assert_eq!(view.phase(), LifecyclePhase::Unmounted);
    assert!(view.engine().is_none());
}

#[test]
fn test_mount_ohne_angehaengte_flaeche_bleibt_unmounted() {
    let mut view: MapView<MockEngine> = MapView::new(test_options());
    let surface = SurfaceHandle::new(); // nicht angehängt

    view.mount(&surface, MockEngine::new);
    assert_eq!(view.phase(), LifecyclePhase::Unmounted, "„Noch nicht“ ist kein Fehler");
    assert!(view.engine().is_none());

    // Nächster Versuch mit angehängter Fläche klappt
    surface.attach();
    view.mount(&surface, MockEngine::new);
    assert_eq!(view.phase(), LifecyclePhase::AwaitingReady);
}

#[test]
fn test_remount_nach_unmount_startet_sauber() {
    let (mut view, surface) = live_view();
    view.set_entries(vec![entry("a", 1.0, 1.0)]);
    view.unmount();

    view.mount(&surface, MockEngine::new);
    view.notify_ready();

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_count(), 0, "Frischer Mount beginnt ohne Altbestand");
    assert_eq!(view.phase(), LifecyclePhase::Live);
}

#[test]
fn test_flaechen_abbau_racet_mit_datenankunft() {
    let (mut view, surface) = live_view();

    // Fläche wird abgehängt, während Daten asynchron eintreffen
    surface.detach();
    view.set_entries(vec![entry("a", 1.0, 1.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.attach_count, 0, "Ohne Fläche kein Render");

    // Fläche wieder da: nächstes Update rendert normal
    surface.attach();
    view.set_entries(vec![entry("b", 2.0, 2.0)]);

    let engine = view.engine().expect("Engine muss leben");
    assert_eq!(engine.marker_ids(), vec!["b"]);
}
