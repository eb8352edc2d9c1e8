//! Map-View-Komponente: Lebenszyklus-Zustandsmaschine über Adapter,
//! Marker-Layer-Manager und Viewport-Fitter.

use super::adapter::{InitOutcome, MapEngineAdapter};
use super::engine::{MapEngine, SurfaceHandle};
use super::fitter::ViewportFitter;
use super::markers::MarkerLayerManager;
use crate::core::GeoEntry;
use crate::shared::ViewerOptions;

/// Lebenszyklus-Phase der Komponente.
///
/// `Mounting` und `Unmounting` sind transient: sie werden innerhalb von
/// `mount` bzw. `unmount` durchlaufen und sind von außen nur während
/// dieser Aufrufe beobachtbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Nicht montiert, keine Engine-Ressourcen
    #[default]
    Unmounted,
    /// Engine wird gerade erzeugt
    Mounting,
    /// Engine erzeugt, Ready-Signal steht aus
    AwaitingReady,
    /// Voll funktionsfähig; Eingabelisten werden sofort gerendert
    Live,
    /// Abbau läuft
    Unmounting,
}

/// Die nach außen sichtbare Karten-Komponente.
///
/// Nimmt Listen von Geo-Einträgen entgegen und hält die Engine-Instanz
/// exklusiv. Zeichenbefehle entstehen ausschließlich in der Phase
/// `Live`; alle anderen Phasen merken die jeweils letzte Liste vor
/// (Last-Write-Wins, keine Wiedergabe von Zwischenständen).
pub struct MapView<E: MapEngine> {
    adapter: MapEngineAdapter<E>,
    markers: MarkerLayerManager,
    phase: LifecyclePhase,
    surface: Option<SurfaceHandle>,
    pending_entries: Option<Vec<GeoEntry>>,
    options: ViewerOptions,
}

impl<E: MapEngine> MapView<E> {
    /// Erstellt eine unmontierte Komponente.
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            adapter: MapEngineAdapter::new(),
            markers: MarkerLayerManager::new(),
            phase: LifecyclePhase::Unmounted,
            surface: None,
            pending_entries: None,
            options,
        }
    }

    /// Aktuelle Lebenszyklus-Phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Ist die Komponente voll funktionsfähig?
    pub fn is_live(&self) -> bool {
        self.phase == LifecyclePhase::Live
    }

    /// Anzahl der aktuell gerenderten Marker.
    pub fn marker_count(&self) -> usize {
        self.markers.marker_count()
    }

    /// Lebt aktuell eine Engine-Instanz?
    pub fn has_engine(&self) -> bool {
        self.adapter.has_engine()
    }

    /// Aktive Optionen.
    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    /// Übernimmt geänderte Optionen; wirksam ab dem nächsten Render.
    pub fn set_options(&mut self, options: ViewerOptions) {
        self.options = options;
    }

    /// Montiert die Komponente auf eine Zeichenfläche.
    ///
    /// Hängt die Fläche noch nicht im Dokument, bleibt die Komponente
    /// still unmontiert; der nächste Mount-Versuch probiert es erneut.
    pub fn mount(&mut self, surface: &SurfaceHandle, build: impl FnOnce() -> E) {
        if self.phase != LifecyclePhase::Unmounted {
            return;
        }
        self.phase = LifecyclePhase::Mounting;

        match self.adapter.initialize(surface, &self.options, build) {
            InitOutcome::Created | InitOutcome::AlreadyInitialized => {
                self.surface = Some(surface.clone());
                self.phase = LifecyclePhase::AwaitingReady;
            }
            InitOutcome::SurfaceNotReady => {
                // „Noch nicht“: kein Fehler, nächstes Ereignis probiert erneut
                self.phase = LifecyclePhase::Unmounted;
            }
        }
    }

    /// Liefert das Ready-Signal der Engine aus.
    ///
    /// Nur in `AwaitingReady` wirksam; trifft das Signal nach begonnenem
    /// Unmount ein, wird es anhand der Phase erkannt und ignoriert.
    pub fn notify_ready(&mut self) {
        if self.phase != LifecyclePhase::AwaitingReady {
            log::debug!("Ready-Signal in Phase {:?} ignoriert", self.phase);
            return;
        }
        self.adapter.mark_ready();
        self.phase = LifecyclePhase::Live;

        // Vorgemerkte Liste genau einmal anwenden
        if let Some(entries) = self.pending_entries.take() {
            self.render_entries(&entries);
        }
    }

    /// Nimmt eine neue Eingabeliste entgegen.
    ///
    /// In `Live` wird sofort gerendert — sofern die Zeichenfläche noch
    /// angehängt ist (defensiver Re-Check, weil das Abhängen mit
    /// asynchroner Datenankunft racen kann). Sonst wird die Liste als
    /// einzige ausstehende vorgemerkt (Last-Write-Wins).
    pub fn set_entries(&mut self, entries: Vec<GeoEntry>) {
        if self.phase == LifecyclePhase::Live {
            if self.surface.as_ref().is_some_and(|s| s.is_attached()) {
                self.render_entries(&entries);
                self.pending_entries = None;
                return;
            }
            log::debug!("Zeichenfläche abgehängt — Eingabeliste wird vorgemerkt");
        }
        self.pending_entries = Some(entries);
    }

    /// Baut die Komponente ab.
    ///
    /// Ruft `destroy` bedingungslos auf (egal aus welcher Phase) und
    /// setzt alle internen Referenzen zurück, sodass ein erneuter Mount
    /// sauber bei `Unmounted` startet. Mehrfacher Aufruf ist harmlos.
    pub fn unmount(&mut self) {
        self.phase = LifecyclePhase::Unmounting;
        self.adapter.destroy();
        self.markers.reset();
        self.pending_entries = None;
        self.surface = None;
        self.phase = LifecyclePhase::Unmounted;
    }

    /// Engine-Zugriff für den Host (Frame-Aufbau, Hit-Tests).
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.adapter.engine_mut()
    }

    /// Lesender Engine-Zugriff (u. a. für Tests).
    pub fn engine(&self) -> Option<&E> {
        self.adapter.engine()
    }

    /// Kompletter Render-Durchlauf: Marker ersetzen, dann Viewport fitten.
    fn render_entries(&mut self, entries: &[GeoEntry]) {
        if !self.adapter.is_ready() {
            // Nicht erreichbar aus der Zustandsmaschine; defensiv statt Panik
            log::warn!("Render ohne bereite Engine unterdrückt");
            return;
        }
        let options = self.options.clone();
        let Some(engine) = self.adapter.engine_mut() else {
            return;
        };

        let stats = self.markers.render(engine, entries, &options);
        if stats.skipped > 0 {
            log::info!(
                "{} von {} Einträgen wegen ungültiger Koordinaten übersprungen",
                stats.skipped,
                entries.len()
            );
        }
        ViewportFitter::fit(engine, self.markers.last_bounds(), &options);
    }
}
