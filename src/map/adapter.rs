//! Map-Engine-Adapter: besitzt die einzige Engine-Instanz und kapselt
//! deren Lebenszyklus (initialize / onReady / destroy).

use super::engine::{MapEngine, SurfaceHandle};
use crate::core::MapViewport;
use crate::shared::ViewerOptions;
use crate::tiles::TileSourceConfig;

/// Beobachtbarer Zustand des Adapters.
///
/// Die Engine-Instanz selbst durchläuft Uninitialized → Initializing →
/// Ready → Destroyed; nach `destroy` kehrt der Adapter beobachtbar zu
/// `Uninitialized` zurück, ein erneutes `initialize` startet sauber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineState {
    /// Keine Engine-Instanz vorhanden
    #[default]
    Uninitialized,
    /// Engine erzeugt, Ready-Signal steht noch aus
    Initializing,
    /// Engine nimmt Zeichenbefehle an
    Ready,
}

/// Ergebnis eines `initialize`-Aufrufs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Engine wurde neu erzeugt
    Created,
    /// Es lebt bereits eine Instanz — Aufruf war ein No-op
    AlreadyInitialized,
    /// Zeichenfläche hängt noch nicht im Dokument („noch nicht“)
    SurfaceNotReady,
}

/// Besitzt genau eine Engine-Instanz pro Mount-Zyklus.
pub struct MapEngineAdapter<E: MapEngine> {
    engine: Option<E>,
    state: EngineState,
    ready_listeners: Vec<Box<dyn FnOnce()>>,
}

impl<E: MapEngine> Default for MapEngineAdapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: MapEngine> MapEngineAdapter<E> {
    /// Erstellt einen Adapter ohne Engine-Instanz.
    pub fn new() -> Self {
        Self {
            engine: None,
            state: EngineState::Uninitialized,
            ready_listeners: Vec::new(),
        }
    }

    /// Aktueller Adapter-Zustand.
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Nimmt die Engine Zeichenbefehle an?
    pub fn is_ready(&self) -> bool {
        self.state == EngineState::Ready
    }

    /// Lebt aktuell eine Engine-Instanz?
    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    /// Erzeugt die Engine gebunden an die Zeichenfläche.
    ///
    /// Idempotent: lebt bereits eine Instanz, passiert nichts. Ist die
    /// Fläche nicht angehängt, bleibt der Adapter still in
    /// `Uninitialized` — das ist kein Fehler, nur „noch nicht“.
    pub fn initialize(
        &mut self,
        surface: &SurfaceHandle,
        options: &ViewerOptions,
        build: impl FnOnce() -> E,
    ) -> InitOutcome {
        if self.engine.is_some() {
            log::debug!("initialize übersprungen: Engine-Instanz lebt bereits");
            return InitOutcome::AlreadyInitialized;
        }
        if !surface.is_attached() {
            return InitOutcome::SurfaceNotReady;
        }

        let mut engine = build();
        // Neutrale Start-Ansicht und Basis-Kachelquelle setzen
        engine.set_viewport(MapViewport::new(
            options.initial_center(),
            options.initial_zoom,
        ));
        engine.set_base_layer(TileSourceConfig::from_options(options));

        self.engine = Some(engine);
        self.state = EngineState::Initializing;
        log::info!("Map-Engine initialisiert");
        InitOutcome::Created
    }

    /// Registriert eine einmalige Ready-Benachrichtigung.
    /// Ist die Engine bereits bereit, feuert der Callback sofort.
    pub fn on_ready(&mut self, callback: impl FnOnce() + 'static) {
        match self.state {
            EngineState::Ready => callback(),
            _ => self.ready_listeners.push(Box::new(callback)),
        }
    }

    /// Liefert das Ready-Signal der Engine aus.
    ///
    /// Feuert alle registrierten Callbacks genau einmal. In jedem
    /// anderen Zustand als `Initializing` wird das Signal ignoriert
    /// (z. B. wenn es nach einem `destroy` noch eintrifft).
    pub fn mark_ready(&mut self) {
        if self.state != EngineState::Initializing {
            log::debug!("Ready-Signal im Zustand {:?} ignoriert", self.state);
            return;
        }
        self.state = EngineState::Ready;
        for listener in self.ready_listeners.drain(..) {
            listener();
        }
    }

    /// Baut die Engine ab und löst die Flächen-Bindung.
    ///
    /// Idempotent: ohne lebende Instanz passiert nichts. Ausstehende
    /// Ready-Callbacks werden verworfen; danach ist der Adapter wieder
    /// `Uninitialized` und weist Zeichenbefehle ab.
    pub fn destroy(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            engine.teardown();
            log::info!("Map-Engine abgebaut");
        }
        self.ready_listeners.clear();
        self.state = EngineState::Uninitialized;
    }

    /// Engine-Zugriff für den Host (Frame-Aufbau, Interaktion).
    ///
    /// Zeichenbefehle des Kerns laufen nicht hierüber, sondern über den
    /// Marker-Layer-Manager, der den Ready-Zustand prüft.
    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Lesender Engine-Zugriff.
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::engine::{EngineError, LayerId};
    use crate::map::layer::MarkerLayer;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Minimale Engine für Adapter-Tests.
    #[derive(Default)]
    struct NullEngine {
        torn_down: bool,
    }

    impl MapEngine for NullEngine {
        fn set_base_layer(&mut self, _source: TileSourceConfig) {}
        fn viewport(&self) -> MapViewport {
            MapViewport::new(crate::core::LatLng::new(0.0, 0.0), 2.0)
        }
        fn set_viewport(&mut self, _viewport: MapViewport) {}
        fn surface_size(&self) -> [f32; 2] {
            [800.0, 600.0]
        }
        fn attach_layer(&mut self, _layer: MarkerLayer) -> Result<LayerId, EngineError> {
            Ok(LayerId(1))
        }
        fn detach_layer(&mut self, _id: LayerId) -> Result<(), EngineError> {
            Ok(())
        }
        fn teardown(&mut self) {
            self.torn_down = true;
        }
    }

    fn attached_surface() -> SurfaceHandle {
        let surface = SurfaceHandle::new();
        surface.attach();
        surface
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let surface = attached_surface();
        let options = ViewerOptions::default();

        assert_eq!(
            adapter.initialize(&surface, &options, NullEngine::default),
            InitOutcome::Created
        );
        assert_eq!(
            adapter.initialize(&surface, &options, NullEngine::default),
            InitOutcome::AlreadyInitialized
        );
        assert_eq!(adapter.state(), EngineState::Initializing);
    }

    #[test]
    fn test_initialize_without_surface_stays_uninitialized() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let surface = SurfaceHandle::new();
        let options = ViewerOptions::default();

        assert_eq!(
            adapter.initialize(&surface, &options, NullEngine::default),
            InitOutcome::SurfaceNotReady
        );
        assert_eq!(adapter.state(), EngineState::Uninitialized);
        assert!(!adapter.has_engine());
    }

    #[test]
    fn test_on_ready_fires_exactly_once() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let options = ViewerOptions::default();
        adapter.initialize(&attached_surface(), &options, NullEngine::default);

        let fired = Rc::new(Cell::new(0u32));
        let probe = Rc::clone(&fired);
        adapter.on_ready(move || probe.set(probe.get() + 1));

        adapter.mark_ready();
        adapter.mark_ready(); // doppeltes Signal darf nicht erneut feuern
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_on_ready_after_ready_fires_immediately() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let options = ViewerOptions::default();
        adapter.initialize(&attached_surface(), &options, NullEngine::default);
        adapter.mark_ready();

        let fired = Rc::new(Cell::new(false));
        let probe = Rc::clone(&fired);
        adapter.on_ready(move || probe.set(true));
        assert!(fired.get());
    }

    #[test]
    fn test_ready_after_destroy_is_ignored() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let options = ViewerOptions::default();
        adapter.initialize(&attached_surface(), &options, NullEngine::default);

        let fired = Rc::new(Cell::new(false));
        let probe = Rc::clone(&fired);
        adapter.on_ready(move || probe.set(true));

        adapter.destroy();
        adapter.mark_ready();

        assert!(!fired.get(), "Ready nach destroy darf nicht feuern");
        assert_eq!(adapter.state(), EngineState::Uninitialized);
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let options = ViewerOptions::default();
        adapter.initialize(&attached_surface(), &options, NullEngine::default);

        adapter.destroy();
        adapter.destroy();
        assert!(!adapter.has_engine());
        assert_eq!(adapter.state(), EngineState::Uninitialized);
    }

    #[test]
    fn test_reinitialize_after_destroy() {
        let mut adapter = MapEngineAdapter::<NullEngine>::new();
        let options = ViewerOptions::default();
        let surface = attached_surface();

        adapter.initialize(&surface, &options, NullEngine::default);
        adapter.destroy();

        assert_eq!(
            adapter.initialize(&surface, &options, NullEngine::default),
            InitOutcome::Created
        );
    }
}
