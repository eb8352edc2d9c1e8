//! Application State — zentrale Datenhaltung.

use crate::core::GeoEntry;
use crate::data::{Contributor, ContributorsRequest, EntriesRequest};
use crate::map::{MapEngine, MapView, SurfaceHandle};
use crate::shared::ViewerOptions;

/// UI-bezogener Zustand (Popup, Panels, Dialoge, Banner).
pub struct UiState {
    /// ID des Eintrags mit offenem Popup
    pub popup_entry_id: Option<String>,
    /// Leaderboard-Panel sichtbar?
    pub show_leaderboard: bool,
    /// Options-Dialog sichtbar?
    pub show_options_dialog: bool,
    /// Arbeitskopie der Optionen für den Dialog
    pub options_draft: ViewerOptions,
    /// Aktuelles Fehlerbanner
    pub error_banner: Option<String>,
    /// Läuft gerade ein Entries-Abruf?
    pub loading_entries: bool,
}

impl UiState {
    /// Erstellt den Start-UI-Zustand.
    pub fn new(options: &ViewerOptions) -> Self {
        Self {
            popup_entry_id: None,
            show_leaderboard: true,
            show_options_dialog: false,
            options_draft: options.clone(),
            error_banner: None,
            loading_entries: false,
        }
    }
}

/// Gesamtzustand der Anwendung.
///
/// Generisch über die Engine, damit die Controller-Flows auch gegen
/// eine Mock-Engine laufen (die echte Engine braucht eine GPU).
pub struct AppState<E: MapEngine> {
    /// Die Karten-Komponente (besitzt die Engine exklusiv)
    pub map_view: MapView<E>,
    /// Handle der Zeichenfläche
    pub surface: SurfaceHandle,
    /// Zuletzt geladene Einträge (für Statuszeile und Refresh)
    pub entries: Vec<GeoEntry>,
    /// Aktuelle Top-Contributor-Liste
    pub contributors: Vec<Contributor>,
    /// Laufender Entries-Abruf
    pub entries_request: Option<EntriesRequest>,
    /// Laufender Contributors-Abruf
    pub contributors_request: Option<ContributorsRequest>,
    /// Aktive Optionen
    pub options: ViewerOptions,
    /// UI-Zustand
    pub ui: UiState,
    /// Anwendung beenden?
    pub should_exit: bool,
}

impl<E: MapEngine> AppState<E> {
    /// Erstellt den Startzustand mit den übergebenen Optionen.
    pub fn new(options: ViewerOptions) -> Self {
        Self {
            map_view: MapView::new(options.clone()),
            surface: SurfaceHandle::new(),
            entries: Vec::new(),
            contributors: Vec::new(),
            entries_request: None,
            contributors_request: None,
            ui: UiState::new(&options),
            options,
            should_exit: false,
        }
    }
}
