//! AppIntent- und AppCommand-Enums für den Intent/Command-Datenfluss.

use crate::core::GeoEntry;
use crate::data::Contributor;
use crate::shared::ViewerOptions;

/// App-Intent und App-Command Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
#[derive(Debug, Clone)]
pub enum AppIntent {
    /// Einträge und Leaderboard neu vom Backend laden
    RefreshRequested,
    /// Lokale Entries-Datei öffnen (zeigt Dateidialog)
    OpenEntriesFileRequested,
    /// Entries-Datei wurde im Dialog ausgewählt
    EntriesFileSelected { path: String },
    /// Entries-Abruf erfolgreich abgeschlossen
    EntriesLoaded { entries: Vec<GeoEntry> },
    /// Entries-Abruf fehlgeschlagen
    EntriesLoadFailed { message: String },
    /// Contributors-Abruf abgeschlossen
    ContributorsLoaded { contributors: Vec<Contributor> },

    /// Engine meldet: Setup abgeschlossen, Zeichenbefehle erlaubt
    EngineReady,

    /// Kamera um Screen-Pixel-Delta verschieben
    CameraPan { delta: [f32; 2] },
    /// Kamera um Stufen zoomen (optional auf einen Fokuspunkt)
    CameraZoom {
        steps: f64,
        focus_px: Option<[f32; 2]>,
    },
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Zurück zur Start-Ansicht
    ResetViewRequested,

    /// Klick auf die Karte (Position relativ zur Zeichenfläche)
    MapClicked { pos: [f32; 2] },
    /// Popup schließen
    PopupClosed,
    /// Leaderboard-Panel ein-/ausblenden
    LeaderboardToggled,

    /// Options-Dialog öffnen
    OptionsDialogRequested,
    /// Options-Dialog schließen (verwerfen)
    OptionsDialogClosed,
    /// Geänderte Optionen übernehmen
    OptionsApplied { options: ViewerOptions },

    /// Anwendung beenden
    ExitRequested,
}

/// Mutierende Commands; werden von Handlern ausgeführt.
#[derive(Debug, Clone)]
pub enum AppCommand {
    // === Daten ===
    /// Entries-Abruf starten
    FetchEntries,
    /// Contributors-Abruf starten
    FetchContributors,
    /// Entries-Datei laden
    LoadEntriesFile { path: String },
    /// Geladene Einträge übernehmen und rendern
    ApplyEntries { entries: Vec<GeoEntry> },
    /// Contributors übernehmen
    ApplyContributors { contributors: Vec<Contributor> },
    /// Fehlerbanner anzeigen
    ShowError { message: String },

    // === Engine-Lebenszyklus ===
    /// Ready-Signal an die Komponente durchreichen
    NotifyEngineReady,

    // === Kamera & Viewport ===
    /// Kamera um Delta verschieben
    PanCamera { delta: [f32; 2] },
    /// Kamera zoomen (optional auf einen Fokuspunkt)
    ZoomCamera {
        steps: f64,
        focus_px: Option<[f32; 2]>,
    },
    /// Kamera auf die Start-Ansicht zurücksetzen
    ResetCamera,

    // === Interaktion ===
    /// Karten-Klick auswerten (Marker-Popup, Cluster-Zoom, Spiderfy)
    HandleMapClick { pos: [f32; 2] },
    /// Popup schließen
    ClosePopup,
    /// Leaderboard-Panel umschalten
    ToggleLeaderboard,

    // === Dialoge & Anwendungssteuerung ===
    /// Dateidialog für Entries-Datei öffnen
    RequestOpenFileDialog,
    /// Options-Dialog öffnen
    OpenOptionsDialog,
    /// Options-Dialog schließen
    CloseOptionsDialog,
    /// Optionen übernehmen und persistieren
    ApplyOptions { options: ViewerOptions },
    /// Anwendung beenden
    RequestExit,
}
