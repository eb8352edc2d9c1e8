//! Application-Layer: Controller, State, Events und Handler.

pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
/// Application State
///
/// Dieses Modul verwaltet den Zustand der Anwendung (geladene Einträge,
/// Karten-Komponente, UI-Zustand).
pub mod state;

pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use state::{AppState, UiState};
