//! Feature-Handler: mutieren den AppState im Auftrag des Controllers.

pub mod data;
pub mod dialog;
pub mod interaction;
pub mod view;
