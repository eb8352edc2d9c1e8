//! Daten-Layer: Grenze zu den externen Kollaborateuren (Backend, Dateien).
//!
//! Der Karten-Kern erzeugt oder persistiert keine Einträge — er liest
//! nur, was dieser Layer liefert. Netzwerkzugriffe laufen auf
//! Worker-Threads und werden per Kanal vom Update-Loop gepollt.

mod contributors;
mod entries;

pub use contributors::{fetch_contributors, Contributor, ContributorsRequest};
pub use entries::{fetch_entries, load_entries_file, EntriesRequest};
