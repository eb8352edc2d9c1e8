//! Beschaffung der Geo-Einträge: HTTP-Endpunkt oder lokale JSON-Datei.

use crate::core::GeoEntry;
use anyhow::Context;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Timeout für Backend-Anfragen.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Laufende Entries-Anfrage; Ergebnis wird pro Frame gepollt.
pub struct EntriesRequest {
    rx: Receiver<anyhow::Result<Vec<GeoEntry>>>,
}

impl EntriesRequest {
    /// Liefert das Ergebnis, sobald der Worker fertig ist.
    /// `None` solange die Anfrage noch läuft.
    pub fn poll(&self) -> Option<anyhow::Result<Vec<GeoEntry>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err(anyhow::anyhow!("Entries-Worker abgebrochen")))
            }
        }
    }
}

/// Startet eine Hintergrund-Anfrage gegen den Entries-Endpunkt.
pub fn fetch_entries(endpoint: &str) -> EntriesRequest {
    let endpoint = endpoint.to_string();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("entries-fetch".into())
        .spawn(move || {
            let result = fetch_blocking(&endpoint);
            if let Err(e) = &result {
                log::error!("Entries-Abruf fehlgeschlagen: {:#}", e);
            }
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        log::error!("Entries-Worker konnte nicht starten: {}", e);
    }

    EntriesRequest { rx }
}

/// Synchroner Abruf auf dem Worker-Thread.
fn fetch_blocking(endpoint: &str) -> anyhow::Result<Vec<GeoEntry>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .context("HTTP-Client nicht erstellbar")?;

    let entries: Vec<GeoEntry> = client
        .get(endpoint)
        .send()
        .with_context(|| format!("Anfrage an {} fehlgeschlagen", endpoint))?
        .error_for_status()
        .context("Backend meldet Fehlerstatus")?
        .json()
        .context("Entries-Antwort ist kein gültiges JSON-Array")?;

    log::info!("{} Einträge vom Backend geladen", entries.len());
    Ok(entries)
}

/// Lädt Einträge aus einer lokalen JSON-Datei (Offline-Ansicht).
pub fn load_entries_file(path: &Path) -> anyhow::Result<Vec<GeoEntry>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Datei {} nicht lesbar", path.display()))?;
    let entries: Vec<GeoEntry> =
        serde_json::from_str(&content).context("Datei enthält kein gültiges Entries-Array")?;

    log::info!(
        "{} Einträge aus {} geladen",
        entries.len(),
        path.display()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_entries_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join("dead_tree_map_test_entries.json");
        std::fs::write(
            &path,
            r#"[{"id":"1","user_id":"u","photo_url":"https://x/p.jpg",
                "latitude":10.0,"longitude":20.0,
                "created_at":"2024-01-01T00:00:00Z"}]"#,
        )
        .expect("Testdatei schreibbar");

        let entries = load_entries_file(&path).expect("Datei muss ladbar sein");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "1");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_entries_file_rejects_invalid_json() {
        let dir = std::env::temp_dir();
        let path = dir.join("dead_tree_map_test_invalid.json");
        std::fs::write(&path, "kein json").expect("Testdatei schreibbar");

        assert!(load_entries_file(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }
}
