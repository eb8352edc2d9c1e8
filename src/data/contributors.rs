//! Top-Contributor-Liste für das Leaderboard-Panel.
//!
//! Die Aggregation rechnet das Backend; hier wird nur angezeigt, was
//! der Endpunkt liefert.

use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

/// Timeout für Backend-Anfragen.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Ein Eintrag der Top-Contributor-Liste (Backend-Shape).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contributor {
    /// ID des Users
    pub user_id: String,
    /// Anzeigename (None = anonym)
    #[serde(default)]
    pub username: Option<String>,
    /// Anzahl gemeldeter Einträge
    pub entry_count: u64,
    /// Platzierung (1-basiert)
    pub rank: u32,
}

impl Contributor {
    /// Anzeigename fürs Panel.
    pub fn display_name(&self) -> String {
        match self.username.as_deref() {
            Some(name) if !name.is_empty() => format!("@{}", name),
            _ => "Anonymous".to_string(),
        }
    }
}

/// Laufende Contributors-Anfrage.
pub struct ContributorsRequest {
    rx: Receiver<anyhow::Result<Vec<Contributor>>>,
}

impl ContributorsRequest {
    /// Liefert das Ergebnis, sobald der Worker fertig ist.
    pub fn poll(&self) -> Option<anyhow::Result<Vec<Contributor>>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                Some(Err(anyhow::anyhow!("Contributors-Worker abgebrochen")))
            }
        }
    }
}

/// Startet eine Hintergrund-Anfrage gegen den Contributors-Endpunkt.
pub fn fetch_contributors(endpoint: &str, limit: usize) -> ContributorsRequest {
    let endpoint = endpoint.to_string();
    let (tx, rx) = mpsc::channel();

    let spawned = thread::Builder::new()
        .name("contributors-fetch".into())
        .spawn(move || {
            let result = fetch_blocking(&endpoint, limit);
            if let Err(e) = &result {
                log::warn!("Contributors-Abruf fehlgeschlagen: {:#}", e);
            }
            let _ = tx.send(result);
        });
    if let Err(e) = spawned {
        log::error!("Contributors-Worker konnte nicht starten: {}", e);
    }

    ContributorsRequest { rx }
}

fn fetch_blocking(endpoint: &str, limit: usize) -> anyhow::Result<Vec<Contributor>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let mut contributors: Vec<Contributor> = client
        .get(endpoint)
        .send()?
        .error_for_status()?
        .json()?;

    contributors.truncate(limit);
    Ok(contributors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_fallback() {
        let anon = Contributor {
            user_id: "u1".into(),
            username: None,
            entry_count: 3,
            rank: 1,
        };
        assert_eq!(anon.display_name(), "Anonymous");

        let named = Contributor {
            username: Some("birk".into()),
            ..anon
        };
        assert_eq!(named.display_name(), "@birk");
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"[{"user_id":"u1","username":"karla","entry_count":12,"rank":1},
                       {"user_id":"u2","entry_count":7,"rank":2}]"#;
        let list: Vec<Contributor> = serde_json::from_str(json).expect("Shape dekodierbar");
        assert_eq!(list.len(), 2);
        assert!(list[1].username.is_none());
    }
}
