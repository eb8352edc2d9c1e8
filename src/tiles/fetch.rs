//! Hintergrund-Beschaffung von Kacheln über Worker-Threads.
//!
//! Die Worker kommunizieren ausschließlich über Kanäle; der Hauptthread
//! pollt die Ergebnisse pro Frame (`poll`) und hält den dekodierten
//! Cache. Fehlgeschlagene Kacheln werden negativ gecacht, damit eine
//! unerreichbare Quelle keinen Request-Sturm auslöst — fehlende
//! Kacheln sind rein kosmetisch.

use super::{TileId, TileSourceConfig};
use image::RgbaImage;
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;

/// Anzahl paralleler Fetch-Worker.
const FETCH_WORKERS: usize = 3;
/// User-Agent für die Kachelquelle (OSM-Tile-Policy verlangt einen).
const USER_AGENT: &str = "DeadTree-Map-Viewer/1.2 (+https://github.com/mro68/deadtree_map_viewer)";

/// Beschafft und cached dekodierte Kacheln.
pub struct TileFetcher {
    source: TileSourceConfig,
    /// Dekodierte Kacheln; `None` = Beschaffung fehlgeschlagen
    cache: LruCache<TileId, Option<RgbaImage>>,
    /// Angefragte, noch nicht eingetroffene Kacheln
    pending: HashSet<TileId>,
    jobs: Sender<(TileId, String)>,
    results: Receiver<(TileId, Option<RgbaImage>)>,
}

impl TileFetcher {
    /// Erstellt den Fetcher und startet die Worker-Threads.
    pub fn new(source: TileSourceConfig, capacity: usize) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<(TileId, String)>();
        let (result_tx, result_rx) = mpsc::channel();

        let job_rx = Arc::new(Mutex::new(job_rx));
        for worker in 0..FETCH_WORKERS {
            let rx = Arc::clone(&job_rx);
            let tx = result_tx.clone();
            if let Err(e) = thread::Builder::new()
                .name(format!("tile-fetch-{worker}"))
                .spawn(move || fetch_worker(rx, tx))
            {
                log::error!("Tile-Worker {} konnte nicht starten: {}", worker, e);
            }
        }

        let capacity = NonZeroUsize::new(capacity.max(1)).expect("Kapazität >= 1");
        Self {
            source,
            cache: LruCache::new(capacity),
            pending: HashSet::new(),
            jobs: job_tx,
            results: result_rx,
        }
    }

    /// Aktive Kachelquelle.
    pub fn source(&self) -> &TileSourceConfig {
        &self.source
    }

    /// Wechselt die Kachelquelle und verwirft alle gecachten Kacheln.
    pub fn set_source(&mut self, source: TileSourceConfig) {
        if source != self.source {
            self.source = source;
            self.cache.clear();
            self.pending.clear();
        }
    }

    /// Fordert eine Kachel an, falls sie weder gecacht noch unterwegs ist.
    pub fn request(&mut self, tile: TileId) {
        if self.pending.contains(&tile) || self.cache.contains(&tile) {
            return;
        }
        let url = self.source.url_for(tile);
        if self.jobs.send((tile, url)).is_ok() {
            self.pending.insert(tile);
        }
    }

    /// Liefert die dekodierte Kachel, falls vorhanden.
    pub fn get(&mut self, tile: TileId) -> Option<&RgbaImage> {
        self.cache.get(&tile).and_then(|slot| slot.as_ref())
    }

    /// Übernimmt eingetroffene Worker-Ergebnisse in den Cache.
    /// Gibt die IDs neu verfügbarer Kacheln zurück (für den GPU-Upload).
    pub fn poll(&mut self) -> Vec<TileId> {
        let mut arrived = Vec::new();
        while let Ok((tile, decoded)) = self.results.try_recv() {
            self.pending.remove(&tile);
            if decoded.is_some() {
                arrived.push(tile);
            }
            self.cache.put(tile, decoded);
        }
        arrived
    }

    /// Anzahl angefragter, noch nicht eingetroffener Kacheln.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Worker-Schleife: Jobs entgegennehmen, Kachel laden, Ergebnis melden.
/// Beendet sich, sobald der Job-Kanal geschlossen ist (Fetcher verworfen).
fn fetch_worker(
    jobs: Arc<Mutex<Receiver<(TileId, String)>>>,
    results: Sender<(TileId, Option<RgbaImage>)>,
) {
    let client = match reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT)
        .build()
    {
        Ok(c) => c,
        Err(e) => {
            log::error!("HTTP-Client für Kachel-Worker nicht erstellbar: {}", e);
            return;
        }
    };

    loop {
        let job = match jobs.lock() {
            Ok(rx) => rx.recv(),
            Err(_) => return,
        };
        let Ok((tile, url)) = job else {
            return;
        };

        let decoded = fetch_tile(&client, &url);
        if decoded.is_none() {
            log::debug!("Kachel {}/{}/{} nicht ladbar", tile.z, tile.x, tile.y);
        }
        if results.send((tile, decoded)).is_err() {
            return;
        }
    }
}

/// Lädt und dekodiert eine einzelne Kachel. Jeder Fehler ergibt `None`.
fn fetch_tile(client: &reqwest::blocking::Client, url: &str) -> Option<RgbaImage> {
    let response = client.get(url).send().ok()?.error_for_status().ok()?;
    let bytes = response.bytes().ok()?;
    let decoded = image::load_from_memory(&bytes).ok()?;
    Some(decoded.to_rgba8())
}
