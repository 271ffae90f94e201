//! Raster tile fetching on worker threads.

use std::collections::HashSet;
use std::sync::{
    Arc,
    mpsc::{Receiver, Sender, TryRecvError, channel},
};
use std::thread;

use image::RgbaImage;

use crate::http_client;

use super::TileId;

const MAX_TILE_BYTES: usize = 2 * 1024 * 1024;
const MAX_IN_FLIGHT: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum TileError {
    #[error("HTTP error: {0}")]
    Transport(String),
    #[error("Tile server returned HTTP {0}")]
    Status(u16),
    #[error("Failed to read tile body: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to decode tile image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Produces decoded raster tiles.
pub trait TileSource: Send + Sync {
    fn fetch(&self, id: TileId) -> Result<RgbaImage, TileError>;
}

/// Fetches PNG tiles from a `{z}/{x}/{y}` URL template.
#[derive(Clone, Debug)]
pub struct OsmTileSource {
    url_template: String,
    user_agent: String,
}

impl OsmTileSource {
    pub fn new(url_template: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn tile_url(&self, id: TileId) -> String {
        self.url_template
            .replace("{z}", &id.zoom.to_string())
            .replace("{x}", &id.x.to_string())
            .replace("{y}", &id.y.to_string())
    }
}

impl TileSource for OsmTileSource {
    fn fetch(&self, id: TileId) -> Result<RgbaImage, TileError> {
        let url = self.tile_url(id);
        let response = match http_client::agent()
            .get(&url)
            .set("User-Agent", &self.user_agent)
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => return Err(TileError::Status(code)),
            Err(ureq::Error::Transport(err)) => return Err(TileError::Transport(err.to_string())),
        };
        let bytes = http_client::read_response_bytes(response, MAX_TILE_BYTES)?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}

/// Finished tile fetch.
pub struct TileUpdate {
    pub id: TileId,
    pub result: Result<RgbaImage, TileError>,
}

/// Deduplicating background tile fetcher.
///
/// A tile is requested at most once until [`TileLoader::retain`] forgets it.
pub struct TileLoader {
    source: Arc<dyn TileSource>,
    requested: HashSet<TileId>,
    in_flight: HashSet<TileId>,
    tx: Sender<TileUpdate>,
    rx: Receiver<TileUpdate>,
}

impl TileLoader {
    pub fn new(source: Arc<dyn TileSource>) -> Self {
        let (tx, rx) = channel();
        Self {
            source,
            requested: HashSet::new(),
            in_flight: HashSet::new(),
            tx,
            rx,
        }
    }

    /// Queue a fetch unless the tile was already requested or too many are in flight.
    ///
    /// Returns whether a fetch was started.
    pub fn request(&mut self, id: TileId) -> bool {
        if self.in_flight.len() >= MAX_IN_FLIGHT || self.requested.contains(&id) {
            return false;
        }
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("map-tile-{}-{}-{}", id.zoom, id.x, id.y))
            .spawn(move || {
                let result = source.fetch(id);
                let _ = tx.send(TileUpdate { id, result });
            });
        match spawned {
            Ok(_) => {
                self.requested.insert(id);
                self.in_flight.insert(id);
                true
            }
            Err(err) => {
                tracing::warn!("Failed to spawn tile fetch thread: {err}");
                false
            }
        }
    }

    /// Drain finished fetches.
    pub fn poll(&mut self) -> Vec<TileUpdate> {
        let mut updates = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(update) => {
                    self.in_flight.remove(&update.id);
                    if let Err(err) = &update.result {
                        tracing::debug!("Tile {:?} failed: {err}", update.id);
                    }
                    updates.push(update);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        updates
    }

    pub fn is_busy(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Forget finished tiles rejected by `keep` so they can be fetched again.
    pub fn retain(&mut self, keep: impl Fn(&TileId) -> bool) {
        let in_flight = &self.in_flight;
        self.requested.retain(|id| in_flight.contains(id) || keep(id));
    }

    pub fn requested_count(&self) -> usize {
        self.requested.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct SolidTiles {
        fetches: AtomicUsize,
    }

    impl TileSource for SolidTiles {
        fn fetch(&self, id: TileId) -> Result<RgbaImage, TileError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if id.x == 0 {
                return Err(TileError::Status(404));
            }
            Ok(RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255])))
        }
    }

    fn wait_for(loader: &mut TileLoader, expected: usize) -> Vec<TileUpdate> {
        let mut updates = Vec::new();
        for _ in 0..400 {
            updates.extend(loader.poll());
            if updates.len() >= expected {
                break;
            }
            thread::sleep(Duration::from_millis(5));
        }
        updates
    }

    #[test]
    fn tile_url_fills_template() {
        let source = OsmTileSource::new("https://tiles.example/{z}/{x}/{y}.png", "test");
        let id = TileId {
            zoom: 7,
            x: 101,
            y: 66,
        };
        assert_eq!(source.tile_url(id), "https://tiles.example/7/101/66.png");
    }

    #[test]
    fn duplicate_requests_fetch_once() {
        let source = Arc::new(SolidTiles {
            fetches: AtomicUsize::new(0),
        });
        let mut loader = TileLoader::new(source.clone());
        let id = TileId { zoom: 3, x: 1, y: 2 };

        assert!(loader.request(id));
        assert!(!loader.request(id));
        let updates = wait_for(&mut loader, 1);

        assert_eq!(updates.len(), 1);
        assert!(updates[0].result.is_ok());
        assert!(!loader.request(id));
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(!loader.is_busy());
    }

    #[test]
    fn failures_are_reported_not_retried() {
        let source = Arc::new(SolidTiles {
            fetches: AtomicUsize::new(0),
        });
        let mut loader = TileLoader::new(source.clone());
        let id = TileId { zoom: 3, x: 0, y: 0 };

        loader.request(id);
        let updates = wait_for(&mut loader, 1);

        assert!(matches!(updates[0].result, Err(TileError::Status(404))));
        assert!(!loader.request(id));
    }

    #[test]
    fn retain_forgets_finished_tiles_outside_keep_set() {
        let source = Arc::new(SolidTiles {
            fetches: AtomicUsize::new(0),
        });
        let mut loader = TileLoader::new(source.clone());
        let near = TileId { zoom: 7, x: 101, y: 66 };
        let far = TileId { zoom: 7, x: 20, y: 30 };
        loader.request(near);
        loader.request(far);
        wait_for(&mut loader, 2);

        loader.retain(|id| *id == near);

        assert_eq!(loader.requested_count(), 1);
        assert!(!loader.request(near));
        assert!(loader.request(far));
        wait_for(&mut loader, 1);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 3);
    }
}
