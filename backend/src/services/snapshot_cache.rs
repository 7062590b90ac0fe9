//! Time-to-live cache in front of a [`TaxiSource`].
//!
//! Successful fetches are kept for `ttl`; failures are never cached. Refreshes
//! are serialized so a burst of requests after expiry hits the upstream once.

use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::source::{SourceError, TaxiSnapshot, TaxiSource};

/// Default lifetime of a cached snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(90);

/// A snapshot together with when and how it was obtained.
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: Arc<TaxiSnapshot>,
    pub fetched_at: chrono::DateTime<chrono::Utc>,
    /// `true` when served without contacting the source
    pub from_cache: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    snapshot: Arc<TaxiSnapshot>,
    fetched_at: chrono::DateTime<chrono::Utc>,
    loaded: Instant,
}

/// Shared snapshot cache.
#[derive(Clone)]
pub struct SnapshotCache {
    source: Arc<dyn TaxiSource>,
    ttl: Duration,
    entry: Arc<RwLock<Option<Entry>>>,
    refresh: Arc<tokio::sync::Mutex<()>>,
}

impl SnapshotCache {
    /// Create a cache over `source`.
    pub fn new(source: Arc<dyn TaxiSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entry: Arc::new(RwLock::new(None)),
            refresh: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Return the cached snapshot if still fresh, else fetch a new one.
    pub async fn get(&self) -> Result<CachedSnapshot, SourceError> {
        if let Some(cached) = self.fresh() {
            return Ok(cached);
        }

        let _guard = self.refresh.lock().await;
        // Someone else may have refreshed while we waited
        if let Some(cached) = self.fresh() {
            return Ok(cached);
        }
        self.fetch_and_store().await
    }

    /// Drop the cached entry and fetch immediately.
    pub async fn refresh(&self) -> Result<CachedSnapshot, SourceError> {
        let _guard = self.refresh.lock().await;
        self.invalidate();
        self.fetch_and_store().await
    }

    /// Forget the cached entry.
    pub fn invalidate(&self) {
        self.entry.write().take();
    }

    fn fresh(&self) -> Option<CachedSnapshot> {
        let entry = self.entry.read();
        entry
            .as_ref()
            .filter(|e| e.loaded.elapsed() < self.ttl)
            .map(|e| CachedSnapshot {
                snapshot: Arc::clone(&e.snapshot),
                fetched_at: e.fetched_at,
                from_cache: true,
            })
    }

    async fn fetch_and_store(&self) -> Result<CachedSnapshot, SourceError> {
        let snapshot = match self.source.fetch().await {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!("Snapshot fetch from {} failed: {}", self.source.name(), e);
                return Err(e);
            }
        };

        let entry = Entry {
            snapshot,
            fetched_at: chrono::Utc::now(),
            loaded: Instant::now(),
        };
        debug!(
            "Cached snapshot with {} points from {}",
            entry.snapshot.coordinates.len(),
            self.source.name()
        );
        *self.entry.write() = Some(entry.clone());

        Ok(CachedSnapshot {
            snapshot: entry.snapshot,
            fetched_at: entry.fetched_at,
            from_cache: false,
        })
    }
}
