//! Fixed in-memory source.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{SourceError, TaxiSnapshot, TaxiSource};

/// Returns the same snapshot (or the same failure) on every fetch.
///
/// The payload can be swapped at runtime, and the number of fetches is
/// recorded so cache behaviour can be observed in tests.
#[derive(Debug)]
pub struct StaticTaxiSource {
    outcome: RwLock<Result<TaxiSnapshot, String>>,
    fetches: AtomicUsize,
}

impl StaticTaxiSource {
    pub fn new(snapshot: TaxiSnapshot) -> Self {
        Self {
            outcome: RwLock::new(Ok(snapshot)),
            fetches: AtomicUsize::new(0),
        }
    }

    /// A source that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: RwLock::new(Err(message.into())),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(TaxiSnapshot::empty())
    }

    pub fn set_snapshot(&self, snapshot: TaxiSnapshot) {
        *self.outcome.write() = Ok(snapshot);
    }

    pub fn set_failure(&self, message: impl Into<String>) {
        *self.outcome.write() = Err(message.into());
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl Default for StaticTaxiSource {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl TaxiSource for StaticTaxiSource {
    async fn fetch(&self) -> Result<TaxiSnapshot, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.outcome
            .read()
            .clone()
            .map_err(SourceError::Unavailable)
    }

    fn name(&self) -> &str {
        "static"
    }
}
