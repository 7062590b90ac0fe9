#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use taxi_density::config::DensityConfig;
use taxi_density::models::{Coordinate, GridConfig, ThresholdRule, Tier};
use taxi_density::services::SnapshotCache;
use taxi_density::source::{StaticTaxiSource, TaxiSnapshot};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Singapore grid: origin (1.2, 103.6), 0.01 degree cells.
pub fn singapore_grid() -> GridConfig {
    GridConfig::new(1.2, 103.6, 0.01).expect("valid grid")
}

/// HIGH >= 21, MEDIUM >= 11, LOW otherwise.
pub fn classic_rules() -> Vec<ThresholdRule> {
    vec![
        ThresholdRule::new(21, Tier::High),
        ThresholdRule::new(11, Tier::Medium),
    ]
}

/// `n` identical points at the center of cell `(row, col)` on the Singapore grid.
pub fn points_in_cell(row: i64, col: i64, n: usize) -> Vec<Coordinate> {
    let latitude = 1.2 + (row as f64 + 0.5) * 0.01;
    let longitude = 103.6 + (col as f64 + 0.5) * 0.01;
    vec![
        Coordinate {
            latitude,
            longitude
        };
        n
    ]
}

/// GeoJSON body in the upstream format for `points` (given as lat/lon).
pub fn feature_collection(points: &[Coordinate], timestamp: &str) -> String {
    let positions: Vec<[f64; 2]> = points.iter().map(|c| [c.longitude, c.latitude]).collect();
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {"type": "MultiPoint", "coordinates": positions},
            "properties": {"timestamp": timestamp, "taxi_count": points.len()}
        }]
    })
    .to_string()
}

/// Snapshot cache over a static source, returning the source for inspection.
pub fn static_cache(snapshot: TaxiSnapshot) -> (Arc<StaticTaxiSource>, SnapshotCache) {
    let source = Arc::new(StaticTaxiSource::new(snapshot));
    let cache = SnapshotCache::new(source.clone(), Duration::from_secs(60));
    (source, cache)
}

/// Default configuration pointed at the offline source.
pub fn offline_config() -> DensityConfig {
    let mut config = DensityConfig::default();
    config.source.source_type = taxi_density::source::SourceType::Static;
    config
}

/// Runs `f` with environment variables temporarily modified.
///
/// Restores variables on unwind and serializes access to process-global env
/// vars so parallel tests don't see each other's changes.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}
