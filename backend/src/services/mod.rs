//! Service layer.
//!
//! The density core (`grid_index`, `aggregation`, `classification`, `report`)
//! is pure and synchronous. `snapshot_cache`, `overlay` and `dashboard` wrap
//! it with fetching, caching and map-layer description for the HTTP layer.

pub mod aggregation;

pub mod classification;

pub mod dashboard;

pub mod grid_index;

pub mod overlay;

pub mod report;

pub mod snapshot_cache;

pub use aggregation::{aggregate, CellCount};
pub use classification::{classify, validate_rules, ThresholdRules};
pub use dashboard::{
    get_density_view, get_overlay_view, refresh_density_view, DensityView, OverlayView, RefreshError,
};
pub use grid_index::cell_of;
pub use overlay::{build_overlay, MapOverlay, OverlayOptions, OverlayStyle, TierPalette};
pub use report::build_report;
pub use snapshot_cache::{CachedSnapshot, SnapshotCache};
