//! Map overlay description for a density report.
//!
//! This is the rendering side of the dashboard: it does not draw anything, it
//! describes one rectangle per occupied cell (colored by tier), one marker per
//! highlighted cell and a legend, and leaves drawing to the frontend map widget.
//! Different dashboard variants pick a different [`OverlayStyle`] over the same
//! report.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{AggregationReport, CellBounds, CellId, Coordinate, GridConfig, ThresholdRule, Tier};

/// Which layers to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayStyle {
    /// Tier-colored rectangles plus markers on highlighted cells
    #[default]
    RectanglesAndMarkers,
    /// Tier-colored rectangles only
    RectanglesOnly,
}

impl FromStr for OverlayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rectangles_and_markers" | "full" => Ok(Self::RectanglesAndMarkers),
            "rectangles_only" | "rectangles" => Ok(Self::RectanglesOnly),
            _ => Err(format!("Unknown overlay style: {}", s)),
        }
    }
}

/// Color per tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPalette {
    #[serde(default = "default_low_color")]
    pub low: String,
    #[serde(default = "default_medium_color")]
    pub medium: String,
    #[serde(default = "default_high_color")]
    pub high: String,
}

fn default_low_color() -> String {
    "green".to_string()
}

fn default_medium_color() -> String {
    "orange".to_string()
}

fn default_high_color() -> String {
    "red".to_string()
}

impl Default for TierPalette {
    fn default() -> Self {
        Self {
            low: default_low_color(),
            medium: default_medium_color(),
            high: default_high_color(),
        }
    }
}

impl TierPalette {
    pub fn color(&self, tier: Tier) -> &str {
        match tier {
            Tier::Low => &self.low,
            Tier::Medium => &self.medium,
            Tier::High => &self.high,
        }
    }
}

/// Rendering options chosen by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayOptions {
    pub style: OverlayStyle,
    pub palette: TierPalette,
    /// Initial map center
    pub center: Coordinate,
}

/// Default map center (central Singapore).
pub const DEFAULT_MAP_CENTER: Coordinate = Coordinate {
    latitude: 1.3521,
    longitude: 103.8198,
};

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            style: OverlayStyle::default(),
            palette: TierPalette::default(),
            center: DEFAULT_MAP_CENTER,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRectangle {
    pub cell: CellId,
    pub bounds: CellBounds,
    pub tier: Tier,
    pub count: u64,
    pub color: String,
    pub popup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellMarker {
    pub cell: CellId,
    pub position: Coordinate,
    pub count: u64,
    pub tooltip: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub tier: Tier,
    pub color: String,
    pub label: String,
}

/// Everything a map widget needs to draw one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapOverlay {
    pub style: OverlayStyle,
    pub center: Coordinate,
    pub cell_size: f64,
    pub rectangles: Vec<CellRectangle>,
    pub markers: Vec<CellMarker>,
    pub legend: Vec<LegendEntry>,
}

/// Describe `report` as map layers.
pub fn build_overlay(
    report: &AggregationReport,
    grid: &GridConfig,
    rules: &[ThresholdRule],
    options: &OverlayOptions,
) -> MapOverlay {
    let rectangles = report
        .cells
        .iter()
        .map(|c| CellRectangle {
            cell: c.cell,
            bounds: c.cell.bounds(grid),
            tier: c.tier,
            count: c.count,
            color: options.palette.color(c.tier).to_string(),
            popup: format!("Taxis: {}", c.count),
        })
        .collect();

    let markers = match options.style {
        OverlayStyle::RectanglesAndMarkers => report
            .highlighted
            .iter()
            .map(|c| {
                let (latitude, longitude) = c.cell.center(grid);
                CellMarker {
                    cell: c.cell,
                    position: Coordinate {
                        latitude,
                        longitude,
                    },
                    count: c.count,
                    tooltip: format!("High Density: {} taxis", c.count),
                }
            })
            .collect(),
        OverlayStyle::RectanglesOnly => Vec::new(),
    };

    MapOverlay {
        style: options.style,
        center: options.center,
        cell_size: grid.cell_size,
        rectangles,
        markers,
        legend: build_legend(rules, &options.palette),
    }
}

/// Legend entries, highest tier first, with count ranges derived from `rules`.
///
/// `rules` are expected to be validated (strictly descending bounds).
pub fn build_legend(rules: &[ThresholdRule], palette: &TierPalette) -> Vec<LegendEntry> {
    let mut legend = Vec::with_capacity(rules.len() + 1);
    let mut upper: Option<i64> = None;

    for rule in rules {
        let range = match upper {
            None => format!(">= {} taxis", rule.lower_bound),
            Some(next) if next - 1 == rule.lower_bound => format!("{} taxis", rule.lower_bound),
            Some(next) => format!("{}-{} taxis", rule.lower_bound, next - 1),
        };
        legend.push(LegendEntry {
            tier: rule.tier,
            color: palette.color(rule.tier).to_string(),
            label: format!("{} density ({})", rule.tier, range),
        });
        upper = Some(rule.lower_bound);
    }

    let catch_all = match upper {
        None => Some("all cells".to_string()),
        Some(0) => None,
        Some(bound) => Some(format!("< {} taxis", bound)),
    };
    if let Some(range) = catch_all {
        legend.push(LegendEntry {
            tier: Tier::LOWEST,
            color: palette.color(Tier::LOWEST).to_string(),
            label: format!("{} density ({})", Tier::LOWEST, range),
        });
    }

    legend
}
