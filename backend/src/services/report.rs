//! Report assembly: aggregate, classify, flag.

use log::debug;

use super::aggregation::aggregate;
use super::classification::ThresholdRules;
use crate::error::DensityResult;
use crate::models::{AggregationReport, CellDensity, Coordinate, GridConfig, ThresholdRule, TierCounts};

/// Build the density report for one snapshot of points.
///
/// Rules and grid are validated before any point is looked at, so a bad
/// configuration is reported even for an empty snapshot. A cell is
/// highlighted when its count is strictly greater than `highlight_threshold`,
/// regardless of its tier.
pub fn build_report(
    coordinates: &[Coordinate],
    grid: &GridConfig,
    rules: &[ThresholdRule],
    highlight_threshold: u64,
) -> DensityResult<AggregationReport> {
    let rules = ThresholdRules::new(rules.to_vec())?;
    let counts = aggregate(coordinates, grid)?;

    let mut cells = Vec::with_capacity(counts.len());
    let mut highlighted = Vec::new();
    let mut tier_counts = TierCounts::default();
    let mut max_count = 0;
    let mut total_points = 0usize;

    for (cell, count) in counts {
        let density = CellDensity {
            cell,
            count,
            tier: rules.classify(count),
        };
        tier_counts.record(density.tier);
        max_count = max_count.max(count);
        total_points += count as usize;
        if count > highlight_threshold {
            highlighted.push(density);
        }
        cells.push(density);
    }

    debug_assert_eq!(total_points, coordinates.len());
    debug!(
        "Report: {} points, {} cells, {} highlighted (> {})",
        total_points,
        cells.len(),
        highlighted.len(),
        highlight_threshold
    );

    Ok(AggregationReport {
        total_points,
        cells,
        highlighted,
        highlight_threshold,
        max_count,
        tier_counts,
    })
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod report_tests;
