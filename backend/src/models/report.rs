use serde::{Deserialize, Serialize};

use super::grid::CellId;
use super::tier::Tier;

/// One occupied cell with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDensity {
    pub cell: CellId,
    pub count: u64,
    pub tier: Tier,
}

/// Number of cells in each tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    pub(crate) fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Low => self.low += 1,
            Tier::Medium => self.medium += 1,
            Tier::High => self.high += 1,
        }
    }
}

/// Output of one aggregation pass.
///
/// `cells` and `highlighted` are both in ascending `(row, col)` order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationReport {
    pub total_points: usize,
    pub cells: Vec<CellDensity>,
    /// Cells whose count is strictly greater than `highlight_threshold`
    pub highlighted: Vec<CellDensity>,
    pub highlight_threshold: u64,
    /// Largest cell count, 0 when there are no cells
    pub max_count: u64,
    pub tier_counts: TierCounts,
}

impl AggregationReport {
    pub fn empty(highlight_threshold: u64) -> Self {
        Self {
            total_points: 0,
            cells: Vec::new(),
            highlighted: Vec::new(),
            highlight_threshold,
            max_count: 0,
            tier_counts: TierCounts::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, id: CellId) -> Option<&CellDensity> {
        self.cells
            .binary_search_by(|c| c.cell.cmp(&id))
            .ok()
            .map(|idx| &self.cells[idx])
    }
}
