use serde::{Deserialize, Serialize};

/// Density classification of a cell. Variants are declared lowest first so the
/// derived `Ord` matches density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    /// The catch-all tier for counts below every rule.
    pub const LOWEST: Tier = Tier::Low;

    pub fn label(&self) -> &'static str {
        match self {
            Tier::Low => "Low",
            Tier::Medium => "Medium",
            Tier::High => "High",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `count >= lower_bound` puts a cell in `tier`.
///
/// Bounds are signed so that a negative bound coming from user configuration
/// can be reported instead of silently wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdRule {
    pub lower_bound: i64,
    pub tier: Tier,
}

impl ThresholdRule {
    pub fn new(lower_bound: i64, tier: Tier) -> Self {
        Self { lower_bound, tier }
    }
}
