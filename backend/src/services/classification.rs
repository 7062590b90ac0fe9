//! Density tier classification.
//!
//! A rule set is an ordered list of inclusive lower bounds, highest first. A
//! count takes the tier of the first bound it reaches; anything below every
//! bound falls to [`Tier::LOWEST`]. Boundary counts always go to the higher
//! tier.

use crate::error::{DensityError, DensityResult};
use crate::models::{ThresholdRule, Tier};

/// A rule list that has passed [`validate_rules`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdRules {
    rules: Vec<ThresholdRule>,
}

impl ThresholdRules {
    pub fn new(rules: Vec<ThresholdRule>) -> DensityResult<Self> {
        validate_rules(&rules)?;
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[ThresholdRule] {
        &self.rules
    }

    pub fn classify(&self, count: u64) -> Tier {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        self.rules
            .iter()
            .find(|rule| count >= rule.lower_bound)
            .map(|rule| rule.tier)
            .unwrap_or(Tier::LOWEST)
    }
}

/// Check that `rules` are usable.
///
/// Bounds must be non-negative and strictly descending. Tiers must not
/// increase along the list, otherwise a larger count could land in a lower
/// tier than a smaller one.
pub fn validate_rules(rules: &[ThresholdRule]) -> DensityResult<()> {
    if let Some(rule) = rules.iter().find(|r| r.lower_bound < 0) {
        return Err(DensityError::invalid_config(format!(
            "threshold lower bound must be non-negative, got {} for tier {}",
            rule.lower_bound, rule.tier
        )));
    }

    for pair in rules.windows(2) {
        let (higher, lower) = (&pair[0], &pair[1]);
        if higher.lower_bound <= lower.lower_bound {
            return Err(DensityError::invalid_config(format!(
                "threshold rules must be strictly descending by lower bound, got {} before {}",
                higher.lower_bound, lower.lower_bound
            )));
        }
        if higher.tier < lower.tier {
            return Err(DensityError::invalid_config(format!(
                "tier {} (>= {}) ranks below tier {} (>= {})",
                higher.tier, higher.lower_bound, lower.tier, lower.lower_bound
            )));
        }
    }

    Ok(())
}

/// Classify a single count against `rules`.
pub fn classify(count: u64, rules: &[ThresholdRule]) -> DensityResult<Tier> {
    validate_rules(rules)?;
    Ok(ThresholdRules {
        rules: rules.to_vec(),
    }
    .classify(count))
}
