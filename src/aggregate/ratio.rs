// src/aggregate/ratio.rs
use serde::Serialize;
use std::{collections::HashMap, fmt};

use super::RegionAccumulator;

/// A region's before/after values with the derived change ratio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionResult {
    pub region: String,
    pub before: i64,
    pub after: i64,
    /// `after / before` as raw IEEE-754 division: `+inf` when only `before`
    /// is zero, `NaN` when both are.
    pub change: f64,
}

impl RegionResult {
    pub fn new(region: String, acc: RegionAccumulator) -> Self {
        Self {
            region,
            before: acc.before,
            after: acc.after,
            change: acc.after as f64 / acc.before as f64,
        }
    }

    /// False when either reference year contributed no (or a zero) value.
    pub fn is_complete(&self) -> bool {
        self.before != 0 && self.after != 0
    }
}

impl fmt::Display for RegionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} => {} change-ratio: {}",
            self.region, self.before, self.after, self.change
        )
    }
}

/// Derive a `RegionResult` for every accumulated region. Nothing is dropped.
pub fn compute_changes(regions: HashMap<String, RegionAccumulator>) -> Vec<RegionResult> {
    regions
        .into_iter()
        .map(|(region, acc)| RegionResult::new(region, acc))
        .collect()
}
