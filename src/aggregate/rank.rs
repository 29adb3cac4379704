// src/aggregate/rank.rs
use std::cmp::Ordering;

use super::ratio::RegionResult;

/// Descending by `change`; NaN after every number; ties by region key.
///
/// `+inf` ranks above all finite values. Two NaNs (or two equal values,
/// infinities included) fall back to ascending region key, so the order
/// never depends on input or hash order.
pub fn compare_change(a: &RegionResult, b: &RegionResult) -> Ordering {
    let by_change = match (a.change.is_nan(), b.change.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.change.partial_cmp(&a.change).unwrap_or(Ordering::Equal),
    };
    by_change.then_with(|| a.region.cmp(&b.region))
}

/// Regions in final rank order. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
    entries: Vec<RegionResult>,
}

impl RankedList {
    pub fn iter(&self) -> std::slice::Iter<'_, RegionResult> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[RegionResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a RegionResult;
    type IntoIter = std::slice::Iter<'a, RegionResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Sort every result into rank order; no truncation.
pub fn rank(mut results: Vec<RegionResult>) -> RankedList {
    results.sort_by(compare_change);
    RankedList { entries: results }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(region: &str, change: f64) -> RegionResult {
        RegionResult {
            region: region.to_string(),
            before: 0,
            after: 0,
            change,
        }
    }

    fn order(list: &RankedList) -> Vec<&str> {
        list.iter().map(|r| r.region.as_str()).collect()
    }

    #[test]
    fn sorts_descending_by_change() {
        let ranked = rank(vec![res("B", 0.5), res("A", 2.0), res("C", 1.0)]);
        assert_eq!(order(&ranked), ["A", "C", "B"]);
    }

    #[test]
    fn infinity_first_nan_last() {
        let ranked = rank(vec![
            res("nan", f64::NAN),
            res("low", 0.0),
            res("inf", f64::INFINITY),
            res("mid", 1.1),
        ]);
        assert_eq!(order(&ranked), ["inf", "mid", "low", "nan"]);
    }

    #[test]
    fn ties_break_by_region_key() {
        let ranked = rank(vec![
            res("Yamagata", 1.0),
            res("Akita", 1.0),
            res("zz", f64::NAN),
            res("aa", f64::NAN),
            res("Q", f64::INFINITY),
            res("P", f64::INFINITY),
        ]);
        assert_eq!(order(&ranked), ["P", "Q", "Akita", "Yamagata", "aa", "zz"]);
    }

    #[test]
    fn order_is_independent_of_input_order() {
        let a = rank(vec![res("X", 1.0), res("Y", 1.0), res("Z", 3.0)]);
        let b = rank(vec![res("Z", 3.0), res("Y", 1.0), res("X", 1.0)]);
        assert_eq!(order(&a), order(&b));
    }

    #[test]
    fn empty_input_ranks_empty() {
        assert!(rank(Vec::new()).is_empty());
    }
}
