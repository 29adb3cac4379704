// src/aggregate/mod.rs
pub mod rank;
pub mod ratio;

use std::collections::HashMap;
use tracing::trace;

use crate::ingest::parse::ParsedRecord;

/// Running before/after cohort values for one region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionAccumulator {
    pub before: i64,
    pub after: i64,
}

/// Per-region accumulation over a single pass of input.
///
/// The map is owned by one aggregator, so separate runs never share state.
#[derive(Debug)]
pub struct Aggregator {
    before_year: i32,
    after_year: i32,
    regions: HashMap<String, RegionAccumulator>,
}

impl Aggregator {
    pub fn new(before_year: i32, after_year: i32) -> Self {
        Self {
            before_year,
            after_year,
            regions: HashMap::new(),
        }
    }

    /// Record one row's population. A later row for the same region and
    /// year replaces the earlier value.
    ///
    /// Returns `false` (and touches nothing) when the year is neither
    /// reference year.
    pub fn ingest(&mut self, record: ParsedRecord) -> bool {
        let is_before = record.year == self.before_year;
        let is_after = record.year == self.after_year;
        if !is_before && !is_after {
            return false;
        }

        let acc = self.regions.entry(record.region).or_default();
        if is_before {
            acc.before = record.population;
        }
        if is_after {
            acc.after = record.population;
        }
        trace!(year = record.year, ?acc, "ingested");
        true
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, region: &str) -> Option<&RegionAccumulator> {
        self.regions.get(region)
    }

    /// Close the ingestion phase and hand over the accumulated map.
    pub fn finalize(self) -> HashMap<String, RegionAccumulator> {
        self.regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(year: i32, region: &str, population: i64) -> ParsedRecord {
        ParsedRecord {
            year,
            region: region.to_string(),
            population,
        }
    }

    #[test]
    fn sets_before_and_after_independently() {
        let mut agg = Aggregator::new(2016, 2021);
        assert!(agg.ingest(rec(2021, "A", 150)));
        assert!(agg.ingest(rec(2016, "A", 100)));
        assert_eq!(
            agg.get("A"),
            Some(&RegionAccumulator {
                before: 100,
                after: 150
            })
        );
    }

    #[test]
    fn other_years_leave_state_untouched() {
        let mut agg = Aggregator::new(2016, 2021);
        agg.ingest(rec(2016, "A", 1));
        assert!(!agg.ingest(rec(2019, "A", 999)));
        assert!(!agg.ingest(rec(2018, "B", 5)));
        assert_eq!(agg.len(), 1);
        assert_eq!(agg.get("A"), Some(&RegionAccumulator { before: 1, after: 0 }));
        assert!(agg.get("B").is_none());
    }

    #[test]
    fn later_record_overwrites_earlier() {
        let mut agg = Aggregator::new(2016, 2021);
        agg.ingest(rec(2016, "A", 100));
        agg.ingest(rec(2016, "A", 300));
        agg.ingest(rec(2021, "A", 10));
        agg.ingest(rec(2021, "A", 20));
        assert_eq!(
            agg.finalize()["A"],
            RegionAccumulator {
                before: 300,
                after: 20
            }
        );
    }

    #[test]
    fn regions_are_independent_of_each_other() {
        let a_only = {
            let mut agg = Aggregator::new(2016, 2021);
            agg.ingest(rec(2016, "A", 7));
            agg.ingest(rec(2021, "A", 9));
            agg.finalize()["A"]
        };
        let interleaved = {
            let mut agg = Aggregator::new(2016, 2021);
            agg.ingest(rec(2021, "B", 1));
            agg.ingest(rec(2016, "A", 7));
            agg.ingest(rec(2016, "B", 2));
            agg.ingest(rec(2021, "A", 9));
            agg.ingest(rec(2021, "B", 3));
            agg.finalize()["A"]
        };
        assert_eq!(a_only, interleaved);
    }

    #[test]
    fn single_year_region_keeps_zero() {
        let mut agg = Aggregator::new(2016, 2021);
        agg.ingest(rec(2021, "New", 40));
        let map = agg.finalize();
        assert_eq!(map["New"], RegionAccumulator { before: 0, after: 40 });
    }
}
