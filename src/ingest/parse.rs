// src/ingest/parse.rs
use crate::{
    config::Config,
    error::RowError,
    ingest::{
        utils::{clean_str, parse_int},
        RawRow,
    },
};

/// A typed row: one region's cohort population in one year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    pub year: i32,
    pub region: String,
    pub population: i64,
}

/// What the parser decided about one raw row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Year is a reference year; ready for the aggregator.
    Relevant(ParsedRecord),
    /// Parsed fine but the year is outside the comparison.
    Irrelevant { year: i32 },
    Unparsable(RowError),
}

/// Stateless field extractor driven by the configured column positions.
#[derive(Debug, Clone)]
pub struct RecordParser {
    year_field: usize,
    region_field: usize,
    cohort_field: usize,
    before_year: i32,
    after_year: i32,
}

impl RecordParser {
    pub fn new(config: &Config) -> Self {
        Self {
            year_field: config.year_field,
            region_field: config.region_field,
            cohort_field: config.cohort_field,
            before_year: config.before_year,
            after_year: config.after_year,
        }
    }

    /// Extract `{year, region, population}` from `row`.
    pub fn parse(&self, row: &RawRow) -> Result<ParsedRecord, RowError> {
        let year = self.int_field(row, self.year_field)?;

        let region_raw = field(row, self.region_field)?;
        let region = clean_str(region_raw);
        if region.is_empty() {
            return Err(RowError::EmptyRegion {
                index: self.region_field,
            });
        }

        let population = self.int_field(row, self.cohort_field)?;

        Ok(ParsedRecord {
            year,
            region: region.to_string(),
            population,
        })
    }

    /// Parse and apply the reference-year filter in one step.
    pub fn classify(&self, row: &RawRow) -> RowOutcome {
        match self.parse(row) {
            Ok(rec) if rec.year == self.before_year || rec.year == self.after_year => {
                RowOutcome::Relevant(rec)
            }
            Ok(rec) => RowOutcome::Irrelevant { year: rec.year },
            Err(e) => RowOutcome::Unparsable(e),
        }
    }

    fn int_field<T: std::str::FromStr>(&self, row: &RawRow, index: usize) -> Result<T, RowError> {
        let raw = field(row, index)?;
        parse_int(raw).ok_or_else(|| RowError::InvalidInteger {
            index,
            value: raw.to_string(),
        })
    }
}

fn field(row: &RawRow, index: usize) -> Result<&str, RowError> {
    row.field(index).ok_or(RowError::MissingField { index })
}
