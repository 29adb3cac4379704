// src/pipeline.rs
//! Ingest → aggregate → ratio → rank, over a blocking iterator or an async stream.

use std::io;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, info, instrument, warn};

use crate::{
    aggregate::{
        rank::{rank, RankedList},
        ratio::compute_changes,
        Aggregator,
    },
    config::Config,
    error::{ConfigError, PipelineError},
    ingest::{
        parse::{RecordParser, RowOutcome},
        RawRow,
    },
};

/// Row counters collected while ingesting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows_read: u64,
    pub unparsable: u64,
    pub irrelevant: u64,
    pub ingested: u64,
    pub regions: usize,
    pub incomplete: usize,
}

/// Output of one complete run.
#[derive(Debug, Clone)]
pub struct Ranking {
    pub ranked: RankedList,
    pub stats: IngestStats,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Build a pipeline over a validated config.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Drain `rows` and rank the regions.
    ///
    /// The first `Err` item aborts the run; no partial ranking is produced.
    #[instrument(level = "info", skip_all, fields(before = self.config.before_year, after = self.config.after_year))]
    pub fn run<I>(&self, rows: I) -> Result<Ranking, PipelineError>
    where
        I: IntoIterator<Item = io::Result<RawRow>>,
    {
        let mut state = Ingestion::new(&self.config);
        for row in rows {
            state.accept(row)?;
        }
        Ok(state.finish())
    }

    /// Async variant of [`Pipeline::run`]; suspends only while awaiting the next row.
    #[instrument(level = "info", skip_all, fields(before = self.config.before_year, after = self.config.after_year))]
    pub async fn run_stream<S>(&self, mut rows: S) -> Result<Ranking, PipelineError>
    where
        S: Stream<Item = io::Result<RawRow>> + Unpin,
    {
        let mut state = Ingestion::new(&self.config);
        while let Some(row) = rows.next().await {
            state.accept(row)?;
        }
        Ok(state.finish())
    }
}

/// Mutable state of a single run, shared by the sync and async drivers.
struct Ingestion {
    parser: RecordParser,
    aggregator: Aggregator,
    stats: IngestStats,
}

impl Ingestion {
    fn new(config: &Config) -> Self {
        Self {
            parser: RecordParser::new(config),
            aggregator: Aggregator::new(config.before_year, config.after_year),
            stats: IngestStats::default(),
        }
    }

    fn accept(&mut self, row: io::Result<RawRow>) -> Result<(), PipelineError> {
        let row = row.map_err(|source| {
            warn!(rows = self.stats.rows_read, error = %source, "record source failed");
            PipelineError::Source {
                row: self.stats.rows_read,
                source,
            }
        })?;
        self.stats.rows_read += 1;

        match self.parser.classify(&row) {
            RowOutcome::Relevant(record) => {
                self.aggregator.ingest(record);
                self.stats.ingested += 1;
            }
            RowOutcome::Irrelevant { .. } => self.stats.irrelevant += 1,
            RowOutcome::Unparsable(err) => {
                debug!(row = self.stats.rows_read, %err, "skipping unparsable row");
                self.stats.unparsable += 1;
            }
        }
        Ok(())
    }

    fn finish(self) -> Ranking {
        let mut stats = self.stats;
        stats.regions = self.aggregator.len();

        let results = compute_changes(self.aggregator.finalize());
        stats.incomplete = results.iter().filter(|r| !r.is_complete()).count();
        if stats.incomplete > 0 {
            warn!(
                incomplete = stats.incomplete,
                "regions missing a reference-year value; their change ratio is not meaningful"
            );
        }

        let ranked = rank(results);
        info!(
            rows = stats.rows_read,
            ingested = stats.ingested,
            irrelevant = stats.irrelevant,
            unparsable = stats.unparsable,
            regions = stats.regions,
            "ranking complete"
        );
        Ranking { ranked, stats }
    }
}
