pub mod aggregate;
pub mod config;
pub mod error;
pub mod ingest;
pub mod pipeline;
pub mod report;

pub use aggregate::{rank::RankedList, ratio::RegionResult, Aggregator, RegionAccumulator};
pub use config::Config;
pub use error::{ConfigError, PipelineError, RowError};
pub use ingest::{parse::ParsedRecord, parse::RecordParser, RawRow};
pub use pipeline::{IngestStats, Pipeline, Ranking};
