//! Error types for the cohort ranking pipeline.
//!
//! Row-level problems are recoverable and never leave the ingestion loop.
//! Source failures abort the run before any ratio is computed.

use std::io;
use thiserror::Error;

/// Why a single raw row could not become a `ParsedRecord`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no field at index {index}")]
    MissingField { index: usize },

    #[error("field {index} is not an integer: {value:?}")]
    InvalidInteger { index: usize, value: String },

    #[error("region key at field {index} is empty")]
    EmptyRegion { index: usize },
}

/// Fatal failures of a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The upstream source failed before signalling completion.
    #[error("record source failed after {row} rows")]
    Source {
        row: u64,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse YAML config")]
    Parse(#[from] serde_yaml::Error),

    #[error("before_year and after_year must differ (both are {0})")]
    SameYear(i32),

    #[error("delimiter must be a single ASCII character, got {0:?}")]
    NonAsciiDelimiter(char),
}
