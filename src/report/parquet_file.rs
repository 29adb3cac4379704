// src/report/parquet_file.rs
use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, UInt32Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};
use std::{
    fs::File,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::info;

use super::RankingSink;
use crate::aggregate::rank::RankedList;

/// Writes the ranking as a single-batch Parquet file.
pub struct ParquetSink {
    path: PathBuf,
}

impl ParquetSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn schema() -> Schema {
        Schema::new(vec![
            Field::new("rank", DataType::UInt32, false),
            Field::new("region", DataType::Utf8, false),
            Field::new("before", DataType::Int64, false),
            Field::new("after", DataType::Int64, false),
            Field::new("change", DataType::Float64, false),
            Field::new("complete", DataType::Boolean, false),
        ])
    }

    fn to_batch(ranking: &RankedList) -> Result<RecordBatch> {
        let rows = ranking.as_slice();
        let cols: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from_iter_values(1..=rows.len() as u32)),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.region.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.before))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.after))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.change))),
            Arc::new(BooleanArray::from(
                rows.iter().map(|r| r.is_complete()).collect::<Vec<bool>>(),
            )),
        ];
        RecordBatch::try_new(Arc::new(Self::schema()), cols).map_err(Into::into)
    }
}

impl RankingSink for ParquetSink {
    fn emit(&mut self, ranking: &RankedList) -> Result<()> {
        let batch = Self::to_batch(ranking)?;

        let file = File::create(&self.path)
            .with_context(|| format!("creating {}", self.path.display()))?;
        let props = WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        info!(path = %self.path.display(), rows = batch.num_rows(), "wrote ranking parquet");
        Ok(())
    }
}
