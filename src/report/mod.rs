// src/report/mod.rs
pub mod json;
pub mod parquet_file;

use anyhow::{Context, Result};
use std::io::Write;

use crate::aggregate::rank::RankedList;

pub use self::{json::JsonSink, parquet_file::ParquetSink};

/// Presentation collaborator: receives the finished ranking and renders it.
pub trait RankingSink {
    fn emit(&mut self, ranking: &RankedList) -> Result<()>;
}

/// One human-readable line per region, in rank order.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RankingSink for TextSink<W> {
    fn emit(&mut self, ranking: &RankedList) -> Result<()> {
        for entry in ranking {
            let marker = if entry.is_complete() { "" } else { " [incomplete]" };
            writeln!(self.out, "{}{}", entry, marker).context("writing ranking line")?;
        }
        self.out.flush().context("flushing ranking output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{rank::rank, ratio::RegionResult, RegionAccumulator};

    #[test]
    fn text_sink_writes_ranked_lines_and_flags_incomplete() {
        let ranked = rank(vec![
            RegionResult::new("Y".into(), RegionAccumulator { before: 50, after: 25 }),
            RegionResult::new("X".into(), RegionAccumulator { before: 100, after: 120 }),
            RegionResult::new("Z".into(), RegionAccumulator { before: 30, after: 0 }),
        ]);
        let mut sink = TextSink::new(Vec::new());
        sink.emit(&ranked).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(
            text,
            "X: 100 => 120 change-ratio: 1.2\n\
             Y: 50 => 25 change-ratio: 0.5\n\
             Z: 30 => 0 change-ratio: 0 [incomplete]\n"
        );
    }
}
