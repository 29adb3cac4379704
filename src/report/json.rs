use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use super::RankingSink;
use crate::aggregate::rank::RankedList;

#[derive(Serialize)]
struct JsonEntry<'a> {
    rank: usize,
    region: &'a str,
    before: i64,
    after: i64,
    /// Non-finite ratios serialize as `null`.
    change: f64,
    complete: bool,
}

/// Pretty-printed JSON array, one object per ranked region.
pub struct JsonSink<W: Write> {
    out: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RankingSink for JsonSink<W> {
    fn emit(&mut self, ranking: &RankedList) -> Result<()> {
        let entries: Vec<JsonEntry<'_>> = ranking
            .iter()
            .enumerate()
            .map(|(i, r)| JsonEntry {
                rank: i + 1,
                region: &r.region,
                before: r.before,
                after: r.after,
                change: r.change,
                complete: r.is_complete(),
            })
            .collect();

        serde_json::to_writer_pretty(&mut self.out, &entries).context("serializing ranking JSON")?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}
