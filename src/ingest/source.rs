// src/ingest/source.rs
//! Lazy row sources: a blocking CSV iterator and an async line stream.
//!
//! Both split the same way: one row per line, fields on every delimiter
//! with no quote handling, bytes decoded lossily. Only real read failures
//! become `Err` items.

use csv::{ReaderBuilder, Terminator};
use std::{io, path::Path};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_stream::{wrappers::SplitStream, Stream, StreamExt};

use crate::{config::Config, error::ConfigError, ingest::RawRow};

/// Pull rows from any reader through the `csv` crate.
///
/// No header handling: a header line is just a row whose year fails to parse.
/// Records with differing field counts are accepted. Fails only when the
/// configured delimiter cannot be used as a single byte.
pub fn csv_rows<R: io::Read>(
    reader: R,
    config: &Config,
) -> Result<impl Iterator<Item = io::Result<RawRow>>, ConfigError> {
    let rows = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .delimiter(config.delimiter_byte()?)
        .from_reader(reader)
        .into_byte_records()
        .filter_map(|res| match res {
            Ok(record) => {
                let row = RawRow::from(record);
                (!row.is_blank()).then_some(Ok(row))
            }
            Err(e) => Some(Err(csv_to_io(e))),
        });
    Ok(rows)
}

fn csv_to_io(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => e,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    }
}

/// Async line-by-line source; each `.next().await` is a suspension point.
pub fn line_stream<R>(
    reader: R,
    delimiter: char,
) -> impl Stream<Item = io::Result<RawRow>> + Unpin
where
    R: AsyncBufRead + Unpin,
{
    SplitStream::new(reader.split(b'\n')).filter_map(move |segment| match segment {
        Ok(bytes) => {
            let row = RawRow::split(&String::from_utf8_lossy(&bytes), delimiter);
            (!row.is_blank()).then_some(Ok(row))
        }
        Err(e) => Some(Err(e)),
    })
}

/// Open `path` with tokio and stream its rows.
pub async fn open_file_stream<P: AsRef<Path>>(
    path: P,
    delimiter: char,
) -> io::Result<impl Stream<Item = io::Result<RawRow>> + Unpin> {
    let file = tokio::fs::File::open(path).await?;
    Ok(line_stream(BufReader::new(file), delimiter))
}
