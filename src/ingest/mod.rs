// src/ingest/mod.rs
pub mod parse;
pub mod source;
pub mod utils;

/// One input line split into positional text fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<String>,
}

impl RawRow {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// Split `line` on `delimiter`, without any quote handling.
    pub fn split(line: &str, delimiter: char) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        Self {
            fields: line.split(delimiter).map(str::to_string).collect(),
        }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// An empty line: exactly one field with no text.
    pub fn is_blank(&self) -> bool {
        matches!(self.fields.as_slice(), [only] if only.is_empty())
    }
}

impl From<csv::ByteRecord> for RawRow {
    /// Lossy UTF-8 per field; a trailing `\r` is dropped as in [`RawRow::split`].
    fn from(record: csv::ByteRecord) -> Self {
        let mut fields: Vec<String> = record
            .iter()
            .map(|f| String::from_utf8_lossy(f).into_owned())
            .collect();
        if let Some(last) = fields.last_mut() {
            let kept = last.trim_end_matches('\r').len();
            last.truncate(kept);
        }
        Self { fields }
    }
}
