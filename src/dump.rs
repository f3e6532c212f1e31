//! Writers for extracted records: CSV lines and NDJSON.
//!
//! Both writers drive the record's field descriptor table rather than
//! serde, so output follows the declared field names and order exactly.

use serde_json::{Map, Value};
use std::io::Write;

use crate::record::{FieldSpec, FieldValue, Record};
use crate::tokenizer::DELIMITER;

/// Error type for dump operations
#[derive(Debug)]
pub enum DumpError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for DumpError {
    fn from(err: serde_json::Error) -> Self {
        DumpError::JsonError(err)
    }
}

impl From<std::io::Error> for DumpError {
    fn from(err: std::io::Error) -> Self {
        DumpError::IoError(err)
    }
}

impl std::fmt::Display for DumpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DumpError::JsonError(e) => write!(f, "JSON error: {}", e),
            DumpError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for DumpError {}

/// Format one cell for CSV output.
///
/// A value containing the delimiter is wrapped in double quotes; reading
/// such output back goes through the lossy quoted-comma masking, so
/// comma-bearing values do not round-trip.
fn format_cell(value: &FieldValue) -> String {
    let text = value.to_string();
    if text.contains(DELIMITER) {
        format!("\"{}\"", text)
    } else {
        text
    }
}

/// CSV writer driven by field descriptors.
///
/// Writes the header line up front, then one line per record with values
/// in column order. Columns with no matching field are left empty.
pub struct CsvWriter<W: Write, T: Record> {
    writer: W,
    columns: Vec<String>,
    fields: Vec<FieldSpec<T>>,
}

impl<W: Write, T: Record> CsvWriter<W, T> {
    /// Create a writer using the record type's own field table as the
    /// column order, and write the header line.
    pub fn new(writer: W) -> Result<Self, DumpError> {
        let columns = T::fields()
            .iter()
            .map(|spec| spec.name.to_string())
            .collect();
        Self::with_columns(writer, columns)
    }

    /// Create a writer with an explicit column order and write the header
    /// line. Column names are matched to fields case-insensitively.
    pub fn with_columns(mut writer: W, columns: Vec<String>) -> Result<Self, DumpError> {
        writeln!(writer, "{}", columns.join(","))?;
        Ok(Self {
            writer,
            columns,
            fields: T::fields(),
        })
    }

    /// Write a single record as one CSV line.
    pub fn write(&mut self, record: &T) -> Result<(), DumpError> {
        let line = self
            .columns
            .iter()
            .map(|column| {
                self.fields
                    .iter()
                    .find(|spec| spec.name.eq_ignore_ascii_case(column))
                    .map(|spec| format_cell(&(spec.get)(record)))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(",");
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    /// Write multiple records
    pub fn write_all(&mut self, records: &[T]) -> Result<(), DumpError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), DumpError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// NDJSON writer: one JSON object per record per line, keyed by field
/// name.
pub struct JsonLinesWriter<W: Write, T: Record> {
    writer: W,
    fields: Vec<FieldSpec<T>>,
}

impl<W: Write, T: Record> JsonLinesWriter<W, T> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            fields: T::fields(),
        }
    }

    /// Write a single record as one NDJSON line.
    pub fn write(&mut self, record: &T) -> Result<(), DumpError> {
        let mut object = Map::new();
        for spec in &self.fields {
            object.insert(
                spec.name.to_string(),
                serde_json::to_value((spec.get)(record))?,
            );
        }
        let json = serde_json::to_string(&Value::Object(object))?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Write multiple records
    pub fn write_all(&mut self, records: &[T]) -> Result<(), DumpError> {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), DumpError> {
        self.writer.flush()?;
        Ok(())
    }
}
