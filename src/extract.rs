//! Extraction facade: public entry points over file paths, byte buffers
//! and in-memory strings.
//!
//! Collapses the extraction call family into one builder. Defaults
//! reproduce the degenerate call shape: no mapping, no converters, header
//! consumed from content, skip 0.

use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::convert::{ConvertFn, ConverterMap};
use crate::mapper::{self, Records};
use crate::profile::ExtractProfile;
use crate::record::Record;
use crate::schema::{self, ColumnMapping, Header};
use crate::tokenizer;

/// Call-level extraction failure.
///
/// These abort the whole call before any record is produced. Row-level
/// failures surface as `Err` items of the record sequence instead.
#[derive(Debug)]
pub enum ExtractError {
    /// The source file could not be opened or read.
    Source { path: PathBuf, source: io::Error },
    /// No header literal was supplied and the content has no lines.
    MissingHeader,
    /// A mapped field name has no descriptor on the record type.
    FieldNotFound { record: &'static str, field: String },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Source { path, source } => {
                write!(f, "cannot read source {}: {}", path.display(), source)
            }
            ExtractError::MissingHeader => write!(f, "content has no header row"),
            ExtractError::FieldNotFound { record, field } => {
                write!(f, "record type {} has no field '{}'", record, field)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Typed CSV extractor for a record type.
///
/// # Example
///
/// ```
/// use csvnom::{record_fields, Extractor};
///
/// #[derive(Debug, Default)]
/// struct Order {
///     id: i64,
///     total: f64,
/// }
///
/// record_fields!(Order { "Id" => id, "Total" => total });
///
/// let extractor = Extractor::<Order>::new()
///     .with_converter("Total", |raw: String| raw.replace('$', ""));
/// let orders: Vec<_> = extractor
///     .extract_str("Id,Total\n1,$9.50\n2,$3.00\n")
///     .unwrap()
///     .collect();
///
/// assert_eq!(orders.len(), 2);
/// assert_eq!(orders[0].as_ref().unwrap().total, 9.5);
/// ```
pub struct Extractor<T: Record> {
    mapping: Option<ColumnMapping>,
    converters: ConverterMap,
    header: Option<String>,
    skip: usize,
    _record: PhantomData<T>,
}

impl<T: Record> Extractor<T> {
    /// Create an extractor with the default call shape.
    pub fn new() -> Self {
        Self {
            mapping: None,
            converters: ConverterMap::new(),
            header: None,
            skip: 0,
            _record: PhantomData,
        }
    }

    /// Use an explicit field-to-column mapping instead of direct name
    /// matching. An empty mapping behaves as if none was supplied.
    pub fn with_mapping(mut self, mapping: ColumnMapping) -> Self {
        self.mapping = Some(mapping);
        self
    }

    /// Register a converter applied to the field's raw cell before
    /// coercion.
    pub fn with_converter(
        mut self,
        field: impl Into<String>,
        func: impl ConvertFn + 'static,
    ) -> Self {
        self.converters.register(field, Box::new(func));
        self
    }

    /// Supply the header literal instead of consuming the first content
    /// line. An empty literal means the header comes from the content.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        let header = header.into();
        self.header = if header.is_empty() { None } else { Some(header) };
        self
    }

    /// Number of data rows to discard after header resolution, before
    /// mapping begins.
    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    /// Apply a loaded extraction profile (header literal, skip, mapping).
    pub fn with_profile(mut self, profile: &ExtractProfile) -> Self {
        if let Some(header) = &profile.header {
            self = self.with_header(header.clone());
        }
        self.skip = profile.skip;
        if let Some(mapping) = profile.mapping() {
            self.mapping = Some(mapping);
        }
        self
    }

    /// Extract records from a file.
    ///
    /// The file is read fully up front and the handle is released before
    /// any row is mapped, on success and on error alike.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<Records<'_, T>, ExtractError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ExtractError::Source {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Extracting {} records from {}", T::NAME, path.display());
        self.extract_str(&content)
    }

    /// Extract records from an in-memory byte buffer.
    ///
    /// The buffer is decoded as UTF-8 with invalid sequences replaced.
    pub fn extract_bytes(&self, data: &[u8]) -> Result<Records<'_, T>, ExtractError> {
        let content = String::from_utf8_lossy(data);
        self.extract_str(&content)
    }

    /// Extract records from CSV content already in memory.
    pub fn extract_str(&self, content: &str) -> Result<Records<'_, T>, ExtractError> {
        let rows = tokenizer::split_rows(content);
        let (header_line, data) =
            mapper::select_window(rows, self.header.as_deref(), self.skip)
                .ok_or(ExtractError::MissingHeader)?;

        let header = Header::parse(&header_line);
        let plan = schema::resolve_plan::<T>(&header, self.mapping.as_ref()).map_err(|err| {
            ExtractError::FieldNotFound {
                record: err.record,
                field: err.field,
            }
        })?;

        tracing::debug!(
            "Mapping {} data rows against {} columns",
            data.len(),
            header.len()
        );
        Ok(Records::new(data, plan, &self.converters))
    }
}

impl<T: Record> Default for Extractor<T> {
    fn default() -> Self {
        Self::new()
    }
}
