//! # csvnom: Typed Record Extraction from CSV
//!
//! csvnom parses delimited CSV text and materializes each data row into a
//! strongly-typed record, matching columns to record fields by name or
//! through an explicit mapping, with optional per-field conversion applied
//! before type coercion.
//!
//! ## Features
//!
//! - **Field descriptor tables**: record types declare named, typed fields
//!   once; no per-row name discovery on the mapping path
//! - **Converter registry**: per-field raw-cell transforms applied before
//!   the typed parse
//! - **Lazy extraction**: records are pulled one at a time; row-level
//!   failures are `Err` items of the sequence, schema-level failures abort
//!   the call
//! - **Profiles**: reusable header/skip/mapping settings loaded from YAML
//! - **Dump writers**: CSV and NDJSON output driven by the same descriptors
//!
//! ## Example
//!
//! ```
//! use csvnom::{record_fields, Extractor};
//!
//! #[derive(Debug, Default)]
//! struct Customer {
//!     id: i64,
//!     name: String,
//!     address: String,
//! }
//!
//! record_fields!(Customer { "Id" => id, "Name" => name, "Address" => address });
//!
//! let csv = "Id,Name,Address\n1,Bob,\"12 Main St, Springfield\"\n";
//! let extractor = Extractor::<Customer>::new();
//! let customers: Vec<_> = extractor.extract_str(csv).unwrap().collect();
//!
//! assert_eq!(customers.len(), 1);
//! let customer = customers[0].as_ref().unwrap();
//! assert_eq!(customer.id, 1);
//! // Commas inside quoted spans are masked to hyphens before splitting.
//! assert_eq!(customer.address, "\"12 Main St- Springfield\"");
//! ```
//!
//! The quoted-comma handling is a deliberate, lossy workaround rather than
//! an RFC 4180 grammar: commas inside `"..."` spans are rewritten to
//! hyphens before the delimiter split and cannot be restored. Multi-line
//! quoted fields are not supported.

// Core modules
pub mod coerce;
pub mod convert;
pub mod record;
pub mod schema;
pub mod tokenizer;

// Mapping engine and public facade
pub mod extract;
pub mod mapper;

// Profiles and output writers
pub mod dump;
pub mod profile;

// Re-export key types
pub use coerce::{CoerceError, FromCell};
pub use convert::{ConvertFn, ConverterMap};
pub use dump::{CsvWriter, DumpError, JsonLinesWriter};
pub use extract::{ExtractError, Extractor};
pub use mapper::{Records, RowError, RowErrorKind};
pub use profile::ExtractProfile;
pub use record::{FieldSpec, FieldValue, Record};
pub use schema::{ColumnMapping, Header, PlannedField};
