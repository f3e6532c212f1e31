//! Schema resolution: header columns to record fields.
//!
//! Builds the field-to-column plan once per header, either by direct name
//! matching or through an explicit field-to-column mapping. Matching is
//! trimmed and ASCII case-insensitive on both paths, and a duplicate
//! column name resolves to its last occurrence.

use indexmap::IndexMap;
use std::fmt;

use crate::record::{FieldSpec, Record};
use crate::tokenizer::DELIMITER;

/// Ordered header column names for a CSV block.
///
/// Order is significant: it defines the positional index-to-name
/// correspondence for raw cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Parse a header line.
    ///
    /// Splits on the delimiter, drops empty entries and trims each name,
    /// so `"Id, Name,,Address"` produces three columns.
    pub fn parse(line: &str) -> Self {
        let columns = line
            .split(DELIMITER)
            .filter(|name| !name.is_empty())
            .map(|name| name.trim().to_string())
            .collect();
        Self { columns }
    }

    /// Index of the LAST column matching `name`, case-insensitive.
    ///
    /// Duplicate column names deliberately resolve to the last occurrence.
    pub fn last_index_of(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns
            .iter()
            .rposition(|column| column.eq_ignore_ascii_case(wanted))
    }

    /// Column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Explicit field-name to column-name mapping.
///
/// Insertion-ordered; during mapping only the mapped fields are assigned,
/// unmapped fields keep their `Default` values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMapping {
    entries: IndexMap<String, String>,
}

impl ColumnMapping {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Builder-style insert.
    ///
    /// # Example
    ///
    /// ```
    /// use csvnom::ColumnMapping;
    ///
    /// let mapping = ColumnMapping::new()
    ///     .with("Id", "customer id")
    ///     .with("Name", "full name");
    /// assert_eq!(mapping.len(), 2);
    /// ```
    pub fn with(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.entries.insert(field.into(), column.into());
        self
    }

    /// Map a field name to a column name.
    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.entries.insert(field.into(), column.into());
    }

    /// Iterate `(field, column)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<IndexMap<String, String>> for ColumnMapping {
    fn from(entries: IndexMap<String, String>) -> Self {
        Self { entries }
    }
}

/// One entry of the resolution plan: a field descriptor plus its resolved
/// column index.
#[derive(Debug)]
pub struct PlannedField<T> {
    pub spec: FieldSpec<T>,
    /// Column index in the header, or `None` when no column matched.
    pub column: Option<usize>,
}

/// Error raised when a mapped field name has no descriptor on the record
/// type. Schema-level: fatal per call, not per row.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownField {
    pub record: &'static str,
    pub field: String,
}

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record type {} has no field '{}'", self.record, self.field)
    }
}

impl std::error::Error for UnknownField {}

/// Build the field-to-column plan for a header.
///
/// With an explicit non-empty mapping the plan covers exactly the mapped
/// fields, with each mapped column name trimmed and matched
/// case-insensitively. Without one, every descriptor field is matched
/// directly against the columns by name.
///
/// A column miss stays in the plan as `column: None` and fails the row at
/// mapping time, not the call; a mapped field absent from the record type
/// fails here.
pub fn resolve_plan<T: Record>(
    header: &Header,
    mapping: Option<&ColumnMapping>,
) -> Result<Vec<PlannedField<T>>, UnknownField> {
    let fields = T::fields();

    match mapping {
        Some(mapping) if !mapping.is_empty() => {
            let mut plan = Vec::with_capacity(mapping.len());
            for (field_name, column_name) in mapping.iter() {
                let spec = fields
                    .iter()
                    .find(|spec| spec.name == field_name)
                    .copied()
                    .ok_or_else(|| UnknownField {
                        record: T::NAME,
                        field: field_name.to_string(),
                    })?;
                plan.push(PlannedField {
                    spec,
                    column: header.last_index_of(column_name),
                });
            }
            Ok(plan)
        }
        _ => Ok(fields
            .into_iter()
            .map(|spec| PlannedField {
                column: header.last_index_of(spec.name),
                spec,
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_fields;

    #[derive(Debug, Default)]
    struct Customer {
        id: i64,
        name: String,
    }

    record_fields!(Customer { "Id" => id, "Name" => name });

    #[test]
    fn test_header_parse_trims_and_drops_empty() {
        let header = Header::parse("Id, Name ,,Address");
        assert_eq!(header.columns(), &["Id", "Name", "Address"]);
    }

    #[test]
    fn test_last_index_of_is_case_insensitive() {
        let header = Header::parse("Id,Name");
        assert_eq!(header.last_index_of("name"), Some(1));
        assert_eq!(header.last_index_of("NAME"), Some(1));
        assert_eq!(header.last_index_of("missing"), None);
    }

    #[test]
    fn test_last_index_of_prefers_last_duplicate() {
        let header = Header::parse("Value,Other,Value");
        assert_eq!(header.last_index_of("Value"), Some(2));
    }

    #[test]
    fn test_direct_plan_covers_all_fields() {
        let header = Header::parse("Name,Id");
        let plan = resolve_plan::<Customer>(&header, None).unwrap();

        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].spec.name, "Id");
        assert_eq!(plan[0].column, Some(1));
        assert_eq!(plan[1].column, Some(0));
    }

    #[test]
    fn test_direct_plan_keeps_unmatched_field_as_none() {
        let header = Header::parse("Id");
        let plan = resolve_plan::<Customer>(&header, None).unwrap();

        assert_eq!(plan[1].spec.name, "Name");
        assert_eq!(plan[1].column, None);
    }

    #[test]
    fn test_mapped_plan_covers_only_mapped_fields() {
        let header = Header::parse("customer id,full name");
        let mapping = ColumnMapping::new().with("Name", " Full Name ");
        let plan = resolve_plan::<Customer>(&header, Some(&mapping)).unwrap();

        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].spec.name, "Name");
        assert_eq!(plan[0].column, Some(1));
    }

    #[test]
    fn test_empty_mapping_falls_back_to_direct_matching() {
        let header = Header::parse("Id,Name");
        let mapping = ColumnMapping::new();
        let plan = resolve_plan::<Customer>(&header, Some(&mapping)).unwrap();

        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_mapped_unknown_field_is_schema_error() {
        let header = Header::parse("Id,Name");
        let mapping = ColumnMapping::new().with("Nickname", "Name");
        let err = resolve_plan::<Customer>(&header, Some(&mapping)).unwrap_err();

        assert_eq!(err.record, "Customer");
        assert_eq!(err.field, "Nickname");
    }
}
