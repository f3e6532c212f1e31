//! Row mapper: turns data rows into records through the resolution plan.
//!
//! Orchestrates the tokenizer, the resolved field plan and the converter
//! registry to yield one record per data row, lazily. Row-level failures
//! are `Err` items of the sequence so a failed row stays distinguishable
//! from a legitimately skipped one; iteration continues past them.

use std::fmt;

use crate::coerce::CoerceError;
use crate::convert::ConverterMap;
use crate::record::Record;
use crate::schema::PlannedField;
use crate::tokenizer;

/// Row-level mapping failure.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based index of the failing data row, counted after header and
    /// skip accounting.
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowErrorKind {
    /// The field's column was not found in the header, or the row had no
    /// cell at the resolved index (missing trailing cells).
    ColumnLookup { field: String },
    /// The (possibly converted) cell text could not be coerced to the
    /// field's type.
    Coerce { field: String, source: CoerceError },
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RowErrorKind::ColumnLookup { field } => {
                write!(f, "row {}: no column value for field '{}'", self.row, field)
            }
            RowErrorKind::Coerce { field, source } => {
                write!(f, "row {}: field '{}': {}", self.row, field, source)
            }
        }
    }
}

impl std::error::Error for RowError {}

/// Select the header line and the data-row window from parsed rows.
///
/// A supplied header literal is used as-is and the window starts at
/// `skip`; otherwise the first content line is consumed as the header and
/// the window starts at `skip + 1`. Returns `None` when the header would
/// have to come from empty content.
pub(crate) fn select_window(
    rows: Vec<String>,
    header_literal: Option<&str>,
    skip: usize,
) -> Option<(String, Vec<String>)> {
    let (header_line, start) = match header_literal {
        Some(literal) => (literal.to_string(), skip),
        None => (rows.first()?.clone(), skip + 1),
    };
    let data = rows.into_iter().skip(start).collect();
    Some((header_line, data))
}

/// Lazy sequence of mapped records.
///
/// Finite and not restartable; re-invoke the extractor to iterate again.
/// The consumer controls pacing and may stop early at any point.
pub struct Records<'a, T: Record> {
    rows: std::vec::IntoIter<String>,
    plan: Vec<PlannedField<T>>,
    converters: &'a ConverterMap,
    row: usize,
}

impl<'a, T: Record> std::fmt::Debug for Records<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Records")
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Record> Records<'a, T> {
    pub(crate) fn new(
        rows: Vec<String>,
        plan: Vec<PlannedField<T>>,
        converters: &'a ConverterMap,
    ) -> Self {
        Self {
            rows: rows.into_iter(),
            plan,
            converters,
            row: 0,
        }
    }

    /// Map one data row. `None` means the row produced no cells and is
    /// skipped without being an error.
    fn map_row(&self, line: &str) -> Option<Result<T, RowError>> {
        let masked = tokenizer::mask_quoted_commas(line);
        let cells = tokenizer::split_cells(&masked);
        if cells.is_empty() {
            return None;
        }

        let mut record = T::default();
        for planned in &self.plan {
            let cell = match planned.column.and_then(|index| cells.get(index)) {
                Some(cell) => cell.clone(),
                None => {
                    return Some(Err(RowError {
                        row: self.row,
                        kind: RowErrorKind::ColumnLookup {
                            field: planned.spec.name.to_string(),
                        },
                    }));
                }
            };

            let converted = self.converters.apply_to(planned.spec.name, cell);
            if let Err(source) = (planned.spec.set)(&mut record, &converted) {
                return Some(Err(RowError {
                    row: self.row,
                    kind: RowErrorKind::Coerce {
                        field: planned.spec.name.to_string(),
                        source,
                    },
                }));
            }
        }
        Some(Ok(record))
    }
}

impl<'a, T: Record> Iterator for Records<'a, T> {
    type Item = Result<T, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.rows.next()?;
            self.row += 1;
            if let Some(result) = self.map_row(&line) {
                return Some(result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record_fields;
    use crate::schema::{resolve_plan, Header};

    #[derive(Debug, Default, PartialEq)]
    struct Item {
        sku: String,
        qty: i64,
    }

    record_fields!(Item { "Sku" => sku, "Qty" => qty });

    fn plan_for(header: &str) -> Vec<PlannedField<Item>> {
        resolve_plan::<Item>(&Header::parse(header), None).unwrap()
    }

    #[test]
    fn test_select_window_consumes_first_line_as_header() {
        let rows = vec!["h".to_string(), "a".to_string(), "b".to_string()];
        let (header, data) = select_window(rows, None, 0).unwrap();
        assert_eq!(header, "h");
        assert_eq!(data, vec!["a", "b"]);
    }

    #[test]
    fn test_select_window_with_literal_keeps_all_rows() {
        let rows = vec!["a".to_string(), "b".to_string()];
        let (header, data) = select_window(rows, Some("h"), 0).unwrap();
        assert_eq!(header, "h");
        assert_eq!(data, vec!["a", "b"]);
    }

    #[test]
    fn test_select_window_applies_skip_after_header() {
        let rows: Vec<String> = ["h", "r0", "r1", "r2", "r3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let (_, data) = select_window(rows, None, 2).unwrap();
        assert_eq!(data, vec!["r2", "r3"]);
    }

    #[test]
    fn test_select_window_missing_header() {
        assert!(select_window(Vec::new(), None, 0).is_none());
        assert!(select_window(Vec::new(), Some("h"), 0).is_some());
    }

    #[test]
    fn test_records_yields_in_order() {
        let converters = ConverterMap::new();
        let rows = vec!["ab,1".to_string(), "cd,2".to_string()];
        let records: Vec<Item> = Records::new(rows, plan_for("Sku,Qty"), &converters)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            records,
            vec![
                Item { sku: "ab".to_string(), qty: 1 },
                Item { sku: "cd".to_string(), qty: 2 },
            ]
        );
    }

    #[test]
    fn test_missing_trailing_cell_fails_row_and_continues() {
        let converters = ConverterMap::new();
        let rows = vec!["ab".to_string(), "cd,2".to_string()];
        let results: Vec<_> = Records::new(rows, plan_for("Sku,Qty"), &converters).collect();

        assert_eq!(results.len(), 2);
        let err = results[0].as_ref().unwrap_err();
        assert_eq!(err.row, 1);
        assert_eq!(
            err.kind,
            RowErrorKind::ColumnLookup { field: "Qty".to_string() }
        );
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_coercion_failure_carries_row_and_field() {
        let converters = ConverterMap::new();
        let rows = vec!["ab,1".to_string(), "cd,many".to_string()];
        let results: Vec<_> = Records::new(rows, plan_for("Sku,Qty"), &converters).collect();

        let err = results[1].as_ref().unwrap_err();
        assert_eq!(err.row, 2);
        match &err.kind {
            RowErrorKind::Coerce { field, source } => {
                assert_eq!(field, "Qty");
                assert_eq!(source.value, "many");
            }
            other => panic!("unexpected error kind: {:?}", other),
        }
    }

    #[test]
    fn test_converter_applies_before_setter() {
        let mut converters = ConverterMap::new();
        converters.register("Qty", Box::new(|raw: String| raw.replace('$', "")));

        let rows = vec!["ab,$5".to_string()];
        let records: Vec<Item> = Records::new(rows, plan_for("Sku,Qty"), &converters)
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(records[0].qty, 5);
    }

    #[test]
    fn test_early_stop_is_supported() {
        let converters = ConverterMap::new();
        let rows = vec!["ab,1".to_string(), "cd,2".to_string(), "ef,3".to_string()];
        let mut records = Records::new(rows, plan_for("Sku,Qty"), &converters);

        assert!(records.next().is_some());
        drop(records);
    }
}
