//! Core record trait and field descriptors.
//!
//! A record type is a caller-defined shape with named, typed fields. The
//! fields are described by a descriptor table built once per extraction
//! call, so no per-row name discovery happens on the mapping path.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::coerce::CoerceError;

/// A single field value read out of a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Float(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

macro_rules! field_value_from_int {
    ($($ty:ty),+ $(,)?) => {
        $(impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::Int(value.into())
            }
        })+
    };
}

field_value_from_int!(i8, i16, i32, i64, u8, u16, u32);

/// Descriptor for one named, typed field on a record type.
///
/// The getter and setter are plain function pointers, so a descriptor
/// table is cheap to build and copy. The setter owns the typed parse for
/// its field; the target type is fixed when the table is built.
pub struct FieldSpec<T> {
    /// Field name as matched against header columns.
    pub name: &'static str,
    /// Read the field's current value (used by the dump writers).
    pub get: fn(&T) -> FieldValue,
    /// Parse a raw cell and assign it into the record.
    pub set: fn(&mut T, &str) -> Result<(), CoerceError>,
}

impl<T> Clone for FieldSpec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FieldSpec<T> {}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec").field("name", &self.name).finish()
    }
}

/// Core trait for record types produced by extraction.
///
/// Instances are default-constructed per data row, mutated field-by-field
/// during mapping, then handed to the caller. Implement it by hand or with
/// the [`record_fields!`](crate::record_fields) macro.
///
/// # Example
///
/// ```
/// use csvnom::{FieldSpec, FieldValue, Record};
///
/// #[derive(Default)]
/// struct Point {
///     x: f64,
///     y: f64,
/// }
///
/// impl Record for Point {
///     const NAME: &'static str = "Point";
///
///     fn fields() -> Vec<FieldSpec<Self>> {
///         vec![
///             FieldSpec {
///                 name: "X",
///                 get: |p| FieldValue::from(p.x),
///                 set: |p, raw| {
///                     p.x = csvnom::coerce::parse(raw)?;
///                     Ok(())
///                 },
///             },
///             FieldSpec {
///                 name: "Y",
///                 get: |p| FieldValue::from(p.y),
///                 set: |p, raw| {
///                     p.y = csvnom::coerce::parse(raw)?;
///                     Ok(())
///                 },
///             },
///         ]
///     }
/// }
///
/// assert_eq!(Point::NAME, "Point");
/// assert_eq!(Point::fields().len(), 2);
/// ```
pub trait Record: Default + Sized {
    /// The name of this record type.
    const NAME: &'static str;

    /// Field descriptor table, in declaration order.
    fn fields() -> Vec<FieldSpec<Self>>;
}

/// Implement [`Record`] for a struct from a `"Column" => field` table.
///
/// Each entry pairs the name matched against header columns with the struct
/// field it fills. Field types must implement
/// [`FromCell`](crate::coerce::FromCell) and convert into [`FieldValue`].
///
/// # Example
///
/// ```
/// use csvnom::{record_fields, Record};
///
/// #[derive(Debug, Default)]
/// struct Customer {
///     id: i64,
///     name: String,
/// }
///
/// record_fields!(Customer { "Id" => id, "Name" => name });
///
/// assert_eq!(Customer::NAME, "Customer");
/// assert_eq!(Customer::fields()[0].name, "Id");
/// ```
#[macro_export]
macro_rules! record_fields {
    ($ty:ident { $($col:literal => $field:ident),+ $(,)? }) => {
        impl $crate::Record for $ty {
            const NAME: &'static str = stringify!($ty);

            fn fields() -> Vec<$crate::FieldSpec<Self>> {
                vec![$(
                    $crate::FieldSpec {
                        name: $col,
                        get: |record| $crate::FieldValue::from(record.$field.clone()),
                        set: |record, raw| {
                            record.$field = $crate::coerce::parse(raw)?;
                            Ok(())
                        },
                    }
                ),+]
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Sample {
        id: i64,
        label: String,
        active: bool,
    }

    record_fields!(Sample { "Id" => id, "Label" => label, "Active" => active });

    #[test]
    fn test_macro_implements_record() {
        assert_eq!(Sample::NAME, "Sample");
        let fields = Sample::fields();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].name, "Label");
    }

    #[test]
    fn test_setter_parses_into_field() {
        let mut sample = Sample::default();
        let fields = Sample::fields();
        (fields[0].set)(&mut sample, "17").unwrap();
        (fields[2].set)(&mut sample, "true").unwrap();
        assert_eq!(sample.id, 17);
        assert!(sample.active);
    }

    #[test]
    fn test_setter_propagates_coercion_failure() {
        let mut sample = Sample::default();
        let fields = Sample::fields();
        let err = (fields[0].set)(&mut sample, "not a number").unwrap_err();
        assert_eq!(err.target, "i64");
    }

    #[test]
    fn test_getter_reads_field_value() {
        let sample = Sample {
            id: 5,
            label: "row".to_string(),
            active: false,
        };
        let fields = Sample::fields();
        assert_eq!((fields[0].get)(&sample), FieldValue::Int(5));
        assert_eq!((fields[1].get)(&sample), FieldValue::String("row".to_string()));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Int(3).to_string(), "3");
        assert_eq!(FieldValue::String("x".to_string()).to_string(), "x");
        assert_eq!(FieldValue::Bool(true).to_string(), "true");
    }
}
