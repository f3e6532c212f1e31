//! Value coercion from raw cell text to typed field values.
//!
//! The typed parse for each field lives behind the [`FromCell`] capability,
//! selected by the field descriptor when the descriptor table is built.
//! Failures carry the offending text and the target type and surface as
//! per-record errors, never silently.

use std::fmt;

/// Error raised when a raw cell cannot be coerced to a field's type.
#[derive(Debug, Clone, PartialEq)]
pub struct CoerceError {
    /// The raw text that failed to parse.
    pub value: String,
    /// Name of the target type.
    pub target: &'static str,
}

impl fmt::Display for CoerceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot convert '{}' to {}", self.value, self.target)
    }
}

impl std::error::Error for CoerceError {}

/// Typed parse capability for field target types.
pub trait FromCell: Sized {
    /// Type name used in error reports.
    const TYPE_NAME: &'static str;

    /// Parse a raw cell into this type.
    fn from_cell(raw: &str) -> Result<Self, CoerceError>;
}

/// Parse a raw cell into a typed field value.
///
/// Converters run before this; the input here is the (possibly converted)
/// raw cell text.
pub fn parse<V: FromCell>(raw: &str) -> Result<V, CoerceError> {
    V::from_cell(raw)
}

impl FromCell for String {
    const TYPE_NAME: &'static str = "String";

    fn from_cell(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_string())
    }
}

macro_rules! from_cell_numeric {
    ($($ty:ty => $name:literal),+ $(,)?) => {
        $(impl FromCell for $ty {
            const TYPE_NAME: &'static str = $name;

            fn from_cell(raw: &str) -> Result<Self, CoerceError> {
                raw.trim().parse::<$ty>().map_err(|_| CoerceError {
                    value: raw.to_string(),
                    target: $name,
                })
            }
        })+
    };
}

from_cell_numeric!(
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    f32 => "f32",
    f64 => "f64",
);

impl FromCell for bool {
    const TYPE_NAME: &'static str = "bool";

    // Accepts `true`/`false` case-insensitively after trimming.
    fn from_cell(raw: &str) -> Result<Self, CoerceError> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CoerceError {
                value: raw.to_string(),
                target: "bool",
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(parse::<i64>("42").unwrap(), 42);
        assert_eq!(parse::<i32>(" -7 ").unwrap(), -7);
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse::<f64>("3.25").unwrap(), 3.25);
    }

    #[test]
    fn test_parse_string_is_verbatim() {
        assert_eq!(parse::<String>("  spaced  ").unwrap(), "  spaced  ");
    }

    #[test]
    fn test_parse_bool_case_insensitive() {
        assert!(parse::<bool>("True").unwrap());
        assert!(!parse::<bool>(" FALSE ").unwrap());
    }

    #[test]
    fn test_parse_failure_carries_value_and_target() {
        let err = parse::<i64>("abc").unwrap_err();
        assert_eq!(err.value, "abc");
        assert_eq!(err.target, "i64");
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_parse_bool_rejects_numeric_forms() {
        assert!(parse::<bool>("1").is_err());
        assert!(parse::<bool>("yes").is_err());
    }
}
