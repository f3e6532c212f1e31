//! Converter registry applied to raw cells before type coercion.
//!
//! A converter is a caller-supplied transform from raw cell text to raw
//! cell text, registered per field name and invoked before the field's
//! typed parse. Converters are pure by contract.

use std::collections::HashMap;

/// Trait for converter functions.
pub trait ConvertFn: Send + Sync {
    /// Transform the raw cell value before coercion.
    fn apply(&self, raw: String) -> String;
}

/// Simple closure-based implementation of ConvertFn
impl<F> ConvertFn for F
where
    F: Fn(String) -> String + Send + Sync,
{
    fn apply(&self, raw: String) -> String {
        self(raw)
    }
}

/// Registry of converters keyed by field name.
pub struct ConverterMap {
    converters: HashMap<String, Box<dyn ConvertFn>>,
}

impl ConverterMap {
    /// Create a new empty converter map
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Register a converter for a field name.
    ///
    /// # Example
    ///
    /// ```
    /// use csvnom::ConverterMap;
    ///
    /// let mut converters = ConverterMap::new();
    /// converters.register("Name", Box::new(|raw: String| raw.to_uppercase()));
    /// assert!(converters.has_converter("Name"));
    /// ```
    pub fn register(&mut self, field: impl Into<String>, func: Box<dyn ConvertFn>) {
        self.converters.insert(field.into(), func);
    }

    /// Run the converter registered for `field`, if any.
    ///
    /// Returns the input unchanged when no converter is registered.
    pub fn apply_to(&self, field: &str, raw: String) -> String {
        match self.converters.get(field) {
            Some(func) => func.apply(raw),
            None => raw,
        }
    }

    /// Check if a converter is registered for a field.
    pub fn has_converter(&self, field: &str) -> bool {
        self.converters.contains_key(field)
    }

    /// Number of registered converters.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl Default for ConverterMap {
    fn default() -> Self {
        Self::new()
    }
}
