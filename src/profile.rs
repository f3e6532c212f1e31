//! Extraction profiles loaded from YAML.
//!
//! A profile captures the reusable call shape of an extraction — header
//! literal, skip count and column mapping — so call sites can share one
//! definition instead of repeating it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::schema::ColumnMapping;

/// Reusable extraction settings.
///
/// # Example profile
///
/// ```yaml
/// profile:
///   header: "Id,Name,Address"
///   skip: 1
///   columns:
///     Name: "full name"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractProfile {
    /// Header literal; when absent the header is consumed from content.
    #[serde(default)]
    pub header: Option<String>,

    /// Number of data rows to discard after header resolution.
    #[serde(default)]
    pub skip: usize,

    /// Explicit field-name -> column-name mapping; empty means direct
    /// name matching.
    #[serde(default)]
    pub columns: IndexMap<String, String>,
}

impl ExtractProfile {
    /// Load a profile from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to the profile YAML
    ///
    /// # Errors
    /// Returns error if the file doesn't exist or has invalid format
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        // Read file
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read profile file {}: {}", path.display(), e))?;

        // Parse YAML
        let yaml: serde_yaml::Value = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML: {}", e))?;

        // Extract profile definition
        let profile_yaml = yaml
            .get("profile")
            .ok_or_else(|| "Profile YAML missing 'profile' field".to_string())?;

        // Deserialize profile
        let profile: ExtractProfile = serde_yaml::from_value(profile_yaml.clone())
            .map_err(|e| format!("Failed to parse profile definition: {}", e))?;

        Ok(profile)
    }

    /// Column mapping from the profile, or `None` when no columns are
    /// mapped.
    pub fn mapping(&self) -> Option<ColumnMapping> {
        if self.columns.is_empty() {
            None
        } else {
            Some(ColumnMapping::from(self.columns.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_profile(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_profile() {
        let file = write_profile(
            "profile:\n  header: \"Id,Name\"\n  skip: 2\n  columns:\n    Name: full name\n",
        );

        let profile = ExtractProfile::load_from_file(file.path()).unwrap();
        assert_eq!(profile.header.as_deref(), Some("Id,Name"));
        assert_eq!(profile.skip, 2);
        assert_eq!(profile.columns.get("Name").map(String::as_str), Some("full name"));
        assert!(profile.mapping().is_some());
    }

    #[test]
    fn test_load_defaults() {
        let file = write_profile("profile: {}\n");

        let profile = ExtractProfile::load_from_file(file.path()).unwrap();
        assert!(profile.header.is_none());
        assert_eq!(profile.skip, 0);
        assert!(profile.mapping().is_none());
    }

    #[test]
    fn test_missing_profile_key() {
        let file = write_profile("settings: {}\n");

        let err = ExtractProfile::load_from_file(file.path()).unwrap_err();
        assert!(err.contains("missing 'profile'"));
    }

    #[test]
    fn test_missing_file() {
        let err = ExtractProfile::load_from_file("/no/such/profile.yaml").unwrap_err();
        assert!(err.contains("Failed to read"));
    }
}
