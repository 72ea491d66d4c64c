//! JSON document model for the on-disk configuration format.
//!
//! The backing file is a single JSON document whose top level is an object
//! mapping category names to ordered lists of entry records:
//!
//! ```json
//! {
//!     "": [
//!         {"name": "team_number", "description": "FRC team number", "value": "6868"}
//!     ],
//!     "drive": [
//!         {"name": "max_speed", "description": "Maximum speed in m/s", "value": "3"}
//!     ]
//! }
//! ```
//!
//! The empty string is a valid top-level key and denotes uncategorized
//! entries.  There is no versioning field, no schema declaration, and no type
//! tagging: numeric values are always serialized as strings.  The pretty and
//! compact renderings differ only in whitespace and parse identically.

use std::collections::BTreeMap;
use std::fs;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::domain::name::NameError;

/// Error type for reading and writing configuration documents.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file could not be read or written.
    #[error("I/O error accessing configuration at {location:?}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    /// The content does not match the expected category-to-record-list shape.
    #[error("malformed configuration document: {0}")]
    Format(#[from] serde_json::Error),

    /// A record read from disk violates the qualified-name scheme.
    #[error(transparent)]
    Name(#[from] NameError),
}

/// One serialized entry: exactly three string fields.
///
/// The `name` field holds only the *local* name — the category is carried
/// structurally by the record's position in the top-level mapping, never
/// redundantly inside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryRecord {
    pub name: String,
    pub description: String,
    pub value: String,
}

/// The whole document: category name (possibly `""`) to ordered record list.
pub type ConfigDocument = BTreeMap<String, Vec<EntryRecord>>;

/// Reads and parses the document at `location`.
///
/// # Errors
///
/// Returns [`StorageError::Io`] when the file cannot be read and
/// [`StorageError::Format`] when the content is not a JSON object of
/// category keys to lists of well-formed records.
pub fn read_document(location: &str) -> Result<ConfigDocument, StorageError> {
    let content = fs::read_to_string(location).map_err(|source| StorageError::Io {
        location: location.to_string(),
        source,
    })?;
    let document: ConfigDocument = serde_json::from_str(&content)?;
    debug!("read {} categories from {location}", document.len());
    Ok(document)
}

/// Serializes `document` and writes it to `location`.
///
/// `pretty` selects human-readable indentation; both renderings are
/// parse-compatible.  The write is not atomic: a failure may leave a
/// truncated file behind.
///
/// # Errors
///
/// Returns [`StorageError::Io`] on write failure.
pub fn write_document(
    location: &str,
    document: &ConfigDocument,
    pretty: bool,
) -> Result<(), StorageError> {
    let content = if pretty {
        serde_json::to_string_pretty(document)?
    } else {
        serde_json::to_string(document)?
    };
    fs::write(location, content).map_err(|source| StorageError::Io {
        location: location.to_string(),
        source,
    })?;
    debug!("wrote {} categories to {location}", document.len());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> ConfigDocument {
        let mut document = ConfigDocument::new();
        document.insert(
            "".to_string(),
            vec![EntryRecord {
                name: "team_number".to_string(),
                description: "FRC team number".to_string(),
                value: "6868".to_string(),
            }],
        );
        document.insert(
            "drive".to_string(),
            vec![EntryRecord {
                name: "max_speed".to_string(),
                description: "Maximum speed in m/s".to_string(),
                value: "3".to_string(),
            }],
        );
        document
    }

    #[test]
    fn test_document_serializes_with_empty_string_category_key() {
        let document = sample_document();

        let json = serde_json::to_string(&document).expect("serialize");

        assert!(json.contains("\"\":["), "empty category must be a plain key");
    }

    #[test]
    fn test_document_round_trips_through_compact_json() {
        let document = sample_document();

        let json = serde_json::to_string(&document).expect("serialize");
        let restored: ConfigDocument = serde_json::from_str(&json).expect("deserialize");

        assert_eq!(document, restored);
    }

    #[test]
    fn test_pretty_and_compact_parse_to_the_same_document() {
        let document = sample_document();

        let compact = serde_json::to_string(&document).expect("serialize compact");
        let pretty = serde_json::to_string_pretty(&document).expect("serialize pretty");
        let from_compact: ConfigDocument = serde_json::from_str(&compact).expect("parse compact");
        let from_pretty: ConfigDocument = serde_json::from_str(&pretty).expect("parse pretty");

        assert_eq!(from_compact, from_pretty);
    }

    #[test]
    fn test_top_level_array_is_a_format_error() {
        let result: Result<ConfigDocument, _> = serde_json::from_str("[1, 2, 3]");
        assert!(result.is_err());
    }

    #[test]
    fn test_category_value_not_a_list_is_a_format_error() {
        let result: Result<ConfigDocument, _> =
            serde_json::from_str(r#"{"drive": {"name": "x"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_missing_value_field_is_a_format_error() {
        let result: Result<ConfigDocument, _> =
            serde_json::from_str(r#"{"drive": [{"name": "x", "description": "d"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_record_with_unknown_field_is_a_format_error() {
        let result: Result<ConfigDocument, _> = serde_json::from_str(
            r#"{"drive": [{"name": "x", "description": "d", "value": "1", "type": "int"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_read_document_missing_file_is_an_io_error() {
        let result = read_document("/nonexistent/kvconf/test.json");
        assert!(matches!(result, Err(StorageError::Io { .. })));
    }
}
