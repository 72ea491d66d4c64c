//! The qualified-name scheme: `category:local_name`.
//!
//! Every entry in a store is addressed by a *qualified name*.  A qualified
//! name optionally embeds a category prefix separated by the single reserved
//! [`DELIMITER`] character:
//!
//! ```text
//! drive:max_speed      category = "drive",  local name = "max_speed"
//! team_number          category = "",       local name = "team_number"
//! ```
//!
//! The empty string is itself a valid category and denotes "no category".
//!
//! This module is the single place where qualified names are constructed and
//! validated.  Every code path that creates or mutates a qualified name —
//! public setters, renames, records read from disk — goes through the
//! functions here, so the "at most one delimiter" invariant holds uniformly
//! across the whole crate.

use thiserror::Error;

/// The single reserved character separating a category from a local name.
pub const DELIMITER: char = ':';

/// Errors produced when a name violates the qualification scheme.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// A local name or category contains the reserved delimiter.
    #[error("name {name:?} must not contain the reserved delimiter ':'")]
    ContainsDelimiter { name: String },

    /// A qualified name contains more than one delimiter occurrence.
    #[error("qualified name {name:?} nests more than one category level")]
    NestedQualification { name: String },
}

// ── Decomposition ─────────────────────────────────────────────────────────────

/// Returns the category portion of a qualified name.
///
/// The category is the substring before the first delimiter, or `""` when the
/// name carries no delimiter at all.
///
/// # Examples
///
/// ```rust
/// use kvconf::domain::name::category_of;
///
/// assert_eq!(category_of("drive:max_speed"), "drive");
/// assert_eq!(category_of("team_number"), "");
/// ```
pub fn category_of(qualified: &str) -> &str {
    match qualified.split_once(DELIMITER) {
        Some((category, _)) => category,
        None => "",
    }
}

/// Returns the local-name portion of a qualified name.
///
/// The local name is the substring after the first delimiter, or the whole
/// name when no delimiter is present.
///
/// # Examples
///
/// ```rust
/// use kvconf::domain::name::local_name_of;
///
/// assert_eq!(local_name_of("drive:max_speed"), "max_speed");
/// assert_eq!(local_name_of("team_number"), "team_number");
/// ```
pub fn local_name_of(qualified: &str) -> &str {
    match qualified.split_once(DELIMITER) {
        Some((_, local)) => local,
        None => qualified,
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Joins a category and a local name into a qualified name, validating both.
///
/// An empty category yields the local name verbatim, with no delimiter — the
/// bare/uncategorized form.
///
/// # Errors
///
/// Returns [`NameError::ContainsDelimiter`] when either part contains the
/// reserved delimiter.
pub fn qualify(category: &str, local: &str) -> Result<String, NameError> {
    ensure_category(category)?;
    ensure_local_name(local)?;
    Ok(join(category, local))
}

/// Joins a category and a local name without validating either part.
///
/// Used by lookups, which never fail on malformed input (a key that violates
/// the scheme simply is not found), and by callers that have already
/// validated the parts.
pub(crate) fn join(category: &str, local: &str) -> String {
    if category.is_empty() {
        local.to_string()
    } else {
        format!("{category}{DELIMITER}{local}")
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Checks that a local name is free of the reserved delimiter.
///
/// # Errors
///
/// Returns [`NameError::ContainsDelimiter`] otherwise.
pub fn ensure_local_name(local: &str) -> Result<(), NameError> {
    if local.contains(DELIMITER) {
        return Err(NameError::ContainsDelimiter {
            name: local.to_string(),
        });
    }
    Ok(())
}

/// Checks that a category name is free of the reserved delimiter.
///
/// The empty string is a valid category (it denotes "no category").
///
/// # Errors
///
/// Returns [`NameError::ContainsDelimiter`] otherwise.
pub fn ensure_category(category: &str) -> Result<(), NameError> {
    if category.contains(DELIMITER) {
        return Err(NameError::ContainsDelimiter {
            name: category.to_string(),
        });
    }
    Ok(())
}

/// Checks that a full qualified name contains at most one delimiter.
///
/// # Errors
///
/// Returns [`NameError::NestedQualification`] when the name would nest more
/// than one category level.
pub fn ensure_qualified_name(qualified: &str) -> Result<(), NameError> {
    if qualified.matches(DELIMITER).count() > 1 {
        return Err(NameError::NestedQualification {
            name: qualified.to_string(),
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_of_returns_prefix_before_delimiter() {
        assert_eq!(category_of("drive:max_speed"), "drive");
    }

    #[test]
    fn test_category_of_bare_name_is_empty() {
        assert_eq!(category_of("team_number"), "");
    }

    #[test]
    fn test_local_name_of_returns_suffix_after_delimiter() {
        assert_eq!(local_name_of("drive:max_speed"), "max_speed");
    }

    #[test]
    fn test_local_name_of_bare_name_is_whole_name() {
        assert_eq!(local_name_of("team_number"), "team_number");
    }

    #[test]
    fn test_decomposition_uses_first_delimiter_only() {
        // A malformed doubly-nested name still splits at the first occurrence.
        assert_eq!(category_of("a:b:c"), "a");
        assert_eq!(local_name_of("a:b:c"), "b:c");
    }

    #[test]
    fn test_qualify_joins_with_delimiter() {
        assert_eq!(qualify("drive", "max_speed").unwrap(), "drive:max_speed");
    }

    #[test]
    fn test_qualify_empty_category_yields_bare_name() {
        // No delimiter may appear in the bare form.
        assert_eq!(qualify("", "team_number").unwrap(), "team_number");
    }

    #[test]
    fn test_qualify_rejects_delimiter_in_local_name() {
        let result = qualify("drive", "max:speed");
        assert_eq!(
            result,
            Err(NameError::ContainsDelimiter {
                name: "max:speed".to_string()
            })
        );
    }

    #[test]
    fn test_qualify_rejects_delimiter_in_category() {
        assert!(qualify("dri:ve", "max_speed").is_err());
    }

    #[test]
    fn test_ensure_qualified_name_accepts_bare_and_single_level() {
        assert!(ensure_qualified_name("team_number").is_ok());
        assert!(ensure_qualified_name("drive:max_speed").is_ok());
    }

    #[test]
    fn test_ensure_qualified_name_rejects_nested_qualification() {
        assert_eq!(
            ensure_qualified_name("a:b:c"),
            Err(NameError::NestedQualification {
                name: "a:b:c".to_string()
            })
        );
    }

    #[test]
    fn test_ensure_category_accepts_empty() {
        assert!(ensure_category("").is_ok());
    }
}
