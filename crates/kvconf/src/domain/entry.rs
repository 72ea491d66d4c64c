//! A single named, described, string-valued configuration record.
//!
//! [`ConfigEntry`] is the atomic unit of configuration.  Entries are created
//! only through the owning [`Config`](crate::domain::store::Config) container,
//! never directly by external callers, and the container's map key must always
//! equal the entry's own qualified name.  To keep that invariant enforceable,
//! all mutators here are crate-private: renames reach the entry through
//! container operations that re-key the map in the same step.

use std::fmt;

use crate::domain::name::{self, NameError};

/// One configuration value plus its metadata.
///
/// The qualified name may embed a category prefix (`drive:max_speed`) or be
/// bare (`team_number`).  The value is always stored in its canonical string
/// form; integer values are represented as base-10 decimal strings and parsed
/// on demand by the container's integer accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    qualified_name: String,
    description: String,
    value: String,
}

impl ConfigEntry {
    /// Creates an entry.  Callers are responsible for having validated the
    /// qualified name through [`crate::domain::name`] first.
    pub(crate) fn new(
        qualified_name: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            description: description.into(),
            value: value.into(),
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// The full key under which this entry is stored.
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// The category portion of the qualified name, or `""` when bare.
    pub fn category(&self) -> &str {
        name::category_of(&self.qualified_name)
    }

    /// The local-name portion of the qualified name.
    pub fn local_name(&self) -> &str {
        name::local_name_of(&self.qualified_name)
    }

    /// Free-text description; no constraints.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The canonical stored string form of the value.
    pub fn value(&self) -> &str {
        &self.value
    }

    // ── Mutators (crate-private; the container re-keys its map) ───────────────

    /// Replaces the local name, preserving any existing category prefix.
    ///
    /// Fails, leaving the name unchanged, when `new_local` contains the
    /// reserved delimiter — names must not be re-nestable.
    pub(crate) fn rename(&mut self, new_local: &str) -> Result<(), NameError> {
        name::ensure_local_name(new_local)?;
        let category = self.category().to_string();
        self.qualified_name = name::join(&category, new_local);
        Ok(())
    }

    /// Rewrites the qualified name under a new category.
    ///
    /// Replaces whatever preceded the first delimiter, or prepends the
    /// delimiter-joined category when the name was bare.  An empty
    /// `new_category` strips the prefix entirely.
    pub(crate) fn set_category(&mut self, new_category: &str) -> Result<(), NameError> {
        name::ensure_category(new_category)?;
        let local = self.local_name().to_string();
        self.qualified_name = name::join(new_category, &local);
        Ok(())
    }

    /// Drops the category prefix, leaving the bare local name.  Infallible;
    /// used by category extraction.
    pub(crate) fn strip_category(&mut self) {
        self.qualified_name = self.local_name().to_string();
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

impl fmt::Display for ConfigEntry {
    /// Renders `name (description) = value` — the diagnostic dump form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) = {}",
            self.qualified_name, self.description, self.value
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
