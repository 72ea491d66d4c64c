//! The addressable store of configuration entries.
//!
//! [`Config`] owns a mapping of qualified names to [`ConfigEntry`] records,
//! exposes category-aware accessors, and orchestrates load/save against a
//! backing file path.  It upholds one invariant throughout: every entry
//! stored under key `K` reports `qualified_name() == K`.  All renames are
//! container-level operations that remove, mutate, and re-insert in a single
//! step, so the map key and the entry's own name can never diverge.
//!
//! # Concurrency
//!
//! `Config` is a plain mutable aggregate with no internal locking.  All
//! operations are synchronous and blocking; sharing one instance across
//! threads is unsupported and callers must serialize access themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::domain::entry::ConfigEntry;
use crate::domain::name::{self, NameError};
use crate::storage::document::{self, ConfigDocument, EntryRecord, StorageError};

/// Errors produced by the store's value accessors and category extraction.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An integer accessor found a stored value that is not a valid base-10
    /// integer.  Raised only when the key is present; absent keys yield 0.
    #[error("value for {key:?} is not an integer: {value:?}")]
    NotAnInteger {
        key: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// The file location has no `.` extension separator, so a derived
    /// per-category path cannot be constructed.
    #[error("file location {location:?} has no extension separator '.'")]
    MalformedPath { location: String },
}

/// The in-memory, file-backed configuration store.
///
/// # Example
///
/// ```rust
/// use kvconf::Config;
///
/// let mut config = Config::new();
/// config.set_entry_in("drive", "max_speed", "Maximum speed in m/s", "3").unwrap();
/// config.set_entry("team_number", "FRC team number", "6868").unwrap();
///
/// assert_eq!(config.value_in("drive", "max_speed"), Some("3"));
/// assert_eq!(config.int_value("team_number").unwrap(), 6868);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Entries keyed by qualified name.  A sorted map keeps save output and
    /// diagnostic dumps deterministic; key order carries no meaning.
    entries: BTreeMap<String, ConfigEntry>,
    /// Path used by [`load`](Config::load) / [`save`](Config::save) when no
    /// explicit path is given.
    file_location: String,
}

impl Config {
    // ── Construction ──────────────────────────────────────────────────────────

    /// Creates an empty store with no backing file; set one later with
    /// [`set_file_location`](Config::set_file_location).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store bound to the given backing file path.
    pub fn with_file(location: impl Into<String>) -> Self {
        Self {
            entries: BTreeMap::new(),
            file_location: location.into(),
        }
    }

    /// Creates a store bound to `location` and immediately loads it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the file cannot be read or parsed.
    pub fn from_file(location: impl Into<String>) -> Result<Self, StorageError> {
        let mut config = Self::with_file(location);
        config.load()?;
        Ok(config)
    }

    // ── Path accessors ────────────────────────────────────────────────────────

    /// The backing file path used by [`load`](Config::load) and
    /// [`save`](Config::save).
    pub fn file_location(&self) -> &str {
        &self.file_location
    }

    pub fn set_file_location(&mut self, location: impl Into<String>) {
        self.file_location = location.into();
    }

    // ── Setters ───────────────────────────────────────────────────────────────

    /// Stores an entry under `qualified` verbatim, overwriting any existing
    /// entry at that key.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::NestedQualification`] when `qualified` contains
    /// more than one delimiter.
    pub fn set_entry(
        &mut self,
        qualified: &str,
        description: &str,
        value: &str,
    ) -> Result<(), NameError> {
        name::ensure_qualified_name(qualified)?;
        self.update_or_insert(qualified, description, value);
        Ok(())
    }

    /// Stores an entry under `category:name`, or under `name` alone when the
    /// category is empty — the same convention every lookup follows.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::ContainsDelimiter`] when either part contains the
    /// reserved delimiter.
    pub fn set_entry_in(
        &mut self,
        category: &str,
        name: &str,
        description: &str,
        value: &str,
    ) -> Result<(), NameError> {
        let qualified = name::qualify(category, name)?;
        self.update_or_insert(&qualified, description, value);
        Ok(())
    }

    /// Integer convenience form of [`set_entry`](Config::set_entry): the value
    /// is stored as its base-10 decimal string.
    ///
    /// # Errors
    ///
    /// Same as [`set_entry`](Config::set_entry).
    pub fn set_int_entry(
        &mut self,
        qualified: &str,
        description: &str,
        value: i64,
    ) -> Result<(), NameError> {
        self.set_entry(qualified, description, &value.to_string())
    }

    /// Integer convenience form of [`set_entry_in`](Config::set_entry_in).
    ///
    /// # Errors
    ///
    /// Same as [`set_entry_in`](Config::set_entry_in).
    pub fn set_int_entry_in(
        &mut self,
        category: &str,
        name: &str,
        description: &str,
        value: i64,
    ) -> Result<(), NameError> {
        self.set_entry_in(category, name, description, &value.to_string())
    }

    /// Overwrites the entry at a validated key, or creates it.  Updating in
    /// place keeps the map key and the entry's own name trivially consistent.
    fn update_or_insert(&mut self, qualified: &str, description: &str, value: &str) {
        match self.entries.get_mut(qualified) {
            Some(entry) => {
                entry.set_description(description);
                entry.set_value(value);
            }
            None => self.insert_entry(ConfigEntry::new(qualified, description, value)),
        }
    }

    /// Inserts an already-constructed entry under its own qualified name.
    pub(crate) fn insert_entry(&mut self, entry: ConfigEntry) {
        self.entries
            .insert(entry.qualified_name().to_string(), entry);
    }

    // ── Lookups ───────────────────────────────────────────────────────────────
    //
    // A missing key is a normal, expected outcome, never an error.

    /// The stored value at `qualified`, or `None` when absent.
    pub fn value(&self, qualified: &str) -> Option<&str> {
        self.entries.get(qualified).map(ConfigEntry::value)
    }

    /// The stored value at `category:name` (bare `name` when the category is
    /// empty), or `None` when absent.
    pub fn value_in(&self, category: &str, name: &str) -> Option<&str> {
        self.value(&name::join(category, name))
    }

    /// The description at `qualified`, or `None` when absent.
    pub fn description(&self, qualified: &str) -> Option<&str> {
        self.entries.get(qualified).map(ConfigEntry::description)
    }

    /// The description at `category:name`, or `None` when absent.
    pub fn description_in(&self, category: &str, name: &str) -> Option<&str> {
        self.description(&name::join(category, name))
    }

    /// The stored value at `qualified` parsed as a base-10 integer.
    ///
    /// Returns 0 when the key is absent.  That zero-default is a deliberate
    /// compatibility policy: absent and `"0"` are indistinguishable here, so
    /// callers that need the distinction should use
    /// [`value`](Config::value) instead.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotAnInteger`] when the key is present but its
    /// value does not parse.
    pub fn int_value(&self, qualified: &str) -> Result<i64, StoreError> {
        match self.value(qualified) {
            None => Ok(0),
            Some(raw) => raw.parse().map_err(|source| StoreError::NotAnInteger {
                key: qualified.to_string(),
                value: raw.to_string(),
                source,
            }),
        }
    }

    /// Category-qualified form of [`int_value`](Config::int_value).
    ///
    /// # Errors
    ///
    /// Same as [`int_value`](Config::int_value).
    pub fn int_value_in(&self, category: &str, name: &str) -> Result<i64, StoreError> {
        self.int_value(&name::join(category, name))
    }

    /// Borrows the entry at `qualified`, or `None` when absent.
    pub fn entry(&self, qualified: &str) -> Option<&ConfigEntry> {
        self.entries.get(qualified)
    }

    /// Iterates over all entries in key order.
    pub fn entries(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Category enumeration ──────────────────────────────────────────────────

    /// The deduplicated set of categories derived from every stored key.
    ///
    /// The empty string is included whenever at least one bare entry exists.
    pub fn categories(&self) -> BTreeSet<String> {
        self.entries
            .keys()
            .map(|key| name::category_of(key).to_string())
            .collect()
    }

    /// The full qualified names whose derived category equals `category`.
    ///
    /// For `""`, this selects every key with no delimiter at all.
    pub fn entry_names(&self, category: &str) -> BTreeSet<String> {
        self.entries
            .keys()
            .filter(|key| name::category_of(key) == category)
            .cloned()
            .collect()
    }

    // ── Renames (atomic re-keying) ────────────────────────────────────────────

    /// Renames the entry at `qualified` to a new local name, preserving its
    /// category, and re-keys the map in the same step.
    ///
    /// Returns `Ok(false)` when no entry exists at `qualified`.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::ContainsDelimiter`] when `new_local` contains the
    /// reserved delimiter; the store is left unchanged.
    pub fn rename_entry(&mut self, qualified: &str, new_local: &str) -> Result<bool, NameError> {
        name::ensure_local_name(new_local)?;
        let Some(mut entry) = self.entries.remove(qualified) else {
            return Ok(false);
        };
        if let Err(e) = entry.rename(new_local) {
            self.entries.insert(qualified.to_string(), entry);
            return Err(e);
        }
        self.insert_entry(entry);
        Ok(true)
    }

    /// Moves the entry at `qualified` under a new category (the empty string
    /// makes it bare), re-keying the map in the same step.
    ///
    /// Returns `Ok(false)` when no entry exists at `qualified`.
    ///
    /// # Errors
    ///
    /// Returns [`NameError::ContainsDelimiter`] when `new_category` contains
    /// the reserved delimiter; the store is left unchanged.
    pub fn recategorize_entry(
        &mut self,
        qualified: &str,
        new_category: &str,
    ) -> Result<bool, NameError> {
        name::ensure_category(new_category)?;
        let Some(mut entry) = self.entries.remove(qualified) else {
            return Ok(false);
        };
        if let Err(e) = entry.set_category(new_category) {
            self.entries.insert(qualified.to_string(), entry);
            return Err(e);
        }
        self.insert_entry(entry);
        Ok(true)
    }

    // ── Category extraction ───────────────────────────────────────────────────

    /// Moves every entry of `category` into a new standalone store.
    ///
    /// The new store's file path inserts `-category` immediately before the
    /// first `.` of this store's path, so saving it cannot overwrite the
    /// original file.  Extracted entries have their category prefix stripped
    /// and no longer exist in this store.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MalformedPath`] when this store's file location
    /// contains no `.`; no entries are moved in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kvconf::Config;
    ///
    /// let mut config = Config::with_file("robot.json");
    /// config.set_entry_in("drive", "max_speed", "Maximum speed in m/s", "3").unwrap();
    ///
    /// let drive = config.separate_category("drive").unwrap();
    ///
    /// assert_eq!(drive.file_location(), "robot-drive.json");
    /// assert_eq!(drive.value("max_speed"), Some("3"));
    /// assert_eq!(config.value_in("drive", "max_speed"), None);
    /// ```
    pub fn separate_category(&mut self, category: &str) -> Result<Config, StoreError> {
        let dot = self
            .file_location
            .find('.')
            .ok_or_else(|| StoreError::MalformedPath {
                location: self.file_location.clone(),
            })?;
        let (stem, extension) = self.file_location.split_at(dot);
        let mut separated = Config::with_file(format!("{stem}-{category}{extension}"));

        for qualified in self.entry_names(category) {
            if let Some(mut entry) = self.entries.remove(&qualified) {
                entry.strip_category();
                separated.insert_entry(entry);
            }
        }

        debug!(
            "separated {} entries of category {category:?} into {}",
            separated.len(),
            separated.file_location()
        );
        Ok(separated)
    }

    // ── Load / save ───────────────────────────────────────────────────────────

    /// Loads the backing file, merging its records into this store.
    ///
    /// Existing entries are kept; records in the file overwrite entries with
    /// the same qualified name, and duplicate names within the file resolve
    /// last-write-wins with no duplicate-detection error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the file cannot be read,
    /// [`StorageError::Format`] when it is not the expected document shape,
    /// and [`StorageError::Name`] when a record's name violates the
    /// qualified-name scheme.
    pub fn load(&mut self) -> Result<(), StorageError> {
        let location = self.file_location.clone();
        self.load_from(&location)
    }

    /// Loads from an explicit path, leaving this store's default file
    /// location untouched.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Config::load).
    pub fn load_from(&mut self, location: &str) -> Result<(), StorageError> {
        let document = document::read_document(location)?;
        let mut applied = 0usize;
        for (category, records) in &document {
            for record in records {
                self.set_entry_in(category, &record.name, &record.description, &record.value)?;
                applied += 1;
            }
        }
        debug!("applied {applied} entries from {location}");
        Ok(())
    }

    /// Writes this store to its backing file.
    ///
    /// Each category becomes a top-level key holding records that carry only
    /// the local name; `pretty` toggles human-readable indentation without
    /// affecting parse compatibility.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] on write failure.  There is no
    /// partial-write protection: a failed save may leave a truncated file.
    pub fn save(&self, pretty: bool) -> Result<(), StorageError> {
        self.save_to(&self.file_location, pretty)
    }

    /// Writes this store to an explicit path, leaving the default file
    /// location untouched.
    ///
    /// # Errors
    ///
    /// Same as [`save`](Config::save).
    pub fn save_to(&self, location: &str, pretty: bool) -> Result<(), StorageError> {
        let mut document = ConfigDocument::new();
        for category in self.categories() {
            let records = self
                .entry_names(&category)
                .into_iter()
                .filter_map(|qualified| self.entries.get(&qualified))
                .map(|entry| EntryRecord {
                    name: entry.local_name().to_string(),
                    description: entry.description().to_string(),
                    value: entry.value().to_string(),
                })
                .collect();
            document.insert(category, records);
        }
        document::write_document(location, &document, pretty)
    }
}

impl fmt::Display for Config {
    /// Diagnostic dump: every entry as `[name (description) = value]`,
    /// comma-separated.  Not a stable interchange format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .entries
            .values()
            .map(|entry| format!("[{entry}]"))
            .collect();
        f.write_str(&rendered.join(", "))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
