//! # kvconf
//!
//! An in-memory, file-backed key-value configuration store with hierarchical
//! namespacing via a flat `category:name` scheme.
//!
//! A [`Config`] owns a map of qualified names to entries, each holding a
//! free-text description and a string value.  Entries are addressed either by
//! their full qualified name (`"drive:max_speed"`) or by a
//! `(category, name)` pair; the empty category denotes bare, uncategorized
//! entries.  The store round-trips to a JSON document whose top-level keys
//! are category names, each holding a list of `{name, description, value}`
//! records.
//!
//! The crate is deliberately simple: single-threaded, synchronous, blocking
//! I/O, no schema validation beyond the string-vs-integer convenience
//! accessors.
//!
//! ```rust
//! use kvconf::Config;
//!
//! let mut config = Config::with_file("robot.json");
//! config.set_entry_in("drive", "max_speed", "Maximum speed in m/s", "3").unwrap();
//! config.set_int_entry("team_number", "FRC team number", 6868).unwrap();
//!
//! assert_eq!(config.value_in("drive", "max_speed"), Some("3"));
//! assert_eq!(config.int_value("team_number").unwrap(), 6868);
//! assert_eq!(config.categories().len(), 2);
//! ```
//!
//! # Module map
//!
//! - **[`domain`]** — the qualified-name scheme, [`ConfigEntry`], and the
//!   [`Config`] container.
//! - **[`storage`]** — the on-disk document model and its reader/writer.

pub mod domain;
pub mod storage;

// Re-export the public surface at the crate root so callers can write
// `kvconf::Config` instead of `kvconf::domain::store::Config`.
pub use domain::entry::ConfigEntry;
pub use domain::name::{NameError, DELIMITER};
pub use domain::store::{Config, StoreError};
pub use storage::document::{ConfigDocument, EntryRecord, StorageError};
