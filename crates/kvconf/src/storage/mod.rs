//! File I/O boundary: the serialized document model and its reader/writer.

pub mod document;

pub use document::{read_document, write_document, ConfigDocument, EntryRecord, StorageError};
