//! medfind-drafts - Local draft persistence for the medicine availability finder
//!
//! This library keeps namespaced collections of drafts (unfinished reports,
//! saved searches, half-filled forms) in local storage, with optional periodic
//! autosave of the draft being edited. It also hosts the filtering and sorting
//! used by the review list and the report history.
//!
//! # Modules
//!
//! * [`config`] - Application configuration management
//! * [`drafts`] - Draft store, autosave and export/import
//! * [`storage`] - Pluggable key/value persistence backends
//! * [`listing`] - Review and report-history filtering and sorting
//! * [`logger`] - Log output setup
//! * [`utils`] - Utility functions and helpers

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Bounded draft collections with autosave
pub mod drafts;

/// Filtering and sorting for review and report lists
pub mod listing;

/// Logging setup for the CLI and embedding applications
pub mod logger;

/// Local key/value storage backends
pub mod storage;

/// Utility functions for date/time handling and other helpers
pub mod utils;

pub use drafts::{Draft, DraftId, DraftKind, DraftStore, DraftStoreOptions};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
