//! Constants used throughout the application
//!
//! This module centralizes default values, limits and user-facing messages
//! to keep them consistent between the library and the CLI.

// Draft store defaults
/// Namespace used when none is configured
pub const DEFAULT_NAMESPACE: &str = "medfind";
/// Maximum number of drafts kept per namespace
pub const DEFAULT_MAX_DRAFTS: usize = 10;
/// Upper bound accepted for `max_drafts`
pub const MAX_DRAFTS_LIMIT: usize = 1000;
/// Autosave cadence in seconds
pub const DEFAULT_AUTOSAVE_INTERVAL_SECS: u64 = 30;
/// Lower bound for the autosave interval; shorter intervals are raised to it
pub const AUTOSAVE_INTERVAL_MIN_SECS: u64 = 1;
/// Upper bound accepted for the autosave interval (24 hours)
pub const AUTOSAVE_INTERVAL_MAX_SECS: u64 = 86_400;

// Draft identifiers
/// Prefix of every generated draft id
pub const DRAFT_ID_PREFIX: &str = "draft";
/// Length of the random alphanumeric suffix of a draft id
pub const DRAFT_ID_SUFFIX_LEN: usize = 9;
/// Latest accepted draft timestamp (9999-12-31T23:59:59.999Z, epoch ms)
pub const MAX_DRAFT_TIMESTAMP: i64 = 253_402_300_799_999;

// Storage
/// Default byte quota per storage slot, in line with browser local storage
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;
/// Extension of files written by the file storage backend
pub const STORAGE_FILE_EXTENSION: &str = "json";

// Export
/// Date format embedded in export file names
pub const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

// Application paths
pub const APP_DIR_NAME: &str = "medfind-drafts";
pub const LOCAL_CONFIG_FILE: &str = "medfind-drafts.toml";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "medfind-drafts.log";

// CLI messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const SUCCESS_DRAFT_SAVED: &str = "✅ Draft saved";
pub const SUCCESS_DRAFT_UPDATED: &str = "✅ Draft updated";
pub const SUCCESS_DRAFT_REMOVED: &str = "✅ Draft removed";
pub const SUCCESS_DRAFTS_CLEARED: &str = "✅ All drafts cleared";
pub const SUCCESS_DRAFTS_EXPORTED: &str = "✅ Drafts exported";
pub const SUCCESS_DRAFTS_IMPORTED: &str = "✅ Drafts imported";
pub const ERROR_DRAFT_NOT_FOUND: &str = "❌ Draft not found";
pub const ERROR_IMPORT_FAILED: &str = "❌ Import failed: file is not a JSON array of drafts";
pub const WARN_PERSIST_FAILED: &str = "⚠️ Changes kept in memory but could not be written to storage";
