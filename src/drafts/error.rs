/// Errors surfaced by the fallible draft helpers.
///
/// The core store operations never return these: they log and degrade instead.
/// Typed payload helpers, export to disk and import parsing use them.
#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("Unknown draft type: {0:?} (expected report, search or form)")]
    UnknownKind(String),

    #[error("Failed to serialize draft payload: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Draft '{id}' payload does not match the requested type: {source}")]
    Payload {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Import is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Import must be a JSON array of drafts, got {0}")]
    NotAnArray(&'static str),

    #[error("Invalid draft record: {0}")]
    InvalidRecord(#[source] serde_json::Error),

    #[error("Duplicate draft id '{0}'")]
    DuplicateId(String),

    #[error("Draft '{id}' has an out-of-range timestamp {timestamp}")]
    InvalidTimestamp { id: String, timestamp: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
