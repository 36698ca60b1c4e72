use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::DraftError;
use crate::constants::{DRAFT_ID_PREFIX, DRAFT_ID_SUFFIX_LEN};

/// Identifier of a draft, unique within its namespace
pub type DraftId = String;

/// Category of a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftKind {
    /// Medicine availability report being written
    Report,
    /// Saved search criteria
    Search,
    /// Any other form
    Form,
}

impl DraftKind {
    pub const ALL: [DraftKind; 3] = [DraftKind::Report, DraftKind::Search, DraftKind::Form];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftKind::Report => "report",
            DraftKind::Search => "search",
            DraftKind::Form => "form",
        }
    }
}

impl fmt::Display for DraftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for DraftKind {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "report" => Ok(DraftKind::Report),
            "search" => Ok(DraftKind::Search),
            "form" => Ok(DraftKind::Form),
            other => Err(DraftError::UnknownKind(other.to_string())),
        }
    }
}

/// A timestamped, typed snapshot of caller data.
///
/// Serialized as `{"id", "timestamp", "data", "type", "title"?}`, which is also
/// the layout of exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    /// Creation or last update time, epoch milliseconds
    pub timestamp: i64,
    pub data: Value,
    #[serde(rename = "type")]
    pub kind: DraftKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Draft {
    pub fn new(id: DraftId, timestamp: i64, data: Value, kind: DraftKind, title: Option<String>) -> Self {
        Self {
            id,
            timestamp,
            data,
            kind,
            title,
        }
    }

    /// Title for display, falling back to the draft kind
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(self.kind.as_str())
    }
}

/// Generate an id of the form `draft_<millis>_<suffix>`.
///
/// The suffix is lowercase alphanumeric, taken from a random UUID.
pub fn generate_draft_id(timestamp_millis: i64) -> DraftId {
    let uuid = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "{}_{}_{}",
        DRAFT_ID_PREFIX,
        timestamp_millis,
        &uuid[..DRAFT_ID_SUFFIX_LEN]
    )
}

/// Whether `id` has the shape produced by [`generate_draft_id`].
pub fn is_valid_draft_id(id: &str) -> bool {
    let mut parts = id.splitn(3, '_');
    let (Some(prefix), Some(millis), Some(suffix)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };

    prefix == DRAFT_ID_PREFIX
        && !millis.is_empty()
        && millis.chars().all(|c| c.is_ascii_digit())
        && !suffix.is_empty()
        && suffix.chars().all(|c| c.is_ascii_alphanumeric())
}
