//! Export and import of draft collections
//!
//! Exports are the persisted array, pretty-printed. Imports accept any JSON
//! array whose elements are draft records with unique ids and timestamps
//! within `0..=MAX_DRAFT_TIMESTAMP`.

use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;

use super::{Draft, DraftError};
use crate::constants::MAX_DRAFT_TIMESTAMP;
use crate::utils::datetime;

/// Serialized draft collection ready to be written to a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportBlob {
    /// Suggested file name: `<namespace>_drafts_<YYYY-MM-DD>.json`
    pub file_name: String,
    /// Pretty-printed JSON array of drafts
    pub contents: String,
}

/// Suggested export file name for `namespace` on the current local date.
pub fn export_file_name(namespace: &str) -> String {
    format!("{}_drafts_{}.json", namespace, datetime::format_export_date())
}

pub(crate) fn export_drafts(namespace: &str, drafts: &[Draft]) -> ExportBlob {
    // Serializing plain drafts (string keys, JSON values) cannot fail
    let contents = serde_json::to_string_pretty(drafts).unwrap_or_else(|_| "[]".to_string());
    ExportBlob {
        file_name: export_file_name(namespace),
        contents,
    }
}

/// Parse an imported document into a draft collection.
///
/// Fails unless the document is a JSON array of draft records with unique ids
/// and in-range timestamps. The result keeps at most `max_drafts` entries, in
/// file order.
pub fn parse_import(text: &str, max_drafts: usize) -> Result<Vec<Draft>, DraftError> {
    let value: Value = serde_json::from_str(text).map_err(DraftError::InvalidJson)?;

    if !value.is_array() {
        return Err(DraftError::NotAnArray(json_type_name(&value)));
    }

    let mut drafts: Vec<Draft> = serde_json::from_value(value).map_err(DraftError::InvalidRecord)?;
    check_collection(&drafts)?;

    drafts.truncate(max_drafts);
    Ok(drafts)
}

/// Ids must be unique and timestamps within `0..=MAX_DRAFT_TIMESTAMP`.
pub(crate) fn check_collection(drafts: &[Draft]) -> Result<(), DraftError> {
    let mut seen = HashSet::new();
    for draft in drafts {
        if !seen.insert(draft.id.as_str()) {
            return Err(DraftError::DuplicateId(draft.id.clone()));
        }
        if !(0..=MAX_DRAFT_TIMESTAMP).contains(&draft.timestamp) {
            return Err(DraftError::InvalidTimestamp {
                id: draft.id.clone(),
                timestamp: draft.timestamp,
            });
        }
    }
    Ok(())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_arrays() {
        assert!(matches!(parse_import(r#"{"a":1}"#, 10), Err(DraftError::NotAnArray("an object"))));
        assert!(matches!(parse_import(r#""drafts""#, 10), Err(DraftError::NotAnArray("a string"))));
        assert!(matches!(parse_import("not json", 10), Err(DraftError::InvalidJson(_))));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let text = r#"[
            {"id": "draft_1_a", "timestamp": 1, "data": null, "type": "form"},
            {"id": "draft_1_a", "timestamp": 2, "data": null, "type": "form"}
        ]"#;
        assert!(matches!(parse_import(text, 10), Err(DraftError::DuplicateId(id)) if id == "draft_1_a"));
    }

    #[test]
    fn rejects_out_of_range_timestamps() {
        for timestamp in [i64::MAX, MAX_DRAFT_TIMESTAMP + 1, -1] {
            let text = format!(r#"[{{"id": "draft_1_a", "timestamp": {timestamp}, "data": null, "type": "form"}}]"#);
            assert!(
                matches!(parse_import(&text, 10), Err(DraftError::InvalidTimestamp { timestamp: t, .. }) if t == timestamp),
                "timestamp {timestamp} should be rejected"
            );
        }

        let text = format!(r#"[{{"id": "draft_1_a", "timestamp": {MAX_DRAFT_TIMESTAMP}, "data": null, "type": "form"}}]"#);
        assert_eq!(parse_import(&text, 10).unwrap()[0].timestamp, MAX_DRAFT_TIMESTAMP);
    }

    #[test]
    fn truncates_to_max() {
        let text = r#"[
            {"id": "draft_3_c", "timestamp": 3, "data": 3, "type": "search"},
            {"id": "draft_2_b", "timestamp": 2, "data": 2, "type": "report", "title": "B"},
            {"id": "draft_1_a", "timestamp": 1, "data": 1, "type": "form"}
        ]"#;
        let drafts = parse_import(text, 2).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[1].title.as_deref(), Some("B"));
    }

    #[test]
    fn empty_array_is_accepted() {
        assert!(parse_import("[]", 10).unwrap().is_empty());
    }
}
