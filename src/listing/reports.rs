use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matches_search;

/// Review state of an availability report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Pending,
    Verified,
    Rejected,
}

impl ReportStatus {
    fn rank(self) -> u8 {
        match self {
            ReportStatus::Pending => 0,
            ReportStatus::Verified => 1,
            ReportStatus::Rejected => 2,
        }
    }
}

/// A medicine availability report submitted by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    pub medicine: String,
    pub pharmacy: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Sort orders offered by the report history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSort {
    #[default]
    Newest,
    Oldest,
    /// Alphabetical by medicine name, case-insensitive
    Medicine,
    /// Pending first, then verified, then rejected
    Status,
}

/// Filter and sort options for the report history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub status: Option<ReportStatus>,
    /// Case-insensitive text matched against medicine, pharmacy and note
    pub search: Option<String>,
    pub sort: ReportSort,
}

/// Apply `query` to `reports`.
pub fn filter_reports(reports: &[Report], query: &ReportQuery) -> Vec<Report> {
    let mut result: Vec<Report> = reports
        .iter()
        .filter(|r| query.status.map_or(true, |s| r.status == s))
        .filter(|r| {
            query.search.as_deref().map_or(true, |s| {
                matches_search(
                    s,
                    [r.medicine.as_str(), r.pharmacy.as_str(), r.note.as_deref().unwrap_or("")],
                )
            })
        })
        .cloned()
        .collect();

    match query.sort {
        ReportSort::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ReportSort::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ReportSort::Medicine => result.sort_by_key(|r| r.medicine.to_lowercase()),
        ReportSort::Status => result.sort_by_key(|r| r.status.rank()),
    }

    result
}

/// Per-status totals shown above the report history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub verified: usize,
    pub rejected: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.pending + self.verified + self.rejected
    }
}

pub fn status_counts(reports: &[Report]) -> StatusCounts {
    reports.iter().fold(StatusCounts::default(), |mut counts, r| {
        match r.status {
            ReportStatus::Pending => counts.pending += 1,
            ReportStatus::Verified => counts.verified += 1,
            ReportStatus::Rejected => counts.rejected += 1,
        }
        counts
    })
}
