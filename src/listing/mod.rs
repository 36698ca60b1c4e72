//! Filtering and sorting for the review list and the report history.
//!
//! These are pure functions over in-memory records: they never mutate their
//! input and return a new vector. Sorting is stable, so records comparing
//! equal keep their original relative order.

pub mod reports;
pub mod reviews;

pub use reports::{filter_reports, status_counts, Report, ReportQuery, ReportSort, ReportStatus, StatusCounts};
pub use reviews::{average_rating, filter_reviews, rating_histogram, Review, ReviewQuery, ReviewSort};

/// Case-insensitive substring match of `needle` against any of `haystacks`.
///
/// An empty or whitespace-only needle matches everything.
pub(crate) fn matches_search<'a>(needle: &str, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks.into_iter().any(|h| h.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_ignores_case_and_padding() {
        assert!(matches_search("  IBU ", ["Ibuprofen 200mg"]));
        assert!(matches_search("", ["anything"]));
        assert!(!matches_search("para", ["Ibuprofen", "Central Pharmacy"]));
    }
}
