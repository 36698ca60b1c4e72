use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matches_search;

/// A user review of a pharmacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub pharmacy_id: String,
    pub author: String,
    /// Star rating, 1 to 5
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub helpful_count: u32,
}

/// Sort orders offered by the review list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    HighestRated,
    LowestRated,
    MostHelpful,
}

/// Filter and sort options for reviews.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewQuery {
    /// Keep reviews rated at least this many stars
    pub min_rating: Option<u8>,
    /// Keep reviews of a single pharmacy
    pub pharmacy_id: Option<String>,
    /// Case-insensitive text matched against author and comment
    pub search: Option<String>,
    pub sort: ReviewSort,
}

/// Apply `query` to `reviews`.
pub fn filter_reviews(reviews: &[Review], query: &ReviewQuery) -> Vec<Review> {
    let mut result: Vec<Review> = reviews
        .iter()
        .filter(|r| query.min_rating.map_or(true, |min| r.rating >= min))
        .filter(|r| query.pharmacy_id.as_deref().map_or(true, |p| r.pharmacy_id == p))
        .filter(|r| {
            query
                .search
                .as_deref()
                .map_or(true, |s| matches_search(s, [r.author.as_str(), r.comment.as_str()]))
        })
        .cloned()
        .collect();

    match query.sort {
        ReviewSort::Newest => result.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        ReviewSort::Oldest => result.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        ReviewSort::HighestRated => result.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ReviewSort::LowestRated => result.sort_by(|a, b| a.rating.cmp(&b.rating)),
        ReviewSort::MostHelpful => result.sort_by(|a, b| b.helpful_count.cmp(&a.helpful_count)),
    }

    result
}

/// Mean star rating, `None` for an empty slice.
pub fn average_rating(reviews: &[Review]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
    Some(f64::from(total) / reviews.len() as f64)
}

/// Number of reviews per star, index 0 holding 1-star reviews.
///
/// Ratings outside 1..=5 are clamped into range.
pub fn rating_histogram(reviews: &[Review]) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for review in reviews {
        let stars = review.rating.clamp(1, 5);
        counts[usize::from(stars - 1)] += 1;
    }
    counts
}
