//! Rating summaries: fetched from the backend or derived from comments.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use storefront_core::ProductId;

use crate::product::Comment;

/// Star values a rating can be bucketed into, highest first.
const STARS_DESC: [u8; 5] = [5, 4, 3, 2, 1];

/// Average, vote count and per-star distribution for one product.
///
/// Wire shape: `{"avg": 4.06, "total": 29, "counts": {"1": 0, ..., "5": 12}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    #[serde(default)]
    pub avg: f64,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub counts: BTreeMap<String, u64>,
}

/// One bar of the star distribution chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistributionRow {
    pub star: u8,
    pub count: u64,
    /// Share of all votes, rounded to a whole percent.
    pub percent: u8,
}

impl Default for RatingSummary {
    fn default() -> Self {
        Self::empty()
    }
}

impl RatingSummary {
    /// Summary with no votes and all five buckets present.
    pub fn empty() -> Self {
        Self {
            avg: 0.0,
            total: 0,
            counts: STARS_DESC
                .iter()
                .rev()
                .map(|s| (s.to_string(), 0))
                .collect(),
        }
    }

    /// Derive a summary from raw comments.
    ///
    /// Every comment with a valid rating counts, whether or not it has text.
    /// Each rating lands in the bucket of its nearest whole star.
    pub fn from_comments<'a, I>(comments: I) -> Self
    where
        I: IntoIterator<Item = &'a Comment>,
    {
        let mut summary = Self::empty();
        let mut sum = 0.0;

        for rating in comments.into_iter().filter_map(Comment::valid_rating) {
            let star = (rating.round() as u8).clamp(1, 5);
            *summary.counts.entry(star.to_string()).or_insert(0) += 1;
            summary.total += 1;
            sum += rating;
        }

        if summary.total > 0 {
            summary.avg = sum / summary.total as f64;
        }
        summary
    }

    /// Backend summary when present, otherwise derived from `comments`.
    pub fn resolve(fetched: Option<RatingSummary>, comments: &[Comment]) -> Self {
        fetched.unwrap_or_else(|| Self::from_comments(comments))
    }

    /// Derive summaries for a whole `/comments/{category}` document.
    pub fn for_comment_document(
        document: &HashMap<ProductId, Vec<Comment>>,
    ) -> HashMap<ProductId, RatingSummary> {
        document
            .iter()
            .map(|(id, comments)| (id.clone(), Self::from_comments(comments)))
            .collect()
    }

    pub fn count_for(&self, star: u8) -> u64 {
        self.counts.get(&star.to_string()).copied().unwrap_or(0)
    }

    /// Sum of all star buckets.
    pub fn counted_votes(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Distribution rows from 5 stars down to 1.
    pub fn distribution(&self) -> Vec<DistributionRow> {
        STARS_DESC
            .iter()
            .map(|&star| {
                let count = self.count_for(star);
                let percent = if self.total == 0 {
                    0
                } else {
                    ((count as f64 / self.total as f64) * 100.0).round() as u8
                };
                DistributionRow { star, count, percent }
            })
            .collect()
    }
}

/// Number of star glyphs shown for an average: a half star rounds up.
pub fn star_count(avg: f64) -> usize {
    if !avg.is_finite() || avg <= 0.0 {
        return 0;
    }
    let full = avg.floor();
    let half = if avg - full >= 0.5 { 1.0 } else { 0.0 };
    (full + half).min(5.0) as usize
}

/// Average rounded to one decimal for display.
pub fn display_average(avg: f64) -> f64 {
    (avg * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::RawRating;
    use serde_json::json;

    fn rated(rating: f64, text: &str) -> Comment {
        Comment {
            user: "u".to_string(),
            rating: Some(RawRating::from(rating)),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn derives_summary_from_mixed_comments() {
        let comments: Vec<Comment> = serde_json::from_value(json!([
            { "user": "a", "rating": 5, "text": "a" },
            { "user": "b", "rating": 3, "text": "" },
            { "user": "c", "rating": "x", "text": "b" }
        ]))
        .unwrap();

        let summary = RatingSummary::from_comments(&comments);
        assert_eq!(summary.total, 2);
        assert!((summary.avg - 4.0).abs() < 1e-9);
        assert_eq!(summary.count_for(5), 1);
        assert_eq!(summary.count_for(3), 1);
        assert_eq!(summary.count_for(4), 0);
        assert_eq!(summary.counted_votes(), summary.total);
    }

    #[test]
    fn no_valid_ratings_gives_zero_average() {
        let summary = RatingSummary::from_comments(&[rated(0.0, "x"), rated(9.0, "y")]);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.avg, 0.0);
        assert_eq!(summary.counts.len(), 5);
    }

    #[test]
    fn fractional_ratings_bucket_to_nearest_star() {
        let summary = RatingSummary::from_comments(&[rated(4.5, "a"), rated(1.2, "b")]);
        assert_eq!(summary.count_for(5), 1);
        assert_eq!(summary.count_for(1), 1);
        assert!((summary.avg - 2.85).abs() < 1e-9);
    }

    #[test]
    fn resolve_prefers_backend_summary() {
        let fetched = RatingSummary {
            avg: 4.06,
            total: 29,
            counts: BTreeMap::new(),
        };
        let resolved = RatingSummary::resolve(Some(fetched.clone()), &[rated(1.0, "a")]);
        assert_eq!(resolved, fetched);

        let derived = RatingSummary::resolve(None, &[rated(1.0, "a")]);
        assert_eq!(derived.total, 1);
    }

    #[test]
    fn backend_summary_deserializes() {
        let s: RatingSummary = serde_json::from_value(json!({
            "avg": 4.06, "total": 3, "counts": { "1": 0, "2": 1, "3": 0, "4": 1, "5": 1 }
        }))
        .unwrap();
        assert_eq!(s.count_for(2), 1);
        assert_eq!(s.counted_votes(), 3);
    }

    #[test]
    fn distribution_rows_run_from_five_to_one() {
        let summary = RatingSummary::from_comments(&[rated(5.0, "a"), rated(5.0, "b"), rated(2.0, "c")]);
        let rows = summary.distribution();
        assert_eq!(rows.iter().map(|r| r.star).collect::<Vec<_>>(), vec![5, 4, 3, 2, 1]);
        assert_eq!(rows[0], DistributionRow { star: 5, count: 2, percent: 67 });
        assert_eq!(rows[3], DistributionRow { star: 2, count: 1, percent: 33 });

        assert!(RatingSummary::empty().distribution().iter().all(|r| r.percent == 0));
    }

    #[test]
    fn per_category_document_summaries() {
        let doc: HashMap<ProductId, Vec<Comment>> = serde_json::from_value(json!({
            "ts_01": [{ "user": "a", "rating": 4 }, { "user": "b", "rating": 2 }],
            "ts_02": []
        }))
        .unwrap();
        let map = RatingSummary::for_comment_document(&doc);
        assert_eq!(map[&"ts_01".parse::<ProductId>().unwrap()].avg, 3.0);
        assert_eq!(map[&"ts_02".parse::<ProductId>().unwrap()].total, 0);
    }

    #[test]
    fn star_count_rounds_half_up() {
        assert_eq!(star_count(0.0), 0);
        assert_eq!(star_count(3.49), 3);
        assert_eq!(star_count(3.5), 4);
        assert_eq!(star_count(5.0), 5);
        assert_eq!(star_count(f64::NAN), 0);
    }

    #[test]
    fn display_average_keeps_one_decimal() {
        assert_eq!(display_average(4.06), 4.1);
        assert_eq!(display_average(3.0), 3.0);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: derived buckets add up to the total and the average
            /// equals the count-weighted mean when ratings are whole stars.
            #[test]
            fn derived_counts_match_total_and_weighted_mean(
                stars in proptest::collection::vec(1u8..=5, 1..60)
            ) {
                let comments: Vec<Comment> = stars
                    .iter()
                    .map(|s| rated(*s as f64, ""))
                    .collect();
                let summary = RatingSummary::from_comments(&comments);

                prop_assert_eq!(summary.counted_votes(), summary.total);
                prop_assert_eq!(summary.total, stars.len() as u64);

                let weighted: u64 = (1..=5u8).map(|s| s as u64 * summary.count_for(s)).sum();
                let mean = weighted as f64 / summary.total as f64;
                prop_assert!((summary.avg - mean).abs() < 1e-9);
            }

            /// Property: invalid ratings never change the summary.
            #[test]
            fn invalid_ratings_are_ignored(
                valid in proptest::collection::vec(1.0f64..=5.0, 0..20),
                invalid in proptest::collection::vec(prop_oneof![-100.0f64..0.99, 5.01f64..100.0], 0..20)
            ) {
                let clean: Vec<Comment> = valid.iter().map(|r| rated(*r, "t")).collect();
                let mut noisy = clean.clone();
                noisy.extend(invalid.iter().map(|r| rated(*r, "t")));

                prop_assert_eq!(
                    RatingSummary::from_comments(&clean),
                    RatingSummary::from_comments(&noisy)
                );
            }
        }
    }
}
