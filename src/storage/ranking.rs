//! Trending order.
//!
//! Records are ranked by search count, highest first. Ties go to the record
//! whose count changed most recently, then to the alphabetically smaller term
//! so the order is stable across reloads.

use super::models::TrendingRecord;
use std::cmp::Ordering;

/// Number of entries shown in the trending strip.
pub const DEFAULT_TRENDING_LIMIT: usize = 5;

/// Compares two records in trending order.
#[must_use]
pub fn compare(a: &TrendingRecord, b: &TrendingRecord) -> Ordering {
    b.count
        .cmp(&a.count)
        .then_with(|| b.updated_at.cmp(&a.updated_at))
        .then_with(|| a.search_term.cmp(&b.search_term))
}

/// Sorts records in trending order, in place.
pub fn sort_by_count(records: &mut [TrendingRecord]) {
    records.sort_by(compare);
}

/// Returns at most `limit` records in trending order.
#[must_use]
pub fn top_n(mut records: Vec<TrendingRecord>, limit: usize) -> Vec<TrendingRecord> {
    sort_by_count(&mut records);
    records.truncate(limit);
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(term: &str, count: u32, updated_at: i64) -> TrendingRecord {
        TrendingRecord {
            id: term.to_string(),
            search_term: term.to_string(),
            count,
            poster_url: String::new(),
            movie_id: 0,
            created_at: 0,
            updated_at,
        }
    }

    #[test]
    fn highest_count_first_then_most_recent() {
        let records = vec![
            record("alien", 2, 10),
            record("batman", 9, 1),
            record("cars", 2, 30),
            record("dune", 5, 5),
        ];

        let terms: Vec<String> = top_n(records, 10).into_iter().map(|r| r.search_term).collect();
        assert_eq!(terms, vec!["batman", "dune", "cars", "alien"]);
    }

    #[test]
    fn limit_truncates() {
        let records = (0..8).map(|i| record(&format!("term-{i}"), i, 0)).collect();
        let top = top_n(records, DEFAULT_TRENDING_LIMIT);

        assert_eq!(top.len(), 5);
        assert_eq!(top[0].count, 7);
        assert_eq!(top[4].count, 3);
    }
}
