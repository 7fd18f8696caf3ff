//! Pure grouping and summation over an in-memory expense snapshot.
//!
//! Both functions take whatever row collection the caller has on hand,
//! typically the full unfiltered set but equally a filter result, and
//! are total on empty input.

use crate::expense::ExpenseRow;
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashMap};

/// Trailing window used by the "recent spend" chart.
pub const DEFAULT_WINDOW_DAYS: u64 = 30;

/// Sum amounts per distinct category name present in the input.
///
/// Categories with no expenses in the input are simply absent from the
/// map, never emitted with a zero total. Iteration order is up to the
/// caller to sort for display.
pub fn by_category(rows: &[ExpenseRow]) -> HashMap<String, f64> {
    let mut totals = HashMap::new();
    for row in rows {
        *totals.entry(row.category.clone()).or_insert(0.0) += row.amount;
    }
    totals
}

/// Sum amounts per date over a trailing window ending at `today`.
///
/// Rows dated `today - window_days` or later are kept; there is no upper
/// bound, so a future-dated row also passes. Output is grouped by exact
/// date and ordered ascending.
pub fn by_recent_window(
    rows: &[ExpenseRow],
    today: NaiveDate,
    window_days: u64,
) -> Vec<(NaiveDate, f64)> {
    let cutoff = today - Duration::days(window_days as i64);

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows.iter().filter(|row| row.date >= cutoff) {
        *totals.entry(row.date).or_insert(0.0) += row.amount;
    }

    totals.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn row(amount: f64, category: &str, d: NaiveDate) -> ExpenseRow {
        ExpenseRow {
            id: 0,
            amount,
            category: category.to_string(),
            date: d,
            note: String::new(),
        }
    }

    #[test]
    fn test_by_category_scenario() {
        let rows = vec![
            row(10.0, "Food", date(2024, 1, 1)),
            row(20.0, "Food", date(2024, 1, 2)),
            row(5.0, "Transport", date(2024, 1, 2)),
        ];

        let totals = by_category(&rows);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals["Food"], 30.0);
        assert_eq!(totals["Transport"], 5.0);
    }

    #[test]
    fn test_by_category_empty_input() {
        assert!(by_category(&[]).is_empty());
    }

    #[test]
    fn test_by_category_additivity_over_partition() {
        let rows = vec![
            row(10.0, "Food", date(2024, 1, 1)),
            row(20.0, "Food", date(2024, 1, 2)),
            row(5.0, "Transport", date(2024, 1, 2)),
            row(7.5, "Rent", date(2024, 1, 3)),
            row(2.5, "Food", date(2024, 1, 4)),
        ];

        let whole = by_category(&rows);

        // Sum the per-subset maps of an arbitrary disjoint partition.
        let (left, right) = rows.split_at(2);
        let mut recombined = by_category(left);
        for (name, total) in by_category(right) {
            *recombined.entry(name).or_insert(0.0) += total;
        }

        assert_eq!(whole, recombined);
    }

    #[test]
    fn test_by_recent_window_cutoff_is_inclusive() {
        let today = date(2024, 3, 31);
        let cutoff = date(2024, 3, 1); // today - 30 days

        let rows = vec![
            row(1.0, "Food", cutoff - Duration::days(1)),
            row(2.0, "Food", cutoff),
            row(3.0, "Food", today),
        ];

        let totals = by_recent_window(&rows, today, 30);
        assert_eq!(totals, vec![(cutoff, 2.0), (today, 3.0)]);
    }

    #[test]
    fn test_by_recent_window_future_rows_pass() {
        let today = date(2024, 3, 31);
        let future = date(2024, 4, 15);

        let rows = vec![row(9.0, "Food", future)];
        let totals = by_recent_window(&rows, today, 30);
        assert_eq!(totals, vec![(future, 9.0)]);
    }

    #[test]
    fn test_by_recent_window_groups_and_sorts() {
        let today = date(2024, 1, 31);
        let rows = vec![
            row(3.0, "Food", date(2024, 1, 20)),
            row(1.0, "Food", date(2024, 1, 10)),
            row(2.0, "Transport", date(2024, 1, 10)),
        ];

        let totals = by_recent_window(&rows, today, DEFAULT_WINDOW_DAYS);
        assert_eq!(
            totals,
            vec![(date(2024, 1, 10), 3.0), (date(2024, 1, 20), 3.0)]
        );
    }

    #[test]
    fn test_by_recent_window_empty_input() {
        assert!(by_recent_window(&[], date(2024, 1, 1), 30).is_empty());
    }
}
