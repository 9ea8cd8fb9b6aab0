//! Splitting a date range into bounded request windows.

use chrono::{Days, NaiveDate};

/// Upper bound on the width of a single activities request.
pub const FETCH_WINDOW_DAYS: u64 = 90;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchWindow {
    pub oldest: NaiveDate,
    pub newest: NaiveDate,
}

/// Windows covering `[start, end]` inclusive.
///
/// Each window spans `[s, min(s + width, end)]` and the next one starts the
/// day after. A single-day range yields one window; `start > end` yields none.
pub fn fetch_windows(start: NaiveDate, end: NaiveDate, width_days: u64) -> Vec<FetchWindow> {
    let mut windows = Vec::new();
    let mut current = start;
    while current <= end {
        let newest = current
            .checked_add_days(Days::new(width_days))
            .map_or(end, |d| d.min(end));
        windows.push(FetchWindow {
            oldest: current,
            newest,
        });
        match newest.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    windows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn short_range_is_one_window() {
        let w = fetch_windows(d("2024-01-01"), d("2024-01-15"), FETCH_WINDOW_DAYS);
        assert_eq!(
            w,
            vec![FetchWindow {
                oldest: d("2024-01-01"),
                newest: d("2024-01-15")
            }]
        );
    }

    #[test]
    fn long_range_is_chunked_without_overlap() {
        let w = fetch_windows(d("2024-01-01"), d("2024-07-18"), FETCH_WINDOW_DAYS);
        assert_eq!(w.len(), 3);
        assert_eq!(w[0].oldest, d("2024-01-01"));
        assert_eq!(w[0].newest, d("2024-03-31"));
        assert_eq!(w[1].oldest, d("2024-04-01"));
        assert_eq!(w[1].newest, d("2024-06-30"));
        assert_eq!(w[2].oldest, d("2024-07-01"));
        assert_eq!(w[2].newest, d("2024-07-18"));
    }

    #[test]
    fn single_day_range_still_fetches() {
        let w = fetch_windows(d("2024-05-05"), d("2024-05-05"), FETCH_WINDOW_DAYS);
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].oldest, w[0].newest);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(fetch_windows(d("2024-05-06"), d("2024-05-05"), FETCH_WINDOW_DAYS).is_empty());
    }
}
