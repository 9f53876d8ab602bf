// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Streak calculation over distinct workout dates.

use chrono::{Days, NaiveDate};

use crate::models::StreakSummary;

/// Compute current and longest streaks from distinct workout dates.
///
/// `dates` must be distinct and sorted newest-first, the order the store
/// returns them in. The current streak is alive when the most recent
/// workout is today or yesterday; a workout today is not required to keep
/// yesterday's streak counted.
pub fn compute(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    debug_assert!(
        dates.windows(2).all(|w| w[0] > w[1]),
        "dates must be distinct and newest-first"
    );

    if dates.is_empty() {
        return StreakSummary::default();
    }

    let yesterday = today - Days::new(1);
    let mut current = 0u32;
    if dates[0] == today || dates[0] == yesterday {
        current = 1;
        for window in dates.windows(2) {
            if window[1] + Days::new(1) == window[0] {
                current += 1;
            } else {
                break;
            }
        }
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for window in dates.windows(2) {
        if window[1] + Days::new(1) == window[0] {
            run += 1;
        } else {
            run = 1;
        }
        longest = longest.max(run);
    }

    StreakSummary { current, longest }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_workouts_means_no_streak() {
        let summary = compute(&[], date("2026-08-30"));
        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 0);
    }

    #[test]
    fn test_run_ending_today() {
        let dates = [date("2026-08-30"), date("2026-08-29"), date("2026-08-28")];
        let summary = compute(&dates, date("2026-08-30"));
        assert_eq!(summary.current, 3);
        assert_eq!(summary.longest, 3);
    }

    #[test]
    fn test_yesterday_keeps_streak_alive() {
        let dates = [date("2026-08-29"), date("2026-08-28")];
        let summary = compute(&dates, date("2026-08-30"));
        assert_eq!(summary.current, 2);
        assert_eq!(summary.longest, 2);
    }

    #[test]
    fn test_five_day_run_ending_yesterday() {
        let dates = [
            date("2026-08-29"),
            date("2026-08-28"),
            date("2026-08-27"),
            date("2026-08-26"),
            date("2026-08-25"),
        ];
        let summary = compute(&dates, date("2026-08-30"));
        assert_eq!(summary.current, 5);
        assert_eq!(summary.longest, 5);
    }

    #[test]
    fn test_gap_of_two_days_resets_current() {
        let dates = [date("2026-08-27"), date("2026-08-26")];
        let summary = compute(&dates, date("2026-08-30"));
        assert_eq!(summary.current, 0);
        assert_eq!(summary.longest, 2);
    }

    #[test]
    fn test_longest_can_exceed_current() {
        let dates = [
            date("2026-08-30"),
            date("2026-08-25"),
            date("2026-08-24"),
            date("2026-08-23"),
            date("2026-08-22"),
        ];
        let summary = compute(&dates, date("2026-08-30"));
        assert_eq!(summary.current, 1);
        assert_eq!(summary.longest, 4);
    }

    #[test]
    fn test_single_workout_today() {
        let summary = compute(&[date("2026-08-30")], date("2026-08-30"));
        assert_eq!(summary.current, 1);
        assert_eq!(summary.longest, 1);
    }

    #[test]
    fn test_streak_spans_month_boundary() {
        let dates = [date("2026-09-01"), date("2026-08-31"), date("2026-08-30")];
        let summary = compute(&dates, date("2026-09-01"));
        assert_eq!(summary.current, 3);
        assert_eq!(summary.longest, 3);
    }
}
