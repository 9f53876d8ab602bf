// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for time-window cutoffs.
//!
//! "weekly"/"monthly" are rolling windows (last 7/30 days), not calendar
//! periods. That matches the observable behavior of the API and is kept
//! deliberately.

use chrono::{DateTime, Days, NaiveTime, Utc};

use crate::models::leaderboard::Period;
use crate::models::stats::StatsPeriod;

/// Start of the given instant's UTC calendar day.
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Lower bound of a leaderboard period, `None` for all-time.
pub fn period_cutoff(period: Period, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    match period {
        Period::Daily => Some(start_of_day(now)),
        Period::Weekly => now.checked_sub_days(Days::new(7)),
        Period::Monthly => now.checked_sub_days(Days::new(30)),
        Period::AllTime => None,
    }
}

/// Lower bound of a workout-stats period.
pub fn stats_cutoff(period: StatsPeriod, now: DateTime<Utc>) -> DateTime<Utc> {
    let days_back = |n| now.checked_sub_days(Days::new(n)).unwrap_or(now);
    match period {
        StatsPeriod::Today => start_of_day(now),
        StatsPeriod::Week => days_back(7),
        StatsPeriod::Month => days_back(30),
        StatsPeriod::Year => days_back(365),
    }
}
