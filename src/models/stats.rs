//! Per-user workout statistics read models.

use serde::{Deserialize, Serialize};

/// Estimated calories burned per rep.
pub const CALORIES_PER_REP: f64 = 0.29;

/// Time window for workout statistics. Distinct from the leaderboard
/// [`Period`](crate::models::Period): stats also offer a yearly window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsPeriod {
    Today,
    Week,
    Month,
    Year,
}

impl StatsPeriod {
    /// Parse a period query value, defaulting to a week like the API.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "today" => StatsPeriod::Today,
            "month" => StatsPeriod::Month,
            "year" => StatsPeriod::Year,
            _ => StatsPeriod::Week,
        }
    }
}

/// Aggregates over a user's sessions within a period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutStats {
    pub total_reps: i64,
    pub total_workouts: i64,
    /// Seconds
    pub total_time: i64,
    /// Highest total_reps in a single session
    pub best_session: i64,
    pub average_reps: f64,
    pub total_calories: f64,
}

/// Lifetime maxima for a user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecords {
    pub max_reps_in_session: i64,
    pub max_reps_in_set: i64,
    /// Seconds
    pub longest_session: i64,
    pub total_lifetime_reps: i64,
}

/// Current and longest consecutive-day workout streaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
}
