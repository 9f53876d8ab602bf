// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user workout statistics, records, and streaks.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{PersonalRecords, StatsPeriod, StreakSummary, WorkoutStats, CALORIES_PER_REP};
use crate::services::streak;
use crate::store::WorkoutStore;
use crate::time_utils::stats_cutoff;

/// Aggregates a user's session history into stats views.
#[derive(Clone)]
pub struct StatsService {
    store: Arc<dyn WorkoutStore>,
}

impl StatsService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Totals for the period, with derived averages and calories.
    pub async fn workout_stats(&self, user_id: Uuid, period: StatsPeriod) -> Result<WorkoutStats> {
        let cutoff = stats_cutoff(period, Utc::now());
        let totals = self.store.workout_totals(user_id, Some(cutoff)).await?;
        let average_reps = if totals.total_sessions == 0 {
            0.0
        } else {
            totals.total_reps as f64 / totals.total_sessions as f64
        };
        Ok(WorkoutStats {
            total_reps: totals.total_reps,
            total_workouts: totals.total_sessions,
            total_time: totals.total_duration,
            best_session: totals.best_session,
            average_reps,
            total_calories: totals.total_reps as f64 * CALORIES_PER_REP,
        })
    }

    /// Lifetime bests across all sessions.
    pub async fn personal_records(&self, user_id: Uuid) -> Result<PersonalRecords> {
        let totals = self.store.workout_totals(user_id, None).await?;
        let max_set_reps = self.store.max_set_reps(user_id).await?;
        Ok(PersonalRecords {
            max_reps_in_session: totals.best_session,
            max_reps_in_set: max_set_reps,
            longest_session: totals.longest_session,
            total_lifetime_reps: totals.total_reps,
        })
    }

    /// Current and longest daily workout streaks.
    pub async fn streaks(&self, user_id: Uuid) -> Result<StreakSummary> {
        let dates = self.store.workout_dates(user_id).await?;
        Ok(streak::compute(&dates, Utc::now().date_naive()))
    }
}
