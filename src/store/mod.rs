// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Storage layer.
//!
//! Every service takes a [`WorkoutStore`] by constructor injection, so the
//! progression and ranking logic can be exercised against [`MemoryStore`]
//! without a database. [`PgStore`] is the production implementation.

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    ChallengeTask, NewSession, NewSetResult, Program, ScoreRow, TaskCounts, WorkoutSession,
};

/// Session aggregates for the stats reads.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutTotals {
    pub total_sessions: i64,
    pub total_reps: i64,
    /// Seconds
    pub total_duration: i64,
    /// Highest total_reps in one session
    pub best_session: i64,
    /// Longest total_duration in one session
    pub longest_session: i64,
}

/// Narrow relational-store boundary used by the engine.
///
/// All counter mutations are additive; the only conditional statement is
/// the task-progress upsert, which atomically reports whether the row was
/// already completed so score grants stay idempotent.
#[async_trait]
pub trait WorkoutStore: Send + Sync {
    // ─── Programs ────────────────────────────────────────────────

    /// Fetch a program by id, `None` if missing or soft-deleted.
    async fn get_program(&self, id: Uuid) -> Result<Option<Program>>;

    /// Bump the program's attempted-use counter.
    async fn increment_program_usage(&self, id: Uuid) -> Result<()>;

    // ─── Sessions ────────────────────────────────────────────────

    /// Persist a session header; the store assigns id and created_at.
    async fn insert_session(&self, session: &NewSession) -> Result<WorkoutSession>;

    /// Persist set results for a session, in the given order.
    async fn insert_set_results(&self, session_id: Uuid, sets: &[NewSetResult]) -> Result<()>;

    // ─── Challenge progression ───────────────────────────────────

    /// Fetch a challenge task by id, `None` if missing or soft-deleted.
    async fn get_task(&self, id: Uuid) -> Result<Option<ChallengeTask>>;

    /// Whether any task-progress row exists for (user, challenge).
    async fn has_task_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool>;

    /// Mark a task completed for a user, bumping `attempts` if the row
    /// already exists. Returns whether the row was already completed
    /// before this call.
    async fn upsert_task_progress(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        challenge_id: Uuid,
        score: i32,
    ) -> Result<bool>;

    /// Non-deleted task total and this user's completed count.
    async fn challenge_task_counts(&self, user_id: Uuid, challenge_id: Uuid) -> Result<TaskCounts>;

    /// Whether the user already has a 100%-progress row for the challenge.
    async fn challenge_completed(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool>;

    /// Upsert the user's challenge progress to 100%, stamping completed_at.
    async fn upsert_challenge_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<()>;

    async fn increment_challenge_participants(&self, challenge_id: Uuid) -> Result<()>;

    async fn increment_challenge_completions(&self, challenge_id: Uuid) -> Result<()>;

    // ─── Scores ──────────────────────────────────────────────────

    async fn increment_user_score(&self, user_id: Uuid, points: i32) -> Result<()>;

    // ─── Aggregate reads ─────────────────────────────────────────

    /// Summed reps per user for sessions at or after `since` (all sessions
    /// when `None`), joined to identity, non-deleted users only. Unranked
    /// and unordered; the ranking engine sorts.
    async fn rep_totals(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ScoreRow>>;

    /// Per-user challenge progress values for a challenge, joined to
    /// identity, non-deleted users only.
    async fn challenge_progress_totals(&self, challenge_id: Uuid) -> Result<Vec<ScoreRow>>;

    /// Session aggregates for one user at or after `since`.
    async fn workout_totals(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<WorkoutTotals>;

    /// Highest completed_reps in any single set by this user.
    async fn max_set_reps(&self, user_id: Uuid) -> Result<i64>;

    /// Distinct UTC calendar dates with at least one session, descending.
    async fn workout_dates(&self, user_id: Uuid) -> Result<Vec<NaiveDate>>;
}
