// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenges, their daily tasks, and per-user progress rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A multi-day challenge with aggregate counters.
///
/// `participants` counts distinct users with at least one completed task;
/// `completions` counts distinct users at 100% progress. Both are
/// incremented once per user, never recomputed in the hot path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub participants: i32,
    pub completions: i32,
    pub points: i32,
}

/// One day's unit of work inside a challenge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeTask {
    pub id: Uuid,
    pub challenge_id: Uuid,
    /// Day index, tasks are ordered by this ascending
    pub day: i32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    /// Points awarded on first completion
    pub score: i32,
}

/// Join row between a user and a task. Unique per (user, task).
///
/// `attempts` is bumped on every completion event and never reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChallengeTaskProgress {
    pub user_id: Uuid,
    pub task_id: Uuid,
    pub challenge_id: Uuid,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub score: i32,
    pub attempts: i32,
}

/// Join row between a user and a whole challenge. Unique per
/// (user, challenge). `progress` only ever transitions 0 -> 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserChallengeProgress {
    pub challenge_id: Uuid,
    pub user_id: Uuid,
    /// 0-100 integer
    pub progress: i32,
    pub current_reps: i32,
    pub target_reps: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Task totals for one (user, challenge), used to detect full completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskCounts {
    /// Non-deleted tasks in the challenge
    pub total: i64,
    /// Of those, completed by this user
    pub completed: i64,
}

impl TaskCounts {
    /// All tasks done, and there is at least one task to do.
    pub fn all_complete(self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}
