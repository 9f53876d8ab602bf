// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout sessions and their per-set results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Link between a session and the challenge task it was performed for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeLink {
    pub challenge_id: Uuid,
    pub task_id: Uuid,
}

/// One recorded attempt at a program.
///
/// `completed` is derived by the rule evaluator, never taken from input.
/// Immutable after creation as far as this engine is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    #[serde(rename = "sessionId")]
    pub id: Uuid,
    pub program_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge_task_id: Option<Uuid>,
    pub start_time: DateTime<Utc>,
    pub total_reps: i32,
    /// Seconds
    pub total_duration: i32,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub sets: Vec<SetResult>,
}

/// A session row ready for insertion; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub program_id: Uuid,
    pub user_id: Uuid,
    pub challenge: Option<ChallengeLink>,
    pub start_time: DateTime<Utc>,
    pub total_reps: i32,
    pub total_duration: i32,
    pub completed: bool,
    pub notes: Option<String>,
}

/// One set inside a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetResult {
    pub session_id: Uuid,
    pub set_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<i32>,
    pub completed_reps: i32,
    /// Seconds
    pub duration: i32,
    pub timestamp: DateTime<Utc>,
}

/// A submitted set result, before the session id is known.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSetResult {
    pub set_number: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<i32>,
    pub completed_reps: i32,
    pub duration: i32,
    pub timestamp: DateTime<Utc>,
}
