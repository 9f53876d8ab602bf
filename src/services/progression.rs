// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge progression tracker.
//!
//! Walks a task completion through its side effects: participant counts,
//! user score, and the challenge-completed cascade. Each side effect fires
//! at most once per (user, task) pair no matter how often the task is
//! re-submitted.

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::ChallengeTask;
use crate::store::WorkoutStore;

/// Outcome of [`ProgressionTracker::complete_task`].
#[derive(Debug, Clone)]
pub struct TaskCompletion {
    pub task: ChallengeTask,
    /// First time this user completed this task.
    pub first_completion: bool,
    /// First task this user ever touched in the challenge.
    pub first_participation: bool,
    /// All of the challenge's tasks are now complete for this user.
    pub challenge_completed: bool,
    pub points_awarded: i32,
}

/// Applies task completions and their cascade against the store.
#[derive(Clone)]
pub struct ProgressionTracker {
    store: Arc<dyn WorkoutStore>,
}

impl ProgressionTracker {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    /// Record that `user_id` completed `task_id`.
    ///
    /// Idempotent for scoring: re-completing a task bumps its attempt
    /// counter but awards no further points and never double-counts
    /// participants or completions.
    pub async fn complete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<TaskCompletion> {
        let task = self
            .store
            .get_task(task_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("challenge task {task_id}")))?;

        // Participation must be read before the upsert writes the first row.
        let first_participation = !self
            .store
            .has_task_progress(user_id, task.challenge_id)
            .await?;

        let was_already_completed = self
            .store
            .upsert_task_progress(user_id, task_id, task.challenge_id, task.score)
            .await?;
        let first_completion = !was_already_completed;

        if first_participation {
            self.store
                .increment_challenge_participants(task.challenge_id)
                .await?;
        }

        let mut points_awarded = 0;
        if first_completion && task.score > 0 {
            self.store.increment_user_score(user_id, task.score).await?;
            points_awarded = task.score;
        } else {
            debug!(%user_id, %task_id, "repeat completion, no points awarded");
        }

        let counts = self
            .store
            .challenge_task_counts(user_id, task.challenge_id)
            .await?;
        let mut challenge_completed = false;
        if counts.all_complete() {
            let already_done = self
                .store
                .challenge_completed(user_id, task.challenge_id)
                .await?;
            if !already_done {
                self.store
                    .increment_challenge_completions(task.challenge_id)
                    .await?;
                self.store
                    .upsert_challenge_progress(user_id, task.challenge_id)
                    .await?;
                challenge_completed = true;
                info!(
                    %user_id,
                    challenge_id = %task.challenge_id,
                    "challenge completed"
                );
            }
        }

        Ok(TaskCompletion {
            task,
            first_completion,
            first_participation,
            challenge_completed,
            points_awarded,
        })
    }
}
