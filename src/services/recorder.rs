// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session recorder.
//!
//! Single entry point for submitting a finished workout. The recorder
//! evaluates the program rules, persists the session and its sets, and
//! runs the scoring and challenge cascade for completed sessions.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    ChallengeLink, NewSession, NewSetResult, SessionMetrics, SetResult, WorkoutSession,
};
use crate::services::evaluator;
use crate::services::progression::{ProgressionTracker, TaskCompletion};
use crate::services::score;
use crate::store::WorkoutStore;

/// A client-submitted workout, not yet persisted.
///
/// The submission never carries a completion flag; the evaluator decides.
#[derive(Debug, Clone)]
pub struct SessionSubmission {
    pub program_id: Uuid,
    pub user_id: Uuid,
    pub challenge: Option<ChallengeLink>,
    pub start_time: DateTime<Utc>,
    pub total_reps: i32,
    pub total_duration: i32,
    pub notes: Option<String>,
    pub sets: Vec<NewSetResult>,
}

/// What came out of recording a session.
#[derive(Debug, Clone)]
pub struct RecordedSession {
    pub session: WorkoutSession,
    pub points_awarded: i32,
    /// Present when the session was completed against a challenge task.
    pub task_completion: Option<TaskCompletion>,
}

/// Persists sessions and drives the completion cascade.
#[derive(Clone)]
pub struct SessionRecorder {
    store: Arc<dyn WorkoutStore>,
    tracker: ProgressionTracker,
}

impl SessionRecorder {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        let tracker = ProgressionTracker::new(Arc::clone(&store));
        Self { store, tracker }
    }

    /// Record a submitted session.
    ///
    /// Incomplete sessions are persisted too; they just skip scoring and
    /// the challenge cascade. Program usage is counted either way.
    pub async fn record(&self, submission: SessionSubmission) -> Result<RecordedSession> {
        let program = self
            .store
            .get_program(submission.program_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("program {}", submission.program_id))
            })?;

        let metrics = SessionMetrics {
            total_reps: submission.total_reps,
            total_duration: submission.total_duration,
        };
        let completed = evaluator::evaluate(&program, &metrics);
        debug!(
            program_id = %program.id,
            user_id = %submission.user_id,
            completed,
            "evaluated session"
        );

        let mut session = self
            .store
            .insert_session(&NewSession {
                program_id: submission.program_id,
                user_id: submission.user_id,
                challenge: submission.challenge,
                start_time: submission.start_time,
                total_reps: submission.total_reps,
                total_duration: submission.total_duration,
                completed,
                notes: submission.notes,
            })
            .await?;

        if !submission.sets.is_empty() {
            let mut sets = submission.sets;
            sets.sort_by_key(|s| s.set_number);
            self.store.insert_set_results(session.id, &sets).await?;
            session.sets = sets
                .into_iter()
                .map(|s| SetResult {
                    session_id: session.id,
                    set_number: s.set_number,
                    target_reps: s.target_reps,
                    completed_reps: s.completed_reps,
                    duration: s.duration,
                    timestamp: s.timestamp,
                })
                .collect();
        }

        self.store.increment_program_usage(program.id).await?;

        let mut points_awarded = 0;
        let mut task_completion = None;
        if completed {
            match submission.challenge {
                Some(link) => {
                    let completion = self
                        .tracker
                        .complete_task(submission.user_id, link.task_id)
                        .await?;
                    points_awarded = completion.points_awarded;
                    task_completion = Some(completion);
                }
                None => {
                    points_awarded = score::points_for_difficulty(program.difficulty);
                    if points_awarded > 0 {
                        self.store
                            .increment_user_score(submission.user_id, points_awarded)
                            .await?;
                    }
                }
            }
            info!(
                session_id = %session.id,
                user_id = %session.user_id,
                points_awarded,
                "session completed"
            );
        }

        Ok(RecordedSession {
            session,
            points_awarded,
            task_completion,
        })
    }
}
