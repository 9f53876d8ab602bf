// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for tests and local development.
//!
//! Mirrors the PostgreSQL store's observable behavior, including the
//! "was already completed" answer of the task-progress upsert.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{
    Challenge, ChallengeTask, NewSession, NewSetResult, Program, ScoreRow, SetResult, TaskCounts,
    User, UserChallengeProgress, UserChallengeTaskProgress, WorkoutSession,
};
use crate::store::{WorkoutStore, WorkoutTotals};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    programs: HashMap<Uuid, Program>,
    challenges: HashMap<Uuid, Challenge>,
    tasks: HashMap<Uuid, ChallengeTask>,
    sessions: Vec<WorkoutSession>,
    set_results: HashMap<Uuid, Vec<SetResult>>,
    /// Keyed by (user, task)
    task_progress: HashMap<(Uuid, Uuid), UserChallengeTaskProgress>,
    /// Keyed by (user, challenge)
    challenge_progress: HashMap<(Uuid, Uuid), UserChallengeProgress>,
}

/// HashMap-backed [`WorkoutStore`].
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock means a panicked test; propagate the panic.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    // ─── Seeding helpers ─────────────────────────────────────────

    pub fn add_user(&self, user: User) {
        self.lock().users.insert(user.id, user);
    }

    pub fn add_program(&self, program: Program) {
        self.lock().programs.insert(program.id, program);
    }

    pub fn add_challenge(&self, challenge: Challenge) {
        self.lock().challenges.insert(challenge.id, challenge);
    }

    pub fn add_task(&self, task: ChallengeTask) {
        self.lock().tasks.insert(task.id, task);
    }

    // ─── Inspection helpers for assertions ───────────────────────

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    pub fn program(&self, id: Uuid) -> Option<Program> {
        self.lock().programs.get(&id).cloned()
    }

    pub fn challenge(&self, id: Uuid) -> Option<Challenge> {
        self.lock().challenges.get(&id).cloned()
    }

    pub fn task_progress(&self, user_id: Uuid, task_id: Uuid) -> Option<UserChallengeTaskProgress> {
        self.lock().task_progress.get(&(user_id, task_id)).cloned()
    }

    pub fn challenge_progress(
        &self,
        user_id: Uuid,
        challenge_id: Uuid,
    ) -> Option<UserChallengeProgress> {
        self.lock()
            .challenge_progress
            .get(&(user_id, challenge_id))
            .cloned()
    }

    pub fn sessions_for(&self, user_id: Uuid) -> Vec<WorkoutSession> {
        self.lock()
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn set_results(&self, session_id: Uuid) -> Vec<SetResult> {
        self.lock()
            .set_results
            .get(&session_id)
            .cloned()
            .unwrap_or_default()
    }
}

fn score_row(user: &User, score: i64) -> ScoreRow {
    ScoreRow {
        user_id: user.id,
        user_name: user.name.clone(),
        avatar: user.avatar.clone(),
        score,
    }
}

#[async_trait]
impl WorkoutStore for MemoryStore {
    async fn get_program(&self, id: Uuid) -> Result<Option<Program>> {
        Ok(self.lock().programs.get(&id).cloned())
    }

    async fn increment_program_usage(&self, id: Uuid) -> Result<()> {
        let mut inner = self.lock();
        let program = inner
            .programs
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("program {id}")))?;
        program.usage_count += 1;
        Ok(())
    }

    async fn insert_session(&self, session: &NewSession) -> Result<WorkoutSession> {
        let persisted = WorkoutSession {
            id: Uuid::new_v4(),
            program_id: session.program_id,
            user_id: session.user_id,
            challenge_id: session.challenge.map(|c| c.challenge_id),
            challenge_task_id: session.challenge.map(|c| c.task_id),
            start_time: session.start_time,
            total_reps: session.total_reps,
            total_duration: session.total_duration,
            completed: session.completed,
            notes: session.notes.clone(),
            created_at: Utc::now(),
            sets: Vec::new(),
        };
        self.lock().sessions.push(persisted.clone());
        Ok(persisted)
    }

    async fn insert_set_results(&self, session_id: Uuid, sets: &[NewSetResult]) -> Result<()> {
        let mut inner = self.lock();
        let stored = inner.set_results.entry(session_id).or_default();
        for set in sets {
            stored.push(SetResult {
                session_id,
                set_number: set.set_number,
                target_reps: set.target_reps,
                completed_reps: set.completed_reps,
                duration: set.duration,
                timestamp: set.timestamp,
            });
        }
        Ok(())
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<ChallengeTask>> {
        Ok(self.lock().tasks.get(&id).cloned())
    }

    async fn has_task_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool> {
        Ok(self
            .lock()
            .task_progress
            .values()
            .any(|p| p.user_id == user_id && p.challenge_id == challenge_id))
    }

    async fn upsert_task_progress(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        challenge_id: Uuid,
        score: i32,
    ) -> Result<bool> {
        let mut inner = self.lock();
        let now = Utc::now();
        match inner.task_progress.get_mut(&(user_id, task_id)) {
            Some(existing) => {
                let was_completed = existing.completed;
                existing.completed = true;
                existing.completed_at = Some(now);
                existing.attempts += 1;
                Ok(was_completed)
            }
            None => {
                inner.task_progress.insert(
                    (user_id, task_id),
                    UserChallengeTaskProgress {
                        user_id,
                        task_id,
                        challenge_id,
                        completed: true,
                        completed_at: Some(now),
                        score,
                        attempts: 1,
                    },
                );
                Ok(false)
            }
        }
    }

    async fn challenge_task_counts(&self, user_id: Uuid, challenge_id: Uuid) -> Result<TaskCounts> {
        let inner = self.lock();
        let mut counts = TaskCounts::default();
        for task in inner.tasks.values() {
            if task.challenge_id != challenge_id {
                continue;
            }
            counts.total += 1;
            if inner
                .task_progress
                .get(&(user_id, task.id))
                .is_some_and(|p| p.completed)
            {
                counts.completed += 1;
            }
        }
        Ok(counts)
    }

    async fn challenge_completed(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool> {
        Ok(self
            .lock()
            .challenge_progress
            .get(&(user_id, challenge_id))
            .is_some_and(|p| p.progress == 100))
    }

    async fn upsert_challenge_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<()> {
        let mut inner = self.lock();
        let now = Utc::now();
        inner
            .challenge_progress
            .entry((user_id, challenge_id))
            .and_modify(|p| {
                p.progress = 100;
                p.completed_at = Some(now);
            })
            .or_insert(UserChallengeProgress {
                challenge_id,
                user_id,
                progress: 100,
                current_reps: 0,
                target_reps: 0,
                completed_at: Some(now),
            });
        Ok(())
    }

    async fn increment_challenge_participants(&self, challenge_id: Uuid) -> Result<()> {
        let mut inner = self.lock();
        let challenge = inner
            .challenges
            .get_mut(&challenge_id)
            .ok_or_else(|| AppError::NotFound(format!("challenge {challenge_id}")))?;
        challenge.participants += 1;
        Ok(())
    }

    async fn increment_challenge_completions(&self, challenge_id: Uuid) -> Result<()> {
        let mut inner = self.lock();
        let challenge = inner
            .challenges
            .get_mut(&challenge_id)
            .ok_or_else(|| AppError::NotFound(format!("challenge {challenge_id}")))?;
        challenge.completions += 1;
        Ok(())
    }

    async fn increment_user_score(&self, user_id: Uuid, points: i32) -> Result<()> {
        let mut inner = self.lock();
        if let Some(user) = inner.users.get_mut(&user_id) {
            if user.deleted_at.is_none() {
                user.score += points;
            }
        }
        Ok(())
    }

    async fn rep_totals(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ScoreRow>> {
        let inner = self.lock();
        let mut sums: HashMap<Uuid, i64> = HashMap::new();
        for session in &inner.sessions {
            if since.is_some_and(|cutoff| session.start_time < cutoff) {
                continue;
            }
            *sums.entry(session.user_id).or_default() += i64::from(session.total_reps);
        }
        Ok(sums
            .into_iter()
            .filter_map(|(user_id, score)| {
                let user = inner.users.get(&user_id)?;
                if user.deleted_at.is_some() {
                    return None;
                }
                Some(score_row(user, score))
            })
            .collect())
    }

    async fn challenge_progress_totals(&self, challenge_id: Uuid) -> Result<Vec<ScoreRow>> {
        let inner = self.lock();
        Ok(inner
            .challenge_progress
            .values()
            .filter(|p| p.challenge_id == challenge_id)
            .filter_map(|p| {
                let user = inner.users.get(&p.user_id)?;
                if user.deleted_at.is_some() {
                    return None;
                }
                Some(score_row(user, i64::from(p.progress)))
            })
            .collect())
    }

    async fn workout_totals(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<WorkoutTotals> {
        let inner = self.lock();
        let mut totals = WorkoutTotals::default();
        for session in &inner.sessions {
            if session.user_id != user_id {
                continue;
            }
            if since.is_some_and(|cutoff| session.start_time < cutoff) {
                continue;
            }
            totals.total_sessions += 1;
            totals.total_reps += i64::from(session.total_reps);
            totals.total_duration += i64::from(session.total_duration);
            totals.best_session = totals.best_session.max(i64::from(session.total_reps));
            totals.longest_session = totals
                .longest_session
                .max(i64::from(session.total_duration));
        }
        Ok(totals)
    }

    async fn max_set_reps(&self, user_id: Uuid) -> Result<i64> {
        let inner = self.lock();
        let session_ids: Vec<Uuid> = inner
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.id)
            .collect();
        Ok(session_ids
            .iter()
            .filter_map(|id| inner.set_results.get(id))
            .flatten()
            .map(|set| i64::from(set.completed_reps))
            .max()
            .unwrap_or(0))
    }

    async fn workout_dates(&self, user_id: Uuid) -> Result<Vec<NaiveDate>> {
        let inner = self.lock();
        let mut dates: Vec<NaiveDate> = inner
            .sessions
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.start_time.date_naive())
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates.reverse();
        Ok(dates)
    }
}
