// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgreSQL store backed by sqlx.
//!
//! Statements are the parameterized queries of the original schema; the
//! task-progress upsert folds the "was already completed" read into the
//! same statement so the first-completion guard is race-safe.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    ChallengeTask, Difficulty, NewSession, NewSetResult, Program, ProgramParams, ProgramType,
    ScoreRow, TaskCounts, WorkoutSession,
};
use crate::store::{WorkoutStore, WorkoutTotals};

/// PostgreSQL-backed [`WorkoutStore`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect to the configured database and apply pending migrations.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .connect(&config.database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Wrap an existing pool (e.g. one shared with the HTTP layer).
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn program_from_row(row: &PgRow) -> Result<Program> {
    let type_str: String = row.try_get("type")?;
    let program_type = ProgramType::parse(&type_str)
        .ok_or_else(|| AppError::Database(format!("unknown program type {type_str:?}")))?;
    let difficulty: String = row.try_get("difficulty")?;

    Ok(Program {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        program_type,
        difficulty: Difficulty::parse_lossy(&difficulty),
        params: ProgramParams {
            target_reps: row.try_get("target_reps")?,
            time_limit: row.try_get("time_limit")?,
            duration: row.try_get("duration")?,
            sets: row.try_get("sets")?,
            reps_per_set: row.try_get("reps_per_set")?,
            reps_sequence: row
                .try_get::<Option<Vec<i32>>, _>("reps_sequence")?
                .unwrap_or_default(),
            reps_per_minute: row.try_get("reps_per_minute")?,
            total_minutes: row.try_get("total_minutes")?,
        },
        usage_count: row.try_get("usage_count")?,
    })
}

fn task_from_row(row: &PgRow) -> Result<ChallengeTask> {
    Ok(ChallengeTask {
        id: row.try_get("id")?,
        challenge_id: row.try_get("challenge_id")?,
        day: row.try_get("day")?,
        title: row.try_get("title")?,
        target_reps: row.try_get("target_reps")?,
        duration: row.try_get("duration")?,
        score: row.try_get("score")?,
    })
}

fn score_row_from_row(row: &PgRow) -> Result<ScoreRow> {
    Ok(ScoreRow {
        user_id: row.try_get("user_id")?,
        user_name: row.try_get("user_name")?,
        avatar: row.try_get("avatar")?,
        score: row.try_get("score")?,
    })
}

#[async_trait]
impl WorkoutStore for PgStore {
    async fn get_program(&self, id: Uuid) -> Result<Option<Program>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, type, difficulty, target_reps, time_limit, duration,
                   sets, reps_per_set, reps_sequence, reps_per_minute, total_minutes,
                   usage_count
            FROM workout_programs
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(program_from_row).transpose()
    }

    async fn increment_program_usage(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE workout_programs SET usage_count = usage_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_session(&self, session: &NewSession) -> Result<WorkoutSession> {
        let row = sqlx::query(
            r#"
            INSERT INTO workout_sessions(
                program_id, user_id, challenge_id, challenge_task_id, start_time,
                total_reps, total_duration, completed, notes, created_at
            )
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, NOW())
            RETURNING id, created_at
            "#,
        )
        .bind(session.program_id)
        .bind(session.user_id)
        .bind(session.challenge.map(|c| c.challenge_id))
        .bind(session.challenge.map(|c| c.task_id))
        .bind(session.start_time)
        .bind(session.total_reps)
        .bind(session.total_duration)
        .bind(session.completed)
        .bind(session.notes.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(WorkoutSession {
            id: row.try_get("id")?,
            program_id: session.program_id,
            user_id: session.user_id,
            challenge_id: session.challenge.map(|c| c.challenge_id),
            challenge_task_id: session.challenge.map(|c| c.task_id),
            start_time: session.start_time,
            total_reps: session.total_reps,
            total_duration: session.total_duration,
            completed: session.completed,
            notes: session.notes.clone(),
            created_at: row.try_get("created_at")?,
            sets: Vec::new(),
        })
    }

    async fn insert_set_results(&self, session_id: Uuid, sets: &[NewSetResult]) -> Result<()> {
        for set in sets {
            sqlx::query(
                r#"
                INSERT INTO set_results(session_id, set_number, target_reps,
                                        completed_reps, duration, timestamp)
                VALUES($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(session_id)
            .bind(set.set_number)
            .bind(set.target_reps)
            .bind(set.completed_reps)
            .bind(set.duration)
            .bind(set.timestamp)
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    async fn get_task(&self, id: Uuid) -> Result<Option<ChallengeTask>> {
        let row = sqlx::query(
            r#"
            SELECT id, challenge_id, day, title, target_reps, duration, score
            FROM challenge_tasks
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(task_from_row).transpose()
    }

    async fn has_task_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_challenge_task_progress
                WHERE user_id = $1 AND challenge_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn upsert_task_progress(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        challenge_id: Uuid,
        score: i32,
    ) -> Result<bool> {
        // `previous` sees the pre-statement snapshot, so the returned flag
        // reflects the state before this upsert.
        let was_completed: bool = sqlx::query_scalar(
            r#"
            WITH previous AS (
                SELECT completed FROM user_challenge_task_progress
                WHERE user_id = $1 AND task_id = $2
            ), upsert AS (
                INSERT INTO user_challenge_task_progress(
                    user_id, task_id, challenge_id, completed, completed_at,
                    score, attempts, created_at, updated_at
                )
                VALUES($1, $2, $3, TRUE, NOW(), $4, 1, NOW(), NOW())
                ON CONFLICT (user_id, task_id)
                DO UPDATE SET
                    completed = TRUE,
                    completed_at = NOW(),
                    attempts = user_challenge_task_progress.attempts + 1,
                    updated_at = NOW()
            )
            SELECT COALESCE((SELECT completed FROM previous), FALSE)
            "#,
        )
        .bind(user_id)
        .bind(task_id)
        .bind(challenge_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;
        Ok(was_completed)
    }

    async fn challenge_task_counts(&self, user_id: Uuid, challenge_id: Uuid) -> Result<TaskCounts> {
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) AS total_tasks,
                COUNT(uctp.user_id) FILTER (WHERE uctp.completed = TRUE) AS completed_tasks
            FROM challenge_tasks ct
            LEFT JOIN user_challenge_task_progress uctp
                ON ct.id = uctp.task_id AND uctp.user_id = $1
            WHERE ct.challenge_id = $2 AND ct.deleted_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(challenge_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(TaskCounts {
            total: row.try_get("total_tasks")?,
            completed: row.try_get("completed_tasks")?,
        })
    }

    async fn challenge_completed(&self, user_id: Uuid, challenge_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_challenge_progress
                WHERE challenge_id = $1 AND user_id = $2 AND progress = 100
            )
            "#,
        )
        .bind(challenge_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn upsert_challenge_progress(&self, user_id: Uuid, challenge_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_challenge_progress(
                challenge_id, user_id, progress, current_reps, target_reps,
                attempts, completed_at, created_at, updated_at
            )
            VALUES($1, $2, 100, 0, 0, 1, NOW(), NOW(), NOW())
            ON CONFLICT (challenge_id, user_id)
            DO UPDATE SET
                progress = 100,
                completed_at = NOW(),
                updated_at = NOW()
            "#,
        )
        .bind(challenge_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn increment_challenge_participants(&self, challenge_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE challenges SET participants = participants + 1 WHERE id = $1")
            .bind(challenge_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn increment_challenge_completions(&self, challenge_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE challenges SET completions = completions + 1 WHERE id = $1")
            .bind(challenge_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn increment_user_score(&self, user_id: Uuid, points: i32) -> Result<()> {
        sqlx::query("UPDATE users SET score = score + $1 WHERE id = $2 AND deleted_at IS NULL")
            .bind(points)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn rep_totals(&self, since: Option<DateTime<Utc>>) -> Result<Vec<ScoreRow>> {
        let rows = match since {
            Some(cutoff) => {
                sqlx::query(
                    r#"
                    SELECT ws.user_id, u.name AS user_name, u.avatar,
                           SUM(ws.total_reps)::bigint AS score
                    FROM workout_sessions ws
                    INNER JOIN users u ON ws.user_id = u.id
                    WHERE u.deleted_at IS NULL AND ws.start_time >= $1
                    GROUP BY ws.user_id, u.name, u.avatar
                    "#,
                )
                .bind(cutoff)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT ws.user_id, u.name AS user_name, u.avatar,
                           SUM(ws.total_reps)::bigint AS score
                    FROM workout_sessions ws
                    INNER JOIN users u ON ws.user_id = u.id
                    WHERE u.deleted_at IS NULL
                    GROUP BY ws.user_id, u.name, u.avatar
                    "#,
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        rows.iter().map(score_row_from_row).collect()
    }

    async fn challenge_progress_totals(&self, challenge_id: Uuid) -> Result<Vec<ScoreRow>> {
        let rows = sqlx::query(
            r#"
            SELECT ucp.user_id, u.name AS user_name, u.avatar,
                   ucp.progress::bigint AS score
            FROM user_challenge_progress ucp
            INNER JOIN users u ON ucp.user_id = u.id
            WHERE ucp.challenge_id = $1 AND u.deleted_at IS NULL
            "#,
        )
        .bind(challenge_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(score_row_from_row).collect()
    }

    async fn workout_totals(
        &self,
        user_id: Uuid,
        since: Option<DateTime<Utc>>,
    ) -> Result<WorkoutTotals> {
        let select = r#"
            SELECT
                COUNT(*) AS total_sessions,
                COALESCE(SUM(total_reps), 0)::bigint AS total_reps,
                COALESCE(SUM(total_duration), 0)::bigint AS total_duration,
                COALESCE(MAX(total_reps), 0)::bigint AS best_session,
                COALESCE(MAX(total_duration), 0)::bigint AS longest_session
            FROM workout_sessions
            WHERE user_id = $1
        "#;

        let row = match since {
            Some(cutoff) => {
                sqlx::query(&format!("{select} AND start_time >= $2"))
                    .bind(user_id)
                    .bind(cutoff)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query(select)
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        Ok(WorkoutTotals {
            total_sessions: row.try_get("total_sessions")?,
            total_reps: row.try_get("total_reps")?,
            total_duration: row.try_get("total_duration")?,
            best_session: row.try_get("best_session")?,
            longest_session: row.try_get("longest_session")?,
        })
    }

    async fn max_set_reps(&self, user_id: Uuid) -> Result<i64> {
        let max: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(MAX(sr.completed_reps), 0)::bigint
            FROM set_results sr
            INNER JOIN workout_sessions ws ON sr.session_id = ws.id
            WHERE ws.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(max)
    }

    async fn workout_dates(&self, user_id: Uuid) -> Result<Vec<NaiveDate>> {
        let dates: Vec<NaiveDate> = sqlx::query_scalar(
            r#"
            SELECT DISTINCT (start_time AT TIME ZONE 'UTC')::date AS day
            FROM workout_sessions
            WHERE user_id = $1
            ORDER BY day DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }
}
