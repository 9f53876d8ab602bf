// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking engine.
//!
//! The store hands back unranked per-user aggregates; ranking, windowing
//! and badge assignment happen here so every view agrees on rank order.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{LeaderboardEntry, Period, ScoreRow, UserRank};
use crate::store::WorkoutStore;
use crate::time_utils::period_cutoff;

/// Builds leaderboard views over the store's score aggregates.
#[derive(Clone)]
pub struct LeaderboardService {
    store: Arc<dyn WorkoutStore>,
}

/// Dense rank over rows: score descending, user id ascending as tie-break
/// so equal scores rank deterministically.
fn ranked(mut rows: Vec<ScoreRow>) -> Vec<LeaderboardEntry> {
    rows.sort_by(|a, b| b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id)));
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| LeaderboardEntry {
            user_id: row.user_id,
            user_name: row.user_name,
            avatar: row.avatar,
            rank: i as i64 + 1,
            score: row.score,
            change: 0,
            badges: Vec::new(),
        })
        .collect()
}

/// Badges for the podium ranks.
fn podium_badges(rank: i64) -> Vec<String> {
    let badges: &[&str] = match rank {
        1 => &["👑", "🔥", "💎"],
        2 => &["🔥", "💪"],
        3 => &["💎", "⚡"],
        _ => &[],
    };
    badges.iter().map(|b| (*b).to_string()).collect()
}

impl LeaderboardService {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self { store }
    }

    async fn ranked_for_period(&self, period: Period) -> Result<Vec<LeaderboardEntry>> {
        let cutoff = period_cutoff(period, Utc::now());
        let rows = self.store.rep_totals(cutoff).await?;
        debug!(?period, users = rows.len(), "ranking rep totals");
        Ok(ranked(rows))
    }

    /// The top `limit` users by total reps within the period.
    pub async fn leaderboard(&self, period: Period, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.ranked_for_period(period).await?;
        entries.truncate(limit);
        Ok(entries)
    }

    /// A single user's rank within the period.
    ///
    /// Users with no qualifying sessions rank one past the board with a
    /// zero score.
    pub async fn user_rank(&self, user_id: Uuid, period: Period) -> Result<UserRank> {
        let entries = self.ranked_for_period(period).await?;
        let total_users = entries.len() as i64;
        let (rank, score) = entries
            .iter()
            .find(|e| e.user_id == user_id)
            .map_or((total_users + 1, 0), |e| (e.rank, e.score));
        let percentile = if total_users == 0 {
            100.0
        } else {
            rank as f64 / total_users as f64 * 100.0
        };
        Ok(UserRank {
            user_id,
            rank,
            score,
            total_users,
            percentile,
        })
    }

    /// The slice of the board within `radius` ranks of the user.
    ///
    /// Empty when the user has no qualifying sessions; there is no anchor
    /// rank to center the window on.
    pub async fn nearby(
        &self,
        user_id: Uuid,
        period: Period,
        radius: i64,
    ) -> Result<Vec<LeaderboardEntry>> {
        let entries = self.ranked_for_period(period).await?;
        let Some(target) = entries.iter().find(|e| e.user_id == user_id).map(|e| e.rank) else {
            return Ok(Vec::new());
        };
        let low = target - radius;
        let high = target + radius;
        Ok(entries
            .into_iter()
            .filter(|e| e.rank >= low && e.rank <= high)
            .collect())
    }

    /// The podium: top three, decorated with rank badges.
    pub async fn top_performers(&self, period: Period) -> Result<Vec<LeaderboardEntry>> {
        let mut entries = self.ranked_for_period(period).await?;
        entries.truncate(3);
        for entry in &mut entries {
            entry.badges = podium_badges(entry.rank);
        }
        Ok(entries)
    }

    /// Per-challenge board, ranked by progress percentage.
    pub async fn challenge_leaderboard(
        &self,
        challenge_id: Uuid,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>> {
        let rows = self.store.challenge_progress_totals(challenge_id).await?;
        let mut entries = ranked(rows);
        entries.truncate(limit);
        Ok(entries)
    }
}
