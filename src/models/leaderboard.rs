// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard read-model types. Nothing here is persisted; entries are
//! computed on read from session aggregates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Leaderboard time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Period {
    Daily,
    Weekly,
    Monthly,
    AllTime,
}

impl Period {
    /// Parse a period query value, defaulting to all-time like the API.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "daily" => Period::Daily,
            "weekly" => Period::Weekly,
            "monthly" => Period::Monthly,
            _ => Period::AllTime,
        }
    }
}

/// An aggregated, unranked score row as the store returns it.
#[derive(Debug, Clone)]
pub struct ScoreRow {
    pub user_id: Uuid,
    pub user_name: String,
    pub avatar: Option<String>,
    pub score: i64,
}

/// One ranked leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub rank: i64,
    pub score: i64,
    /// Position change vs. the previous snapshot; not tracked yet
    pub change: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub badges: Vec<String>,
}

/// A single user's position in the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRank {
    pub user_id: Uuid,
    pub rank: i64,
    pub score: i64,
    pub total_users: i64,
    /// Top X% (100 when nobody is ranked)
    pub percentile: f64,
}
