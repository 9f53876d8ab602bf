// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pump-Tracker: workout and challenge progression engine
//!
//! This crate evaluates workout sessions against program rules, records
//! them with their per-set results, and drives the downstream effects:
//! user scores, challenge task progress, challenge completion counters,
//! leaderboards, stats, and streaks.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;

use std::sync::Arc;

use services::{LeaderboardService, ProgressionTracker, SessionRecorder, StatsService};
use store::WorkoutStore;

/// The engine's services, wired over a shared store.
pub struct Engine {
    pub recorder: SessionRecorder,
    pub progression: ProgressionTracker,
    pub leaderboard: LeaderboardService,
    pub stats: StatsService,
}

impl Engine {
    pub fn new(store: Arc<dyn WorkoutStore>) -> Self {
        Self {
            recorder: SessionRecorder::new(Arc::clone(&store)),
            progression: ProgressionTracker::new(Arc::clone(&store)),
            leaderboard: LeaderboardService::new(Arc::clone(&store)),
            stats: StatsService::new(store),
        }
    }
}
