// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod evaluator;
pub mod leaderboard;
pub mod progression;
pub mod recorder;
pub mod score;
pub mod stats;
pub mod streak;

pub use leaderboard::LeaderboardService;
pub use progression::{ProgressionTracker, TaskCompletion};
pub use recorder::{RecordedSession, SessionRecorder, SessionSubmission};
pub use stats::StatsService;
