// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data model types shared across services and stores.

pub mod challenge;
pub mod leaderboard;
pub mod program;
pub mod stats;
pub mod user;
pub mod workout;

pub use challenge::{
    Challenge, ChallengeTask, TaskCounts, UserChallengeProgress, UserChallengeTaskProgress,
};
pub use leaderboard::{LeaderboardEntry, Period, ScoreRow, UserRank};
pub use program::{Difficulty, Program, ProgramKind, ProgramParams, ProgramType, SessionMetrics};
pub use stats::{PersonalRecords, StatsPeriod, StreakSummary, WorkoutStats, CALORIES_PER_REP};
pub use user::User;
pub use workout::{ChallengeLink, NewSession, NewSetResult, SetResult, WorkoutSession};
