// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pump_tracker::models::{
    Challenge, ChallengeTask, Difficulty, Program, ProgramParams, ProgramType, User,
};
use pump_tracker::store::MemoryStore;
use pump_tracker::Engine;

/// Initialize test logging once; respects RUST_LOG.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// An engine over a fresh in-memory store, plus the store for assertions.
#[allow(dead_code)]
pub fn test_engine() -> (Engine, Arc<MemoryStore>) {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    let engine = Engine::new(store.clone());
    (engine, store)
}

#[allow(dead_code)]
pub fn seed_user(store: &MemoryStore, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    store.add_user(User {
        id,
        name: name.to_string(),
        avatar: None,
        score: 0,
        deleted_at: None,
    });
    id
}

#[allow(dead_code)]
pub fn seed_program(
    store: &MemoryStore,
    program_type: ProgramType,
    difficulty: Difficulty,
    params: ProgramParams,
) -> Uuid {
    let id = Uuid::new_v4();
    store.add_program(Program {
        id,
        name: format!("{program_type:?} program"),
        program_type,
        difficulty,
        params,
        usage_count: 0,
    });
    id
}

/// A free-mode program; every session against it completes.
#[allow(dead_code)]
pub fn seed_free_program(store: &MemoryStore, difficulty: Difficulty) -> Uuid {
    seed_program(
        store,
        ProgramType::FreeMode,
        difficulty,
        ProgramParams::default(),
    )
}

#[allow(dead_code)]
pub fn seed_challenge(store: &MemoryStore, title: &str, points: i32) -> Uuid {
    let id = Uuid::new_v4();
    store.add_challenge(Challenge {
        id,
        title: title.to_string(),
        participants: 0,
        completions: 0,
        points,
    });
    id
}

#[allow(dead_code)]
pub fn seed_task(store: &MemoryStore, challenge_id: Uuid, day: i32, score: i32) -> Uuid {
    let id = Uuid::new_v4();
    store.add_task(ChallengeTask {
        id,
        challenge_id,
        day,
        title: format!("day {day}"),
        target_reps: Some(50),
        duration: None,
        score,
    });
    id
}

#[allow(dead_code)]
pub fn at(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid RFC 3339 timestamp")
}
