// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use chrono::{Days, Utc};
use uuid::Uuid;

use common::{seed_free_program, seed_user, test_engine};
use pump_tracker::models::{Difficulty, NewSetResult, StatsPeriod};
use pump_tracker::services::SessionSubmission;
use pump_tracker::Engine;

async fn record(
    engine: &Engine,
    program_id: Uuid,
    user_id: Uuid,
    reps: i32,
    duration: i32,
    days_ago: u64,
    sets: Vec<NewSetResult>,
) {
    engine
        .recorder
        .record(SessionSubmission {
            program_id,
            user_id,
            challenge: None,
            start_time: Utc::now() - Days::new(days_ago),
            total_reps: reps,
            total_duration: duration,
            notes: None,
            sets,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_weekly_stats_aggregate_sessions() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "ana");
    let program_id = seed_free_program(&store, Difficulty::Beginner);
    record(&engine, program_id, user_id, 10, 100, 0, Vec::new()).await;
    record(&engine, program_id, user_id, 20, 200, 1, Vec::new()).await;
    record(&engine, program_id, user_id, 30, 300, 2, Vec::new()).await;

    let stats = engine
        .stats
        .workout_stats(user_id, StatsPeriod::Week)
        .await
        .unwrap();

    assert_eq!(stats.total_reps, 60);
    assert_eq!(stats.total_workouts, 3);
    assert_eq!(stats.total_time, 600);
    assert_eq!(stats.best_session, 30);
    assert!((stats.average_reps - 20.0).abs() < f64::EPSILON);
    assert!((stats.total_calories - 17.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_today_period_excludes_earlier_days() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "ben");
    let program_id = seed_free_program(&store, Difficulty::Beginner);
    record(&engine, program_id, user_id, 15, 100, 0, Vec::new()).await;
    record(&engine, program_id, user_id, 40, 200, 2, Vec::new()).await;

    let stats = engine
        .stats
        .workout_stats(user_id, StatsPeriod::Today)
        .await
        .unwrap();

    assert_eq!(stats.total_reps, 15);
    assert_eq!(stats.total_workouts, 1);
}

#[tokio::test]
async fn test_stats_for_idle_user_are_zero() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "cam");

    let stats = engine
        .stats
        .workout_stats(user_id, StatsPeriod::Month)
        .await
        .unwrap();

    assert_eq!(stats.total_reps, 0);
    assert_eq!(stats.total_workouts, 0);
    assert!((stats.average_reps - 0.0).abs() < f64::EPSILON);
    assert!((stats.total_calories - 0.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_personal_records_span_all_history() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "dee");
    let program_id = seed_free_program(&store, Difficulty::Beginner);
    let now = Utc::now();
    record(
        &engine,
        program_id,
        user_id,
        80,
        900,
        40,
        vec![
            NewSetResult {
                set_number: 1,
                target_reps: None,
                completed_reps: 45,
                duration: 400,
                timestamp: now,
            },
            NewSetResult {
                set_number: 2,
                target_reps: None,
                completed_reps: 35,
                duration: 500,
                timestamp: now,
            },
        ],
    )
    .await;
    record(&engine, program_id, user_id, 30, 1200, 0, Vec::new()).await;

    let records = engine.stats.personal_records(user_id).await.unwrap();

    assert_eq!(records.max_reps_in_session, 80);
    assert_eq!(records.max_reps_in_set, 45);
    assert_eq!(records.longest_session, 1200);
    assert_eq!(records.total_lifetime_reps, 110);
}

#[tokio::test]
async fn test_streaks_from_recorded_sessions() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "eve");
    let program_id = seed_free_program(&store, Difficulty::Beginner);
    // Three consecutive days ending today, plus a second session today
    // that must not count twice.
    record(&engine, program_id, user_id, 10, 60, 0, Vec::new()).await;
    record(&engine, program_id, user_id, 10, 60, 0, Vec::new()).await;
    record(&engine, program_id, user_id, 10, 60, 1, Vec::new()).await;
    record(&engine, program_id, user_id, 10, 60, 2, Vec::new()).await;
    // An older run of two, separated by a gap.
    record(&engine, program_id, user_id, 10, 60, 5, Vec::new()).await;
    record(&engine, program_id, user_id, 10, 60, 6, Vec::new()).await;

    let streaks = engine.stats.streaks(user_id).await.unwrap();

    assert_eq!(streaks.current, 3);
    assert_eq!(streaks.longest, 3);
}

#[tokio::test]
async fn test_streaks_for_idle_user() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "fin");

    let streaks = engine.stats.streaks(user_id).await.unwrap();

    assert_eq!(streaks.current, 0);
    assert_eq!(streaks.longest, 0);
}
