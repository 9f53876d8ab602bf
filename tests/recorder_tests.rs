// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

mod common;

use chrono::Utc;
use uuid::Uuid;

use common::{seed_challenge, seed_free_program, seed_program, seed_task, seed_user, test_engine};
use pump_tracker::error::AppError;
use pump_tracker::models::{ChallengeLink, Difficulty, NewSetResult, ProgramParams, ProgramType};
use pump_tracker::services::SessionSubmission;

fn submission(program_id: Uuid, user_id: Uuid, reps: i32, duration: i32) -> SessionSubmission {
    SessionSubmission {
        program_id,
        user_id,
        challenge: None,
        start_time: Utc::now(),
        total_reps: reps,
        total_duration: duration,
        notes: None,
        sets: Vec::new(),
    }
}

#[tokio::test]
async fn test_completed_session_awards_difficulty_points() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "ana");
    let program_id = seed_free_program(&store, Difficulty::Intermediate);

    let recorded = engine
        .recorder
        .record(submission(program_id, user_id, 40, 300))
        .await
        .unwrap();

    assert!(recorded.session.completed);
    assert_eq!(recorded.points_awarded, 10);
    assert_eq!(store.user(user_id).unwrap().score, 10);
    assert_eq!(store.program(program_id).unwrap().usage_count, 1);
    assert_eq!(store.sessions_for(user_id).len(), 1);
}

#[tokio::test]
async fn test_failed_session_is_recorded_without_points() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "ben");
    let program_id = seed_program(
        &store,
        ProgramType::TargetReps,
        Difficulty::Advanced,
        ProgramParams {
            target_reps: Some(100),
            ..Default::default()
        },
    );

    let recorded = engine
        .recorder
        .record(submission(program_id, user_id, 60, 300))
        .await
        .unwrap();

    assert!(!recorded.session.completed);
    assert_eq!(recorded.points_awarded, 0);
    assert_eq!(store.user(user_id).unwrap().score, 0);
    // The attempt still counts toward program usage and history.
    assert_eq!(store.program(program_id).unwrap().usage_count, 1);
    assert_eq!(store.sessions_for(user_id).len(), 1);
}

#[tokio::test]
async fn test_unknown_program_is_rejected() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "cam");

    let err = engine
        .recorder
        .record(submission(Uuid::new_v4(), user_id, 10, 60))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
    assert!(store.sessions_for(user_id).is_empty());
}

#[tokio::test]
async fn test_sets_are_persisted_in_order() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "dee");
    let program_id = seed_free_program(&store, Difficulty::Beginner);

    let now = Utc::now();
    let mut sub = submission(program_id, user_id, 30, 180);
    sub.sets = vec![
        NewSetResult {
            set_number: 2,
            target_reps: Some(10),
            completed_reps: 10,
            duration: 60,
            timestamp: now,
        },
        NewSetResult {
            set_number: 1,
            target_reps: Some(10),
            completed_reps: 12,
            duration: 55,
            timestamp: now,
        },
        NewSetResult {
            set_number: 3,
            target_reps: Some(10),
            completed_reps: 8,
            duration: 65,
            timestamp: now,
        },
    ];

    let recorded = engine.recorder.record(sub).await.unwrap();

    let numbers: Vec<i32> = recorded.session.sets.iter().map(|s| s.set_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    let stored = store.set_results(recorded.session.id);
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[0].set_number, 1);
    assert_eq!(stored[0].completed_reps, 12);
}

#[tokio::test]
async fn test_challenge_session_scores_by_task_not_difficulty() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "eve");
    let program_id = seed_free_program(&store, Difficulty::Advanced);
    let challenge_id = seed_challenge(&store, "30 day pushups", 100);
    let task_id = seed_task(&store, challenge_id, 1, 25);

    let mut sub = submission(program_id, user_id, 50, 200);
    sub.challenge = Some(ChallengeLink {
        challenge_id,
        task_id,
    });
    let recorded = engine.recorder.record(sub).await.unwrap();

    // Task score (25), not the advanced difficulty score (15).
    assert_eq!(recorded.points_awarded, 25);
    assert_eq!(store.user(user_id).unwrap().score, 25);
    let completion = recorded.task_completion.unwrap();
    assert!(completion.first_completion);
    assert!(completion.first_participation);
    assert_eq!(recorded.session.challenge_id, Some(challenge_id));
    assert_eq!(recorded.session.challenge_task_id, Some(task_id));
}

#[tokio::test]
async fn test_failed_challenge_session_skips_cascade() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "fin");
    let program_id = seed_program(
        &store,
        ProgramType::TargetReps,
        Difficulty::Beginner,
        ProgramParams {
            target_reps: Some(100),
            ..Default::default()
        },
    );
    let challenge_id = seed_challenge(&store, "squat week", 50);
    let task_id = seed_task(&store, challenge_id, 1, 10);

    let mut sub = submission(program_id, user_id, 10, 200);
    sub.challenge = Some(ChallengeLink {
        challenge_id,
        task_id,
    });
    let recorded = engine.recorder.record(sub).await.unwrap();

    assert!(!recorded.session.completed);
    assert!(recorded.task_completion.is_none());
    assert!(store.task_progress(user_id, task_id).is_none());
    assert_eq!(store.challenge(challenge_id).unwrap().participants, 0);
    assert_eq!(store.user(user_id).unwrap().score, 0);
}

#[tokio::test]
async fn test_repeat_sessions_each_count_usage() {
    let (engine, store) = test_engine();
    let user_id = seed_user(&store, "gus");
    let program_id = seed_free_program(&store, Difficulty::Beginner);

    for _ in 0..3 {
        engine
            .recorder
            .record(submission(program_id, user_id, 20, 120))
            .await
            .unwrap();
    }

    assert_eq!(store.program(program_id).unwrap().usage_count, 3);
    assert_eq!(store.sessions_for(user_id).len(), 3);
    assert_eq!(store.user(user_id).unwrap().score, 15);
}
