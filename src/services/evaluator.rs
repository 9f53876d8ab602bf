// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Program rule evaluator.
//!
//! Pure completion verdicts: given a program and the submitted metrics,
//! decide whether the session counts as completed. The verdict is the only
//! source of `WorkoutSession.completed`; client input is never trusted.

use crate::models::{Program, ProgramKind, SessionMetrics};

/// Evaluate a session against its program.
///
/// Total over all program types. A program whose stored parameters are
/// incomplete for its declared type yields `false` rather than an error,
/// so the session is still recorded.
pub fn evaluate(program: &Program, metrics: &SessionMetrics) -> bool {
    match program.kind() {
        Some(kind) => evaluate_kind(&kind, metrics),
        None => false,
    }
}

/// Evaluate against a resolved program kind.
pub fn evaluate_kind(kind: &ProgramKind, metrics: &SessionMetrics) -> bool {
    let reps = f64::from(metrics.total_reps);
    let duration = f64::from(metrics.total_duration);

    match kind {
        // Free mode has no failure condition.
        ProgramKind::FreeMode => true,

        ProgramKind::TargetReps {
            target_reps,
            time_limit,
        } => {
            metrics.total_reps >= *target_reps
                && time_limit.is_none_or(|limit| metrics.total_duration <= limit)
        }

        // The clock must have run for roughly the assigned window, in
        // either direction.
        ProgramKind::MaxTime { duration: target } => {
            within_tolerance(duration, f64::from(*target), 0.05)
        }

        // 90% band, not exact equality.
        ProgramKind::SetsReps { sets, reps_per_set } => {
            reps >= 0.9 * f64::from(sets.saturating_mul(*reps_per_set))
        }

        ProgramKind::Pyramid { reps_sequence } => {
            let planned: i64 = reps_sequence.iter().map(|&r| i64::from(r)).sum();
            reps >= 0.9 * planned as f64
        }

        // Both the time window and the rep floor must hold.
        ProgramKind::Emom {
            reps_per_minute,
            total_minutes,
        } => {
            let target_secs = f64::from(total_minutes.saturating_mul(60));
            let target_reps = f64::from(total_minutes.saturating_mul(*reps_per_minute));
            within_tolerance(duration, target_secs, 0.10) && reps >= 0.9 * target_reps
        }

        // Reps are uncapped by design; only the window matters.
        ProgramKind::Amrap { duration: target } => {
            within_tolerance(duration, f64::from(*target), 0.05)
        }
    }
}

/// Whether `actual` falls within `±tolerance` of `target`.
fn within_tolerance(actual: f64, target: f64, tolerance: f64) -> bool {
    actual >= target * (1.0 - tolerance) && actual <= target * (1.0 + tolerance)
}
