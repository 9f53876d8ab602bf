// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Score policy for completed sessions.

use crate::models::Difficulty;

/// Points awarded for a completed free-standing session.
///
/// Challenge-linked sessions are scored by the task instead.
pub fn points_for_difficulty(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Beginner => 5,
        Difficulty::Intermediate => 10,
        Difficulty::Advanced => 15,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_scale_with_difficulty() {
        assert_eq!(points_for_difficulty(Difficulty::Beginner), 5);
        assert_eq!(points_for_difficulty(Difficulty::Intermediate), 10);
        assert_eq!(points_for_difficulty(Difficulty::Advanced), 15);
    }
}
