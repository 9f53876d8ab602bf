// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training program templates and their completion-policy parameters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The seven program completion-policy types.
///
/// The database constrains the `type` column to these values, so an unknown
/// type cannot reach the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    FreeMode,
    TargetReps,
    MaxTime,
    SetsReps,
    Pyramid,
    Emom,
    Amrap,
}

impl ProgramType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProgramType::FreeMode => "FREE_MODE",
            ProgramType::TargetReps => "TARGET_REPS",
            ProgramType::MaxTime => "MAX_TIME",
            ProgramType::SetsReps => "SETS_REPS",
            ProgramType::Pyramid => "PYRAMID",
            ProgramType::Emom => "EMOM",
            ProgramType::Amrap => "AMRAP",
        }
    }

    /// Parse a stored type string. `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FREE_MODE" => Some(ProgramType::FreeMode),
            "TARGET_REPS" => Some(ProgramType::TargetReps),
            "MAX_TIME" => Some(ProgramType::MaxTime),
            "SETS_REPS" => Some(ProgramType::SetsReps),
            "PYRAMID" => Some(ProgramType::Pyramid),
            "EMOM" => Some(ProgramType::Emom),
            "AMRAP" => Some(ProgramType::Amrap),
            _ => None,
        }
    }
}

/// Program difficulty, which drives the base score policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "BEGINNER",
            Difficulty::Intermediate => "INTERMEDIATE",
            Difficulty::Advanced => "ADVANCED",
        }
    }

    /// Parse a stored difficulty string, falling back to `Beginner` so the
    /// score policy's default applies to unrecognized values.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "INTERMEDIATE" => Difficulty::Intermediate,
            "ADVANCED" => Difficulty::Advanced,
            _ => Difficulty::Beginner,
        }
    }
}

/// Type-specific parameters as stored (nullable columns).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_reps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<i32>,
    /// Seconds, for MAX_TIME and AMRAP
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sets: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_per_set: Option<i32>,
    /// Ordered rep targets, for PYRAMID
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reps_sequence: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reps_per_minute: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_minutes: Option<i32>,
}

/// A reusable workout template. Immutable for evaluation purposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub params: ProgramParams,
    /// Attempted-use counter, bumped on every session regardless of verdict
    pub usage_count: i32,
}

/// Closed union of program kinds, each carrying only the fields its
/// completion policy needs. Built from a [`Program`] row via
/// [`Program::kind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramKind {
    FreeMode,
    TargetReps {
        target_reps: i32,
        time_limit: Option<i32>,
    },
    MaxTime {
        duration: i32,
    },
    SetsReps {
        sets: i32,
        reps_per_set: i32,
    },
    Pyramid {
        reps_sequence: Vec<i32>,
    },
    Emom {
        reps_per_minute: i32,
        total_minutes: i32,
    },
    Amrap {
        duration: i32,
    },
}

impl Program {
    /// Resolve the completion-policy kind for this program.
    ///
    /// Returns `None` when required parameters are missing for the declared
    /// type. The evaluator treats that as "not complete" rather than an
    /// error, so a session against a malformed program is still recorded.
    pub fn kind(&self) -> Option<ProgramKind> {
        let p = &self.params;
        match self.program_type {
            ProgramType::FreeMode => Some(ProgramKind::FreeMode),
            ProgramType::TargetReps => p.target_reps.map(|target_reps| ProgramKind::TargetReps {
                target_reps,
                time_limit: p.time_limit,
            }),
            ProgramType::MaxTime => p.duration.map(|duration| ProgramKind::MaxTime { duration }),
            ProgramType::SetsReps => match (p.sets, p.reps_per_set) {
                (Some(sets), Some(reps_per_set)) => {
                    Some(ProgramKind::SetsReps { sets, reps_per_set })
                }
                _ => None,
            },
            ProgramType::Pyramid => {
                if p.reps_sequence.is_empty() {
                    None
                } else {
                    Some(ProgramKind::Pyramid {
                        reps_sequence: p.reps_sequence.clone(),
                    })
                }
            }
            ProgramType::Emom => match (p.reps_per_minute, p.total_minutes) {
                (Some(reps_per_minute), Some(total_minutes)) => Some(ProgramKind::Emom {
                    reps_per_minute,
                    total_minutes,
                }),
                _ => None,
            },
            ProgramType::Amrap => p.duration.map(|duration| ProgramKind::Amrap { duration }),
        }
    }
}

/// The submitted metrics a verdict is computed from.
#[derive(Debug, Clone, Copy)]
pub struct SessionMetrics {
    pub total_reps: i32,
    /// Seconds
    pub total_duration: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(program_type: ProgramType, params: ProgramParams) -> Program {
        Program {
            id: Uuid::new_v4(),
            name: "test".to_string(),
            program_type,
            difficulty: Difficulty::Beginner,
            params,
            usage_count: 0,
        }
    }

    #[test]
    fn test_type_round_trips_through_strings() {
        for t in [
            ProgramType::FreeMode,
            ProgramType::TargetReps,
            ProgramType::MaxTime,
            ProgramType::SetsReps,
            ProgramType::Pyramid,
            ProgramType::Emom,
            ProgramType::Amrap,
        ] {
            assert_eq!(ProgramType::parse(t.as_str()), Some(t));
        }
        assert_eq!(ProgramType::parse("HANDSTAND"), None);
    }

    #[test]
    fn test_kind_requires_parameters() {
        let p = program(ProgramType::TargetReps, ProgramParams::default());
        assert_eq!(p.kind(), None);

        let p = program(
            ProgramType::TargetReps,
            ProgramParams {
                target_reps: Some(50),
                ..Default::default()
            },
        );
        assert_eq!(
            p.kind(),
            Some(ProgramKind::TargetReps {
                target_reps: 50,
                time_limit: None
            })
        );
    }

    #[test]
    fn test_empty_pyramid_sequence_is_missing() {
        let p = program(ProgramType::Pyramid, ProgramParams::default());
        assert_eq!(p.kind(), None);
    }

    #[test]
    fn test_difficulty_parse_lossy_defaults_to_beginner() {
        assert_eq!(Difficulty::parse_lossy("ADVANCED"), Difficulty::Advanced);
        assert_eq!(Difficulty::parse_lossy("LEGENDARY"), Difficulty::Beginner);
    }

    #[test]
    fn test_program_json_uses_original_field_names() {
        let p = program(
            ProgramType::Emom,
            ProgramParams {
                reps_per_minute: Some(10),
                total_minutes: Some(5),
                ..Default::default()
            },
        );
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["type"], "EMOM");
        assert_eq!(json["repsPerMinute"], 10);
        assert_eq!(json["totalMinutes"], 5);
    }
}
