// ABOUTME: Exercise catalogue grouped by training category
// ABOUTME: Cardio, strength, core, and functional movements used by the workout planner
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Training category of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Conditioning work
    Cardio,
    /// Loaded or bodyweight strength work
    Strength,
    /// Trunk stability
    Core,
    /// Compound and accessory movements
    Functional,
}

impl ExerciseCategory {
    /// Categories in planning order
    pub const ALL: [Self; 4] = [Self::Cardio, Self::Strength, Self::Core, Self::Functional];

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cardio => "cardio",
            Self::Strength => "strength",
            Self::Core => "core",
            Self::Functional => "functional",
        }
    }

    /// Exercises in this category
    #[must_use]
    pub const fn exercises(self) -> &'static [&'static str] {
        match self {
            Self::Cardio => &[
                "Running",
                "Cycling",
                "Walking",
                "Jumping Jacks",
                "High Knees",
                "Jump Rope",
                "Burpees",
            ],
            Self::Strength => &[
                "Bench Press",
                "Deadlifts",
                "Squats",
                "Pull-ups",
                "Push-ups",
                "Dumbbell Rows",
                "Shoulder Press",
            ],
            Self::Core => &["Russian Twists", "Planks", "Sit-ups", "Mountain Climbers"],
            Self::Functional => &[
                "Kettlebell Swings",
                "Lunges",
                "Leg Press",
                "Tricep Dips",
                "Bicep Curls",
                "Bodyweight Squats",
            ],
        }
    }
}

impl fmt::Display for ExerciseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
