// ABOUTME: Workout planning configuration: intensity parameters and category mixes
// ABOUTME: Sets, rep ranges, exercises per day, rest days, and goal distributions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Training intensity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    /// Fewer sets, lower reps
    Low,
    /// Middle ground
    Moderate,
    /// Most sets and reps
    High,
}

impl Intensity {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

/// Volume parameters for one intensity tier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntensityParams {
    /// Set counts to draw from
    pub sets: Vec<u32>,
    /// Minimum reps (inclusive)
    pub reps_min: u32,
    /// Maximum reps (inclusive)
    pub reps_max: u32,
    /// Exercises per workout day
    pub exercises_per_day: usize,
}

/// Category shares of a workout day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryDistribution {
    /// Cardio share
    pub cardio: f64,
    /// Strength share
    pub strength: f64,
    /// Core share
    pub core: f64,
    /// Functional share
    pub functional: f64,
}

impl CategoryDistribution {
    fn sum(&self) -> f64 {
        self.cardio + self.strength + self.core + self.functional
    }
}

/// Workout planning configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExerciseConfig {
    /// Low intensity parameters
    pub low: IntensityParams,
    /// Moderate intensity parameters
    pub moderate: IntensityParams,
    /// High intensity parameters
    pub high: IntensityParams,
    /// Ages above this are capped at low intensity
    pub low_intensity_age: u32,
    /// Ages above this are capped at moderate intensity
    pub moderate_intensity_age: u32,
    /// Weight loss mix
    pub weight_loss: CategoryDistribution,
    /// Muscle gain mix
    pub muscle_gain: CategoryDistribution,
    /// Maintenance mix, also used by goals without their own mix
    pub maintain: CategoryDistribution,
    /// Endurance mix
    pub endurance: CategoryDistribution,
    /// Weekday indexes (Monday = 0) without a workout
    pub rest_days: Vec<usize>,
    /// Rest between strength sets (s)
    pub strength_rest_seconds: u32,
    /// Rest between other sets (s)
    pub default_rest_seconds: u32,
    /// Estimated minutes per exercise
    pub minutes_per_exercise: u32,
    /// Warm-up and cool-down minutes added to each workout
    pub warmup_minutes: u32,
    /// Length of the program in weeks
    pub duration_weeks: u32,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            low: IntensityParams {
                sets: vec![2, 3],
                reps_min: 8,
                reps_max: 12,
                exercises_per_day: 3,
            },
            moderate: IntensityParams {
                sets: vec![3, 4],
                reps_min: 10,
                reps_max: 15,
                exercises_per_day: 4,
            },
            high: IntensityParams {
                sets: vec![3, 5],
                reps_min: 12,
                reps_max: 20,
                exercises_per_day: 5,
            },
            low_intensity_age: 50,
            moderate_intensity_age: 35,
            weight_loss: CategoryDistribution {
                cardio: 0.4,
                strength: 0.3,
                core: 0.2,
                functional: 0.1,
            },
            muscle_gain: CategoryDistribution {
                cardio: 0.2,
                strength: 0.5,
                core: 0.1,
                functional: 0.2,
            },
            maintain: CategoryDistribution {
                cardio: 0.3,
                strength: 0.3,
                core: 0.2,
                functional: 0.2,
            },
            endurance: CategoryDistribution {
                cardio: 0.5,
                strength: 0.2,
                core: 0.2,
                functional: 0.1,
            },
            rest_days: vec![2, 5],
            strength_rest_seconds: 60,
            default_rest_seconds: 45,
            minutes_per_exercise: 8,
            warmup_minutes: 10,
            duration_weeks: 4,
        }
    }
}

impl ExerciseConfig {
    /// Parameters for an intensity tier
    #[must_use]
    pub const fn params(&self, intensity: Intensity) -> &IntensityParams {
        match intensity {
            Intensity::Low => &self.low,
            Intensity::Moderate => &self.moderate,
            Intensity::High => &self.high,
        }
    }

    /// Validate parameters and distributions
    ///
    /// # Errors
    ///
    /// Returns an error if a tier is empty, a rep range is inverted, or a mix does not sum to one
    pub fn validate(&self) -> Result<(), ConfigError> {
        for params in [&self.low, &self.moderate, &self.high] {
            if params.sets.is_empty() || params.exercises_per_day == 0 {
                return Err(ConfigError::InvalidRange(
                    "Intensity tiers need set counts and at least one exercise",
                ));
            }
            if params.reps_min > params.reps_max {
                return Err(ConfigError::InvalidRange(
                    "Minimum reps must not exceed maximum reps",
                ));
            }
        }

        for mix in [
            self.weight_loss,
            self.muscle_gain,
            self.maintain,
            self.endurance,
        ] {
            if (mix.sum() - 1.0).abs() > 1e-6 {
                return Err(ConfigError::InvalidWeights(
                    "Category distributions must sum to 1.0",
                ));
            }
        }

        if self.rest_days.iter().any(|d| *d > 6) {
            return Err(ConfigError::InvalidRange(
                "Rest days must be weekday indexes 0-6",
            ));
        }

        Ok(())
    }
}
