// ABOUTME: Seven-day workout plan generation from age, fitness level, and goal
// ABOUTME: Intensity selection, category mix sampling, rest days, and duration estimates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Workout Planner
//!
//! Intensity is the lower of the age band and the reported fitness level.
//! Exercises are drawn from a `ChaCha8` generator seeded with the request's
//! `day_seed`, so a given profile and seed always produce the same week.

use crate::config::{CategoryDistribution, ExerciseConfig, IntelligenceConfig, Intensity};
use crate::tables::ExerciseCategory;
use fitplan_core::constants::WEEKDAYS;
use fitplan_core::models::{BodyProfile, FitnessLevel, Goal, ProfileInput};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Note attached to rest days
const REST_DAY_NOTE: &str = "Rest day - light stretching or walking recommended";

/// Note attached to the whole plan
const PLAN_NOTE: &str =
    "This is a personalized 7-day workout plan. Adjust weights and intensity as needed.";

/// One prescribed exercise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedExercise {
    /// Exercise name
    pub name: String,
    /// Training category
    pub category: ExerciseCategory,
    /// Number of sets
    pub sets: u32,
    /// Repetitions per set
    pub reps: u32,
    /// Rest between sets (s)
    pub rest_seconds: u32,
}

/// Whether a day is for training or recovery
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutDayType {
    /// Training day
    Workout,
    /// Recovery day
    Rest,
}

/// One weekday of a workout plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutDay {
    /// Weekday label
    pub day: String,
    /// Training or rest
    #[serde(rename = "type")]
    pub day_type: WorkoutDayType,
    /// Exercises; empty on rest days
    pub exercises: Vec<PlannedExercise>,
    /// Estimated session length in minutes (workout days only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
    /// Guidance for rest days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Exercise recommendation response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutRecommendation {
    /// Monday through Sunday
    pub workout_plan: Vec<WorkoutDay>,
    /// Selected intensity
    pub intensity: Intensity,
    /// Goal the plan was built for
    pub goal: Goal,
    /// Program length
    pub duration_weeks: u32,
    /// General guidance
    pub notes: String,
}

/// Lower of the age-band intensity and the fitness-level intensity
#[must_use]
pub fn exercise_intensity(profile: &BodyProfile, config: &ExerciseConfig) -> Intensity {
    let by_age = if profile.age > config.low_intensity_age {
        Intensity::Low
    } else if profile.age > config.moderate_intensity_age {
        Intensity::Moderate
    } else {
        Intensity::High
    };

    let by_fitness = match profile.fitness_level {
        Some(FitnessLevel::Beginner) => Intensity::Low,
        Some(FitnessLevel::Advanced) => Intensity::High,
        Some(FitnessLevel::Intermediate) | None => Intensity::Moderate,
    };

    by_age.min(by_fitness)
}

/// Category mix for a goal; goals without their own mix use maintenance
#[must_use]
pub const fn category_distribution(goal: Goal, config: &ExerciseConfig) -> CategoryDistribution {
    match goal {
        Goal::WeightLoss => config.weight_loss,
        Goal::MuscleGain => config.muscle_gain,
        Goal::Endurance => config.endurance,
        Goal::Maintain | Goal::WeightGain => config.maintain,
    }
}

const fn category_share(mix: &CategoryDistribution, category: ExerciseCategory) -> f64 {
    match category {
        ExerciseCategory::Cardio => mix.cardio,
        ExerciseCategory::Strength => mix.strength,
        ExerciseCategory::Core => mix.core,
        ExerciseCategory::Functional => mix.functional,
    }
}

fn workout_day(
    day: &str,
    intensity: Intensity,
    mix: &CategoryDistribution,
    config: &ExerciseConfig,
    rng: &mut ChaCha8Rng,
) -> WorkoutDay {
    let params = config.params(intensity);
    let target = params.exercises_per_day;
    let mut exercises = Vec::with_capacity(target + ExerciseCategory::ALL.len());

    for category in ExerciseCategory::ALL {
        let wanted = ((target as f64 * category_share(mix, category)).floor() as usize).max(1);
        let pool = category.exercises();
        for name in pool.choose_multiple(rng, wanted.min(pool.len())) {
            let sets = params.sets.choose(rng).copied().unwrap_or(1);
            let reps = rng.gen_range(params.reps_min..=params.reps_max);
            let rest_seconds = if category == ExerciseCategory::Strength {
                config.strength_rest_seconds
            } else {
                config.default_rest_seconds
            };
            exercises.push(PlannedExercise {
                name: (*name).to_owned(),
                category,
                sets,
                reps,
                rest_seconds,
            });
        }
    }
    exercises.truncate(target);

    let duration = exercises.len() as u32 * config.minutes_per_exercise + config.warmup_minutes;
    WorkoutDay {
        day: day.to_owned(),
        day_type: WorkoutDayType::Workout,
        exercises,
        estimated_duration: Some(duration),
        notes: None,
    }
}

/// Seven-day workout plan for a resolved profile and seed
#[must_use]
pub fn generate_workout_plan(
    profile: &BodyProfile,
    seed: u64,
    config: &ExerciseConfig,
) -> WorkoutRecommendation {
    let intensity = exercise_intensity(profile, config);
    let mix = category_distribution(profile.goal, config);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let workout_plan = WEEKDAYS
        .iter()
        .enumerate()
        .map(|(index, day)| {
            if config.rest_days.contains(&index) {
                WorkoutDay {
                    day: (*day).to_owned(),
                    day_type: WorkoutDayType::Rest,
                    exercises: Vec::new(),
                    estimated_duration: None,
                    notes: Some(REST_DAY_NOTE.to_owned()),
                }
            } else {
                workout_day(day, intensity, &mix, config, &mut rng)
            }
        })
        .collect();

    tracing::debug!(
        goal = %profile.goal,
        intensity = intensity.as_str(),
        seed,
        "Generated workout plan"
    );

    WorkoutRecommendation {
        workout_plan,
        intensity,
        goal: profile.goal,
        duration_weeks: config.duration_weeks,
        notes: PLAN_NOTE.to_owned(),
    }
}

/// Exercise recommendation for a request profile
#[must_use]
pub fn recommend_exercise(input: &ProfileInput, config: &IntelligenceConfig) -> WorkoutRecommendation {
    generate_workout_plan(&input.resolve(), input.day_seed(), &config.exercise)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(age: u32, fitness: Option<FitnessLevel>, goal: Goal) -> BodyProfile {
        BodyProfile {
            age,
            fitness_level: fitness,
            goal,
            ..BodyProfile::default()
        }
    }

    #[test]
    fn test_intensity_takes_lower_band() {
        let config = ExerciseConfig::default();
        let cases = [
            (25, Some(FitnessLevel::Advanced), Intensity::High),
            (25, None, Intensity::Moderate),
            (25, Some(FitnessLevel::Beginner), Intensity::Low),
            (40, Some(FitnessLevel::Advanced), Intensity::Moderate),
            (51, Some(FitnessLevel::Advanced), Intensity::Low),
            (35, Some(FitnessLevel::Advanced), Intensity::High),
        ];
        for (age, fitness, expected) in cases {
            assert_eq!(
                exercise_intensity(&profile(age, fitness, Goal::Maintain), &config),
                expected,
                "age {age}"
            );
        }
    }

    #[test]
    fn test_rest_days_and_counts() {
        let config = ExerciseConfig::default();
        let plan = generate_workout_plan(
            &profile(25, Some(FitnessLevel::Advanced), Goal::WeightLoss),
            7,
            &config,
        );

        assert_eq!(plan.workout_plan.len(), 7);
        assert_eq!(plan.duration_weeks, 4);
        for (index, day) in plan.workout_plan.iter().enumerate() {
            if index == 2 || index == 5 {
                assert_eq!(day.day_type, WorkoutDayType::Rest);
                assert!(day.exercises.is_empty());
                assert_eq!(day.notes.as_deref(), Some(REST_DAY_NOTE));
            } else {
                assert_eq!(day.day_type, WorkoutDayType::Workout);
                assert_eq!(day.exercises.len(), 5);
                assert_eq!(day.estimated_duration, Some(50));
            }
        }
    }

    #[test]
    fn test_exercise_parameters_within_ranges() {
        let config = ExerciseConfig::default();
        let plan = generate_workout_plan(&profile(60, None, Goal::MuscleGain), 3, &config);
        assert_eq!(plan.intensity, Intensity::Low);

        for exercise in plan.workout_plan.iter().flat_map(|d| &d.exercises) {
            assert!([2, 3].contains(&exercise.sets));
            assert!((8..=12).contains(&exercise.reps));
            let expected_rest = if exercise.category == ExerciseCategory::Strength {
                60
            } else {
                45
            };
            assert_eq!(exercise.rest_seconds, expected_rest);
        }
    }

    #[test]
    fn test_same_seed_same_plan() {
        let config = ExerciseConfig::default();
        let p = profile(30, Some(FitnessLevel::Intermediate), Goal::Endurance);
        assert_eq!(
            generate_workout_plan(&p, 11, &config),
            generate_workout_plan(&p, 11, &config)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let plan = recommend_exercise(&ProfileInput::default(), &IntelligenceConfig::default());
        let body = serde_json::to_value(&plan).unwrap();
        assert_eq!(body["workout_plan"][2]["type"], "rest");
        assert_eq!(body["workout_plan"][0]["type"], "workout");
        assert_eq!(body["intensity"], "moderate");
        assert_eq!(body["goal"], "maintain");
    }
}
