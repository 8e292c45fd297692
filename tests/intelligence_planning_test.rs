// ABOUTME: Integration tests for the nutrition and workout planners
// ABOUTME: Lenient profile input, meal budgets, weekly assembly with partial source failure, workout shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use async_trait::async_trait;
use fitplan_core::errors::{AppError, AppResult};
use fitplan_core::models::{Goal, MealType, ProfileInput, TargetSummary};
use fitplan_intelligence::config::Intensity;
use fitplan_intelligence::tables::ExerciseCategory;
use fitplan_intelligence::weekly_plan::variation_multiplier;
use fitplan_intelligence::workout_plan::WorkoutDayType;
use fitplan_intelligence::{
    assemble_weekly_meal_plan, calculate_daily_targets, recommend_diet, recommend_exercise,
    DailyTargetSource, DaySource, IntelligenceConfig, LocalTargetSource,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

fn input(value: Value) -> ProfileInput {
    serde_json::from_value(value).unwrap()
}

const GOALS: [&str; 5] = [
    "maintain",
    "weight_loss",
    "weight_gain",
    "muscle_gain",
    "endurance",
];

// ============================================================================
// Profile input
// ============================================================================

#[test]
fn test_numeric_strings_match_numbers() {
    let config = IntelligenceConfig::default();
    let from_numbers = recommend_diet(
        &input(json!({"weight": 82.5, "height": 181, "age": 44})),
        &config,
    );
    let from_strings = recommend_diet(
        &input(json!({"weight": "82.5", "height": " 181 ", "age": "44"})),
        &config,
    );

    assert_eq!(from_numbers.targets, from_strings.targets);
}

#[test]
fn test_unusable_fields_fall_back_to_defaults() {
    let config = IntelligenceConfig::default();
    let defaults = recommend_diet(&ProfileInput::default(), &config);
    let garbage = recommend_diet(
        &input(json!({
            "weight": "heavy",
            "height": -3,
            "age": [30],
            "gender": "unspecified",
            "activity_level": "couch",
            "goal": "world_domination"
        })),
        &config,
    );

    assert_eq!(defaults.targets, garbage.targets);
    assert_eq!(garbage.goal_insights.goal, Goal::Maintain);
}

// ============================================================================
// Single-day diet
// ============================================================================

#[test]
fn test_rounded_macros_stay_within_rounding_of_target() {
    let config = IntelligenceConfig::default();
    let bodies = [
        (45.0, 150.0, 19),
        (70.0, 175.0, 30),
        (92.0, 180.0, 44),
        (130.0, 195.0, 58),
        (300.0, 210.0, 70),
    ];

    for goal in GOALS {
        for gender in ["male", "female"] {
            for (weight, height, age) in bodies {
                let profile = input(json!({
                    "weight": weight,
                    "height": height,
                    "age": age,
                    "gender": gender,
                    "goal": goal,
                }))
                .resolve();
                let summary = calculate_daily_targets(&profile, &config.nutrition).summary();

                // Each of the three macros and the target round by at most 0.5
                let energy = 4 * summary.protein + 4 * summary.carbs + 9 * summary.fat;
                assert!(
                    (energy - summary.daily_calories).abs() <= 9,
                    "{goal} {gender} {weight}kg: {energy} vs {}",
                    summary.daily_calories
                );
            }
        }
    }
}

#[test]
fn test_meals_never_exceed_daily_target() {
    let config = IntelligenceConfig::default();
    for goal in GOALS {
        for meal_count in 3..=5 {
            let rec = recommend_diet(
                &input(json!({
                    "weight": 95, "height": 170, "age": 52, "gender": "female",
                    "goal": goal, "meal_count": meal_count
                })),
                &config,
            );

            assert_eq!(rec.meals.len(), meal_count as usize, "{goal}");
            let total: i64 = rec.meals.iter().map(|m| m.calories).sum();
            assert!(total <= rec.targets.daily_calories, "{goal} {meal_count}");
            assert!(total >= rec.targets.daily_calories - meal_count, "{goal} {meal_count}");
            assert_eq!(rec.meal_analytics.total_meal_calories, total);
        }
    }
}

#[test]
fn test_four_meal_layout_places_snack_before_dinner() {
    let rec = recommend_diet(
        &input(json!({"meal_count": 4})),
        &IntelligenceConfig::default(),
    );
    let types: Vec<_> = rec.meals.iter().map(|m| m.meal_type).collect();

    assert_eq!(
        types,
        vec![
            MealType::Breakfast,
            MealType::Lunch,
            MealType::Snack,
            MealType::Dinner
        ]
    );
}

#[test]
fn test_day_seed_keeps_targets_and_ids_vary() {
    let config = IntelligenceConfig::default();
    let monday = recommend_diet(&input(json!({"day_seed": 0})), &config);
    let tuesday = recommend_diet(&input(json!({"day_seed": 1})), &config);

    assert_eq!(monday.targets, tuesday.targets);
    assert_ne!(monday.meals[0].recipe_id, tuesday.meals[0].recipe_id);
}

// ============================================================================
// Weekly plan
// ============================================================================

/// Answers from the local calculator except on the listed weekdays
struct FlakySource {
    failing_days: Vec<u64>,
    calls: AtomicUsize,
    local: LocalTargetSource,
}

#[async_trait]
impl DailyTargetSource for FlakySource {
    async fn daily_targets(&self, input: &ProfileInput) -> AppResult<TargetSummary> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_days.contains(&input.day_seed()) {
            return Err(AppError::process_failed("worker crashed"));
        }
        self.local.daily_targets(input).await
    }
}

#[tokio::test]
async fn test_partial_source_failure_falls_back_per_day() {
    let config = IntelligenceConfig::default();
    let source = FlakySource {
        failing_days: vec![2, 6],
        calls: AtomicUsize::new(0),
        local: LocalTargetSource::default(),
    };
    let profile = input(json!({"weight": 70, "height": 175, "age": 30, "activity_level": "moderate"}));

    let plan = assemble_weekly_meal_plan(&profile, &source, &config).await;

    assert_eq!(source.calls.load(Ordering::SeqCst), 7);
    assert_eq!(plan.fallback_days, 2);
    for day in &plan.days {
        let expected = if [2, 6].contains(&day.day_index) {
            DaySource::Fallback
        } else {
            DaySource::Remote
        };
        assert_eq!(day.source, expected, "{}", day.day);
        assert_eq!(day.base_targets.daily_calories, 2556);
    }
    assert_eq!(plan.days[2].day, "Wednesday");
}

#[tokio::test]
async fn test_weekly_totals_and_variation() {
    let config = IntelligenceConfig::default();
    let plan = assemble_weekly_meal_plan(
        &input(json!({"weight": 70, "height": 175, "age": 30})),
        &LocalTargetSource::default(),
        &config,
    )
    .await;

    let total: i64 = plan.days.iter().map(|d| d.daily_calories).sum();
    assert_eq!(plan.total_weekly_calories, total);
    assert_eq!(
        plan.average_daily_calories,
        (total as f64 / 7.0).round() as i64
    );

    // Monday: 1 + 0.1·sin(0) + 0.05·cos(0)
    assert!((variation_multiplier(0, &config.plan) - 1.05).abs() < 1e-12);
    for day in &plan.days {
        let expected = (day.base_targets.daily_calories as f64 * day.multiplier).round() as i64;
        assert_eq!(day.daily_calories, expected);
        let meal_total: i64 = day.meals().map(|m| m.calories).sum();
        assert!(meal_total <= day.daily_calories);
    }
}

#[tokio::test]
async fn test_snack_threshold_is_configurable() {
    let profile = input(json!({"weight": 70, "height": 175, "age": 30}));

    let low = IntelligenceConfig::default().with_snack_threshold(1000.0);
    let plan = assemble_weekly_meal_plan(&profile, &LocalTargetSource::new(low.clone()), &low).await;
    assert!(plan.days.iter().all(|d| d.snack.is_some()));

    let high = IntelligenceConfig::default().with_snack_threshold(10_000.0);
    let plan = assemble_weekly_meal_plan(&profile, &LocalTargetSource::new(high.clone()), &high).await;
    assert!(plan.days.iter().all(|d| d.snack.is_none()));
}

// ============================================================================
// Workout plan
// ============================================================================

#[test]
fn test_workout_days_follow_intensity_parameters() {
    let config = IntelligenceConfig::default();
    let cases = [
        (json!({"age": 25, "fitness_level": "advanced", "goal": "muscle_gain"}), Intensity::High),
        (json!({"age": 40, "goal": "weight_loss"}), Intensity::Moderate),
        (json!({"age": 60, "fitness_level": "advanced", "goal": "endurance"}), Intensity::Low),
    ];

    for (profile, intensity) in cases {
        let rec = recommend_exercise(&input(profile), &config);
        assert_eq!(rec.intensity, intensity);

        let params = config.exercise.params(intensity);
        for day in &rec.workout_plan {
            if day.day_type == WorkoutDayType::Rest {
                assert!(day.exercises.is_empty());
                assert!(day.estimated_duration.is_none());
                continue;
            }
            assert_eq!(day.exercises.len(), params.exercises_per_day);
            assert_eq!(
                day.estimated_duration,
                Some(day.exercises.len() as u32 * 8 + 10)
            );
            for exercise in &day.exercises {
                assert!(params.sets.contains(&exercise.sets));
                assert!((params.reps_min..=params.reps_max).contains(&exercise.reps));
                let rest = if exercise.category == ExerciseCategory::Strength {
                    60
                } else {
                    45
                };
                assert_eq!(exercise.rest_seconds, rest);
            }
        }
    }
}

#[test]
fn test_workout_rest_days_are_wednesday_and_saturday() {
    let rec = recommend_exercise(&ProfileInput::default(), &IntelligenceConfig::default());
    let rest: Vec<_> = rec
        .workout_plan
        .iter()
        .filter(|d| d.day_type == WorkoutDayType::Rest)
        .map(|d| d.day.as_str())
        .collect();

    assert_eq!(rest, vec!["Wednesday", "Saturday"]);
}

#[test]
fn test_workout_plan_is_reproducible_per_seed() {
    let config = IntelligenceConfig::default();
    let profile = input(json!({"age": 28, "goal": "weight_loss", "day_seed": 4}));

    assert_eq!(
        recommend_exercise(&profile, &config),
        recommend_exercise(&profile, &config)
    );
}
