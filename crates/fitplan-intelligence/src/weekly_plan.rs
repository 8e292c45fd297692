// ABOUTME: Weekly meal plan assembly with per-day calorie variation and local fallback
// ABOUTME: Seven weekday entries built from a pluggable daily target source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Weekly Plan Assembler
//!
//! For each weekday `i` (Monday = 0) the assembler asks a [`DailyTargetSource`]
//! for base targets with `day_seed = i`, scales the calories by
//! `1 + 0.1·sin(0.7i) + 0.05·cos(1.3i)`, and splits them into meals. A failing
//! source never fails the plan: that day is recomputed locally and marked
//! [`DaySource::Fallback`].
//!
//! With a recipe catalogue, meals come from the catalogue and a recipe is used
//! at most once per week while enough unused candidates remain.

use crate::config::{IntelligenceConfig, PlanConfig};
use crate::meal_planner::{meal_from_recipe, plan_meal, MealRecommendation};
use crate::metabolic::{calculate_daily_targets, round_whole};
use crate::recipes::{RecipeCatalogue, RecipeHistory};
use async_trait::async_trait;
use fitplan_core::constants::WEEKDAYS;
use fitplan_core::errors::AppResult;
use fitplan_core::models::{Goal, MealType, ProfileInput, TargetSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Provides the base daily targets for one day of a weekly plan
#[async_trait]
pub trait DailyTargetSource: Send + Sync {
    /// Base targets for a profile; `input.day_seed` carries the day index
    ///
    /// # Errors
    ///
    /// Returns an error if the targets could not be obtained
    async fn daily_targets(&self, input: &ProfileInput) -> AppResult<TargetSummary>;
}

/// Computes targets in-process with the metabolic calculator
#[derive(Debug, Clone, Default)]
pub struct LocalTargetSource {
    config: IntelligenceConfig,
}

impl LocalTargetSource {
    /// Create a source using the given settings
    #[must_use]
    pub const fn new(config: IntelligenceConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl DailyTargetSource for LocalTargetSource {
    async fn daily_targets(&self, input: &ProfileInput) -> AppResult<TargetSummary> {
        Ok(local_targets(input, &self.config))
    }
}

fn local_targets(input: &ProfileInput, config: &IntelligenceConfig) -> TargetSummary {
    calculate_daily_targets(&input.resolve(), &config.nutrition).summary()
}

/// Where a day's base targets came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySource {
    /// The configured target source answered
    Remote,
    /// The source failed and targets were computed locally
    Fallback,
}

/// One weekday of a weekly meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayMealPlan {
    /// Weekday label
    pub day: String,
    /// Weekday index, Monday = 0
    pub day_index: usize,
    /// Calorie variation multiplier
    pub multiplier: f64,
    /// Base targets before variation
    pub base_targets: TargetSummary,
    /// Day calories after variation
    pub daily_calories: i64,
    /// Breakfast
    pub breakfast: MealRecommendation,
    /// Lunch
    pub lunch: MealRecommendation,
    /// Dinner
    pub dinner: MealRecommendation,
    /// Snack, planned for high-calorie days and gain goals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snack: Option<MealRecommendation>,
    /// Origin of the base targets
    pub source: DaySource,
}

impl DayMealPlan {
    /// Meals in eating order
    pub fn meals(&self) -> impl Iterator<Item = &MealRecommendation> {
        [Some(&self.breakfast), Some(&self.lunch), self.snack.as_ref(), Some(&self.dinner)]
            .into_iter()
            .flatten()
    }
}

/// Seven-day meal plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyMealPlan {
    /// Goal the plan was built for
    pub goal: Goal,
    /// Monday through Sunday
    pub days: Vec<DayMealPlan>,
    /// Sum of day calories
    pub total_weekly_calories: i64,
    /// Mean day calories (rounded)
    pub average_daily_calories: i64,
    /// Number of days computed locally after a source failure
    pub fallback_days: usize,
}

/// Calorie variation for a weekday: `1 + a·sin(f·i) + b·cos(g·i)`
#[must_use]
pub fn variation_multiplier(day_index: usize, config: &PlanConfig) -> f64 {
    let i = day_index as f64;
    1.0 + config.variation_sin_amplitude * (config.variation_sin_frequency * i).sin()
        + config.variation_cos_amplitude * (config.variation_cos_frequency * i).cos()
}

/// Whether a day gets a snack slot
#[must_use]
pub fn needs_snack(day_calories: i64, goal: Goal, config: &PlanConfig) -> bool {
    day_calories as f64 > config.snack_calorie_threshold || goal.is_gain_oriented()
}

struct DayRequest {
    day_index: usize,
    base_targets: TargetSummary,
    goal: Goal,
    source: DaySource,
}

fn build_day(
    request: DayRequest,
    config: &IntelligenceConfig,
    recipes: Option<&RecipeCatalogue>,
    history: &mut RecipeHistory,
) -> DayMealPlan {
    let DayRequest {
        day_index,
        base_targets,
        goal,
        source,
    } = request;
    let plan = &config.plan;
    let multiplier = variation_multiplier(day_index, plan);
    let daily_calories = round_whole(base_targets.daily_calories as f64 * multiplier);
    let snack = needs_snack(daily_calories, goal, plan);

    let split = plan.split_for(goal);
    let scale = if snack { 1.0 - plan.snack_share } else { 1.0 };
    let seed = day_index as u64;
    let slots = if snack { 4 } else { 3 };
    let mut slot = |meal: MealType, share: f64, position: usize| {
        let calories = (daily_calories as f64 * share).trunc() as i64;
        recipes
            .and_then(|catalogue| {
                catalogue.select(
                    calories as f64,
                    slots,
                    goal,
                    seed,
                    position,
                    history,
                    &config.recipes,
                )
            })
            .map_or_else(
                || plan_meal(meal, calories, goal, seed, position, plan),
                |pick| meal_from_recipe(pick, meal),
            )
    };

    DayMealPlan {
        day: WEEKDAYS
            .get(day_index)
            .map_or_else(|| format!("Day {}", day_index + 1), |d| (*d).to_owned()),
        day_index,
        multiplier,
        base_targets,
        daily_calories,
        breakfast: slot(MealType::Breakfast, split.breakfast * scale, 0),
        lunch: slot(MealType::Lunch, split.lunch * scale, 1),
        snack: snack.then(|| slot(MealType::Snack, plan.snack_share, 2)),
        dinner: slot(MealType::Dinner, split.dinner * scale, 3),
        source,
    }
}

/// Assemble a Monday-to-Sunday meal plan
///
/// Days are requested one after another. A source error for a day is logged and
/// replaced by the local calculation; it is never retried.
pub async fn assemble_weekly_meal_plan(
    input: &ProfileInput,
    source: &dyn DailyTargetSource,
    config: &IntelligenceConfig,
) -> WeeklyMealPlan {
    assemble_weekly_meal_plan_with_recipes(input, source, config, None).await
}

/// Assemble a weekly plan whose meals come from `recipes` when given
pub async fn assemble_weekly_meal_plan_with_recipes(
    input: &ProfileInput,
    source: &dyn DailyTargetSource,
    config: &IntelligenceConfig,
    recipes: Option<&RecipeCatalogue>,
) -> WeeklyMealPlan {
    let goal = input.resolve().goal;
    let mut days = Vec::with_capacity(WEEKDAYS.len());
    let mut history = RecipeHistory::new();

    for (day_index, day) in WEEKDAYS.iter().enumerate() {
        let day_input = input.with_day_seed(day_index as u64);
        let (targets, origin) = match source.daily_targets(&day_input).await {
            Ok(targets) => (targets, DaySource::Remote),
            Err(e) => {
                warn!(day = %day, error = %e, "Daily target source failed, using local calculation");
                (local_targets(&day_input, config), DaySource::Fallback)
            }
        };
        let request = DayRequest {
            day_index,
            base_targets: targets,
            goal,
            source: origin,
        };
        days.push(build_day(request, config, recipes, &mut history));
    }

    let total_weekly_calories = days
        .iter()
        .map(|d| d.daily_calories)
        .fold(0_i64, i64::saturating_add);
    let fallback_days = days
        .iter()
        .filter(|d| d.source == DaySource::Fallback)
        .count();
    debug!(
        goal = %goal,
        total_weekly_calories,
        fallback_days,
        "Assembled weekly meal plan"
    );

    WeeklyMealPlan {
        goal,
        total_weekly_calories,
        average_daily_calories: round_whole(total_weekly_calories as f64 / days.len() as f64),
        fallback_days,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::Recipe;
    use fitplan_core::errors::AppError;

    struct FailingSource;

    #[async_trait]
    impl DailyTargetSource for FailingSource {
        async fn daily_targets(&self, _input: &ProfileInput) -> AppResult<TargetSummary> {
            Err(AppError::external_unavailable("recommender", "connection refused"))
        }
    }

    #[test]
    fn test_variation_multiplier_monday() {
        // sin(0) = 0, cos(0) = 1
        assert!((variation_multiplier(0, &PlanConfig::default()) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn test_variation_multiplier_is_deterministic() {
        let config = PlanConfig::default();
        for i in 0..7 {
            let expected = 1.0 + 0.1 * (0.7 * i as f64).sin() + 0.05 * (1.3 * i as f64).cos();
            assert!((variation_multiplier(i, &config) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_snack_rule() {
        let config = PlanConfig::default();
        assert!(!needs_snack(2500, Goal::Maintain, &config));
        assert!(needs_snack(2501, Goal::Maintain, &config));
        assert!(needs_snack(1600, Goal::WeightGain, &config));
        assert!(needs_snack(1600, Goal::MuscleGain, &config));
        assert!(!needs_snack(1600, Goal::WeightLoss, &config));
    }

    #[tokio::test]
    async fn test_local_source_plan() {
        let config = IntelligenceConfig::default();
        let plan = assemble_weekly_meal_plan(
            &ProfileInput::default(),
            &LocalTargetSource::new(config.clone()),
            &config,
        )
        .await;

        assert_eq!(plan.days.len(), 7);
        assert_eq!(plan.days[0].day, "Monday");
        assert_eq!(plan.days[6].day, "Sunday");
        assert_eq!(plan.fallback_days, 0);
        for day in &plan.days {
            assert_eq!(day.source, DaySource::Remote);
            assert_eq!(
                day.snack.is_some(),
                needs_snack(day.daily_calories, plan.goal, &config.plan)
            );
        }
    }

    #[tokio::test]
    async fn test_failing_source_falls_back_every_day() {
        let config = IntelligenceConfig::default();
        let input = ProfileInput {
            goal: Some("weight_loss".into()),
            ..ProfileInput::default()
        };
        let remote = assemble_weekly_meal_plan(
            &input,
            &LocalTargetSource::new(config.clone()),
            &config,
        )
        .await;
        let fallback = assemble_weekly_meal_plan(&input, &FailingSource, &config).await;

        assert_eq!(fallback.fallback_days, 7);
        for (a, b) in remote.days.iter().zip(&fallback.days) {
            assert_eq!(b.source, DaySource::Fallback);
            assert_eq!(a.daily_calories, b.daily_calories);
            assert_eq!(a.breakfast.name, b.breakfast.name);
        }
    }

    #[tokio::test]
    async fn test_catalogue_week_does_not_repeat_recipes() {
        let recipes: Vec<_> = (0..200)
            .map(|i| Recipe {
                id: format!("r{i}"),
                name: format!("Dish {i}"),
                calories: f64::from(300 + i * 5),
                protein: f64::from(20 + i % 7),
                carbs: 45.0,
                fat: 12.0,
                ingredients: vec!["rice".into()],
                instructions: vec!["Cook.".into()],
                image_url: String::new(),
                rating: Some(4.2),
            })
            .collect();
        let catalogue = RecipeCatalogue::from_recipes(recipes).unwrap();
        let config = IntelligenceConfig::default();

        let plan = assemble_weekly_meal_plan_with_recipes(
            &ProfileInput::default(),
            &LocalTargetSource::new(config.clone()),
            &config,
            Some(&catalogue),
        )
        .await;

        let ids: Vec<_> = plan
            .days
            .iter()
            .flat_map(DayMealPlan::meals)
            .map(|m| m.recipe_id.clone())
            .collect();
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert!(ids.iter().all(|id| id.starts_with('r')));
        assert_eq!(unique.len(), ids.len());
        assert_ne!(plan.days[0].breakfast.recipe_id, plan.days[1].breakfast.recipe_id);
    }

    #[tokio::test]
    async fn test_gain_goal_always_has_snack() {
        let config = IntelligenceConfig::default();
        let input = ProfileInput {
            goal: Some("muscle_gain".into()),
            weight: Some(55.0.into()),
            ..ProfileInput::default()
        };
        let plan = assemble_weekly_meal_plan(&input, &FailingSource, &config).await;
        assert!(plan.days.iter().all(|d| d.snack.is_some()));
        assert!(plan.days.iter().all(|d| d.meals().count() == 4));
    }
}
