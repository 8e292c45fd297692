// ABOUTME: Single-day meal planning: calorie splits, per-meal macros, and meal analytics
// ABOUTME: Builds the diet recommendation returned by the diet endpoint and the worker
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Meal Planner
//!
//! A day is split into meal slots by a goal-dependent ratio table. Each slot gets
//! a name from the lookup tables plus calorie and macro targets:
//!
//! - protein = `calories × share × boost / 4` (share 0.25 for gain goals, else 0.20)
//! - carbs and fat from per-meal-type calorie shares
//!
//! All per-meal values are truncated to whole numbers.
//!
//! When a [`RecipeCatalogue`] is loaded, each slot is filled with a catalogue
//! recipe near the slot calories instead, carrying the recipe's own nutrition.

use crate::config::{IntelligenceConfig, PlanConfig};
use crate::metabolic::{calculate_daily_targets, goal_insights, round_to, GoalInsights};
use crate::recipes::{RecipeCatalogue, RecipeHistory, RecipePick};
use crate::tables::meals::{
    meal_ingredients, meal_instructions, meal_name, meal_timing, portion_guidance,
};
use fitplan_core::constants::units::{KCAL_PER_GRAM_CARB, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN};
use fitplan_core::models::{Goal, MealType, ProfileInput, TargetSummary};
use serde::{Deserialize, Serialize};

/// Category attached to every generated meal
const MEAL_CATEGORY: &str = "main_course";

/// One planned meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRecommendation {
    /// Stable identifier derived from meal type, goal, and day
    pub recipe_id: String,
    /// Display name
    pub name: String,
    /// Dish category
    pub category: String,
    /// Meal slot
    pub meal_type: MealType,
    /// Calories (kcal)
    pub calories: i64,
    /// Protein (g)
    pub protein: i64,
    /// Carbohydrate (g)
    pub carbs: i64,
    /// Fat (g)
    pub fat: i64,
    /// Ingredient list
    pub ingredients: Vec<String>,
    /// Preparation and eating instructions
    pub instructions: Vec<String>,
    /// Rating out of 5
    pub rating: f64,
    /// Image URL; generated meals have none
    pub image_url: String,
    /// Percentage of calories from protein (one decimal)
    pub protein_density: f64,
    /// Goal alignment score
    pub goal_alignment: f64,
    /// Suggested eating window
    pub meal_timing: String,
    /// Portion size label
    pub portion_size: String,
}

/// Totals and accuracy of a day's meals against its targets
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealAnalytics {
    /// Sum of meal calories
    pub total_meal_calories: i64,
    /// Sum of meal protein
    pub total_meal_protein: i64,
    /// Sum of meal carbohydrate
    pub total_meal_carbs: i64,
    /// Sum of meal fat
    pub total_meal_fat: i64,
    /// Meal calories as a percentage of the daily target (one decimal)
    pub calorie_accuracy: f64,
    /// Meal protein as a percentage of the protein target (one decimal)
    pub protein_accuracy: f64,
    /// Mean meal rating (one decimal)
    pub avg_meal_rating: f64,
    /// Goal alignment score of the plan
    pub goal_alignment: f64,
}

/// Single-day diet recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietRecommendation {
    /// Rounded daily targets, flattened into the top level
    #[serde(flatten)]
    pub targets: TargetSummary,
    /// Planned meals in eating order
    pub meals: Vec<MealRecommendation>,
    /// Meal totals and accuracy
    pub meal_analytics: MealAnalytics,
    /// Goal interpretation of the targets
    pub goal_insights: GoalInsights,
}

/// Calorie shares of each slot for a day with `snacks` snack slots (0, 1, or 2)
///
/// One snack takes the configured snack share and is placed between lunch and
/// dinner; two snacks sit after breakfast and after lunch. Main meals are scaled
/// down by the share the snacks take.
#[must_use]
pub fn meal_shares(goal: Goal, snacks: u8, config: &PlanConfig) -> Vec<(MealType, f64)> {
    let split = config.split_for(goal);
    match snacks {
        0 => vec![
            (MealType::Breakfast, split.breakfast),
            (MealType::Lunch, split.lunch),
            (MealType::Dinner, split.dinner),
        ],
        1 => {
            let scale = 1.0 - config.snack_share;
            vec![
                (MealType::Breakfast, split.breakfast * scale),
                (MealType::Lunch, split.lunch * scale),
                (MealType::Snack, config.snack_share),
                (MealType::Dinner, split.dinner * scale),
            ]
        }
        _ => {
            let share = config.double_snack_share;
            let scale = 2.0f64.mul_add(-share, 1.0);
            vec![
                (MealType::Breakfast, split.breakfast * scale),
                (MealType::Snack, share),
                (MealType::Lunch, split.lunch * scale),
                (MealType::Snack, share),
                (MealType::Dinner, split.dinner * scale),
            ]
        }
    }
}

/// Build one meal for a slot
///
/// `slot` distinguishes repeated meal types within a day in the recipe id.
#[must_use]
pub fn plan_meal(
    meal_type: MealType,
    calories: i64,
    goal: Goal,
    day_index: u64,
    slot: usize,
    config: &PlanConfig,
) -> MealRecommendation {
    let kcal = calories as f64;
    let protein = (kcal * config.protein_share(goal) * config.protein_boost(goal, meal_type)
        / KCAL_PER_GRAM_PROTEIN)
        .trunc() as i64;
    let share = config.macro_share(meal_type);
    let carbs = (kcal * share.carbs / KCAL_PER_GRAM_CARB).trunc() as i64;
    let fat = (kcal * share.fat / KCAL_PER_GRAM_FAT).trunc() as i64;

    let protein_density = if calories > 0 {
        round_to(protein as f64 * KCAL_PER_GRAM_PROTEIN / kcal * 100.0, 1)
    } else {
        0.0
    };

    MealRecommendation {
        recipe_id: format!("fitplan_{}_{}_{day_index}_{slot}", meal_type.as_str(), goal.as_str()),
        name: meal_name(meal_type, goal, day_index).to_owned(),
        category: MEAL_CATEGORY.to_owned(),
        meal_type,
        calories,
        protein,
        carbs,
        fat,
        ingredients: meal_ingredients(meal_type, goal)
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        instructions: meal_instructions(meal_type)
            .iter()
            .map(|s| (*s).to_owned())
            .collect(),
        rating: config.default_meal_rating,
        image_url: String::new(),
        protein_density,
        goal_alignment: config.goal_alignment_score,
        meal_timing: meal_timing(meal_type).to_owned(),
        portion_size: portion_guidance(meal_type, calories).to_owned(),
    }
}

/// Meals for a day: each slot gets `trunc(daily_calories × share)` calories
#[must_use]
pub fn plan_day_meals(
    daily_calories: i64,
    goal: Goal,
    snacks: u8,
    day_index: u64,
    config: &PlanConfig,
) -> Vec<MealRecommendation> {
    meal_shares(goal, snacks, config)
        .into_iter()
        .enumerate()
        .map(|(slot, (meal_type, share))| {
            let calories = (daily_calories as f64 * share).trunc() as i64;
            plan_meal(meal_type, calories, goal, day_index, slot, config)
        })
        .collect()
}

/// Build a meal from a catalogue recipe, keeping the recipe's own nutrition
#[must_use]
pub fn meal_from_recipe(pick: RecipePick<'_>, meal_type: MealType) -> MealRecommendation {
    let recipe = pick.recipe;
    let density = recipe.protein_density();
    MealRecommendation {
        recipe_id: recipe.id.clone(),
        name: recipe.name.clone(),
        category: MEAL_CATEGORY.to_owned(),
        meal_type,
        calories: recipe.calories.trunc() as i64,
        protein: recipe.protein.trunc() as i64,
        carbs: recipe.carbs.trunc() as i64,
        fat: recipe.fat.trunc() as i64,
        ingredients: recipe.ingredients.clone(),
        instructions: recipe.instructions.clone(),
        rating: recipe
            .rating
            .unwrap_or_else(|| density.mul_add(0.2, 3.5).clamp(3.0, 5.0)),
        image_url: recipe.image_url.clone(),
        protein_density: round_to(density, 1),
        goal_alignment: round_to(pick.score, 1),
        meal_timing: meal_timing(meal_type).to_owned(),
        portion_size: portion_guidance(meal_type, recipe.calories.trunc() as i64).to_owned(),
    }
}

/// Meals for a day drawn from a catalogue, skipping recipes in `history`
///
/// Slots the catalogue cannot fill get a table meal.
#[must_use]
pub fn plan_day_meals_from_catalogue(
    daily_calories: i64,
    goal: Goal,
    snacks: u8,
    day_index: u64,
    catalogue: &RecipeCatalogue,
    history: &mut RecipeHistory,
    config: &IntelligenceConfig,
) -> Vec<MealRecommendation> {
    let shares = meal_shares(goal, snacks, &config.plan);
    let slots = shares.len();
    shares
        .into_iter()
        .enumerate()
        .map(|(slot, (meal_type, share))| {
            let calories = (daily_calories as f64 * share).trunc() as i64;
            catalogue
                .select(
                    calories as f64,
                    slots,
                    goal,
                    day_index,
                    slot,
                    history,
                    &config.recipes,
                )
                .map_or_else(
                    || plan_meal(meal_type, calories, goal, day_index, slot, &config.plan),
                    |pick| meal_from_recipe(pick, meal_type),
                )
        })
        .collect()
}

/// Totals and accuracy of planned meals
#[must_use]
pub fn meal_analytics(
    meals: &[MealRecommendation],
    targets: &TargetSummary,
    config: &PlanConfig,
) -> MealAnalytics {
    let total = |field: fn(&MealRecommendation) -> i64| {
        meals.iter().map(field).fold(0_i64, i64::saturating_add)
    };
    let total_meal_calories = total(|m| m.calories);
    let total_meal_protein = total(|m| m.protein);
    let total_meal_carbs = total(|m| m.carbs);
    let total_meal_fat = total(|m| m.fat);

    let percent = |part: i64, whole: i64| {
        if whole > 0 {
            round_to(part as f64 / whole as f64 * 100.0, 1)
        } else {
            0.0
        }
    };

    let avg_meal_rating = if meals.is_empty() {
        0.0
    } else {
        round_to(
            meals.iter().map(|m| m.rating).sum::<f64>() / meals.len() as f64,
            1,
        )
    };

    MealAnalytics {
        total_meal_calories,
        total_meal_protein,
        total_meal_carbs,
        total_meal_fat,
        calorie_accuracy: percent(total_meal_calories, targets.daily_calories),
        protein_accuracy: percent(total_meal_protein, targets.protein),
        avg_meal_rating,
        goal_alignment: config.goal_alignment_score,
    }
}

/// Single-day diet recommendation for a profile
///
/// `meal_count` picks the layout (3 = no snack, 4 = one snack, 5 = two snacks)
/// and `day_seed` picks names from the tables.
#[must_use]
pub fn recommend_diet(input: &ProfileInput, config: &IntelligenceConfig) -> DietRecommendation {
    recommend_diet_with_recipes(input, config, None)
}

/// Single-day diet recommendation, filling slots from `recipes` when given
#[must_use]
pub fn recommend_diet_with_recipes(
    input: &ProfileInput,
    config: &IntelligenceConfig,
    recipes: Option<&RecipeCatalogue>,
) -> DietRecommendation {
    let profile = input.resolve();
    let targets = calculate_daily_targets(&profile, &config.nutrition).summary();
    let snacks = input.meal_count().saturating_sub(3);
    let day_seed = input.day_seed();

    let meals = match recipes {
        Some(catalogue) => plan_day_meals_from_catalogue(
            targets.daily_calories,
            profile.goal,
            snacks,
            day_seed,
            catalogue,
            &mut RecipeHistory::new(),
            config,
        ),
        None => plan_day_meals(
            targets.daily_calories,
            profile.goal,
            snacks,
            day_seed,
            &config.plan,
        ),
    };
    tracing::debug!(
        goal = %profile.goal,
        daily_calories = targets.daily_calories,
        meals = meals.len(),
        day_seed,
        catalogue = recipes.is_some(),
        "Planned single-day diet"
    );

    let meal_analytics = meal_analytics(&meals, &targets, &config.plan);
    DietRecommendation {
        targets,
        meal_analytics,
        goal_insights: goal_insights(profile.goal, &targets),
        meals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> ProfileInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_three_meal_layout() {
        let rec = recommend_diet(
            &input(json!({"weight": 70, "height": 175, "age": 30})),
            &IntelligenceConfig::default(),
        );
        let types: Vec<_> = rec.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(types, [MealType::Breakfast, MealType::Lunch, MealType::Dinner]);
        // maintain split 25/40/35 of 2556
        assert_eq!(rec.meals[0].calories, 639);
        assert_eq!(rec.meals[1].calories, 1022);
        assert_eq!(rec.meals[2].calories, 894);
    }

    #[test]
    fn test_four_and_five_meal_layouts() {
        let config = IntelligenceConfig::default();
        let four = recommend_diet(&input(json!({"meal_count": 4})), &config);
        assert_eq!(four.meals[2].meal_type, MealType::Snack);
        assert_eq!(four.meals.len(), 4);

        let five = recommend_diet(&input(json!({"meal_count": "5"})), &config);
        let types: Vec<_> = five.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(
            types,
            [
                MealType::Breakfast,
                MealType::Snack,
                MealType::Lunch,
                MealType::Snack,
                MealType::Dinner
            ]
        );
        assert_ne!(five.meals[1].recipe_id, five.meals[3].recipe_id);
    }

    #[test]
    fn test_shares_sum_to_one() {
        let config = PlanConfig::default();
        for goal in [Goal::WeightLoss, Goal::MuscleGain, Goal::Maintain] {
            for snacks in 0..=2 {
                let total: f64 = meal_shares(goal, snacks, &config)
                    .iter()
                    .map(|(_, s)| s)
                    .sum();
                assert!((total - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_per_meal_macros() {
        let config = PlanConfig::default();
        let meal = plan_meal(MealType::Dinner, 800, Goal::MuscleGain, 0, 2, &config);
        // 800 * 0.25 * 1.4 / 4
        assert_eq!(meal.protein, 70);
        // 800 * 0.35 / 4
        assert_eq!(meal.carbs, 70);
        // 800 * 0.40 / 9 = 35.5
        assert_eq!(meal.fat, 35);
        assert!((meal.protein_density - 35.0).abs() < f64::EPSILON);
        assert_eq!(meal.portion_size, "Large dinner");
        assert_eq!(meal.meal_timing, "6:00-8:00 PM");
    }

    #[test]
    fn test_snack_protein_is_not_boosted() {
        let meal = plan_meal(MealType::Snack, 400, Goal::WeightLoss, 0, 0, &PlanConfig::default());
        assert_eq!(meal.protein, 20);
    }

    #[test]
    fn test_day_seed_changes_names() {
        let config = IntelligenceConfig::default();
        let monday = recommend_diet(&input(json!({"day_seed": 0})), &config);
        let tuesday = recommend_diet(&input(json!({"day_seed": 1})), &config);
        assert_ne!(monday.meals[0].name, tuesday.meals[0].name);
    }

    fn catalogue() -> RecipeCatalogue {
        RecipeCatalogue::from_json_slice(
            json!([
                {"id": "oats", "name": "Protein Oats", "calories": 610, "protein": 38,
                 "carbs": 70, "fat": 14, "rating": 4.6,
                 "image_url": "https://img.example.com/oats.jpg"},
                {"id": "bowl", "name": "Chicken Rice Bowl", "calories": 980, "protein": 62,
                 "carbs": 110, "fat": 24},
                {"id": "salmon", "name": "Salmon and Greens", "calories": 870, "protein": 55,
                 "carbs": 40, "fat": 45}
            ])
            .to_string()
            .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_catalogue_meals_carry_recipe_nutrition() {
        let recipes = catalogue();
        let rec = recommend_diet_with_recipes(
            &input(json!({"weight": 70, "height": 175, "age": 30})),
            &IntelligenceConfig::default(),
            Some(&recipes),
        );

        assert_eq!(rec.meals.len(), 3);
        let ids: Vec<_> = rec.meals.iter().map(|m| m.recipe_id.as_str()).collect();
        assert!(ids.iter().all(|id| ["oats", "bowl", "salmon"].contains(id)));
        let unique: std::collections::HashSet<_> = ids.iter().collect();
        assert_eq!(unique.len(), 3);

        let oats = rec.meals.iter().find(|m| m.recipe_id == "oats").unwrap();
        assert_eq!(oats.calories, 610);
        assert_eq!(oats.protein, 38);
        assert!((oats.rating - 4.6).abs() < f64::EPSILON);
        assert_eq!(oats.image_url, "https://img.example.com/oats.jpg");
        assert_eq!(
            rec.meal_analytics.total_meal_calories,
            rec.meals.iter().map(|m| m.calories).sum::<i64>()
        );
    }

    #[test]
    fn test_unrated_recipe_rating_from_protein_density() {
        let recipes = catalogue();
        let bowl = recipes.recipes().iter().find(|r| r.id == "bowl").unwrap();
        let meal = meal_from_recipe(RecipePick { recipe: bowl, score: 12.34 }, MealType::Lunch);
        // 62 g over 980 kcal is 6.33 density, rated 3.5 + 0.2 * 6.33
        assert!((meal.rating - 4.765_306_122_448_98).abs() < 1e-6);
        assert!((meal.protein_density - 6.3).abs() < f64::EPSILON);
        assert!((meal.goal_alignment - 12.3).abs() < f64::EPSILON);
        assert_eq!(meal.meal_timing, "12:00-2:00 PM");
    }

    #[test]
    fn test_analytics_and_flattened_json() {
        let rec = recommend_diet(&input(json!({})), &IntelligenceConfig::default());
        assert!((rec.meal_analytics.avg_meal_rating - 4.0).abs() < f64::EPSILON);
        assert!(rec.meal_analytics.calorie_accuracy > 99.0);
        assert!(rec.meal_analytics.calorie_accuracy <= 100.0);

        let body = serde_json::to_value(&rec).unwrap();
        assert!(body["daily_calories"].is_i64());
        assert_eq!(body["goal_insights"]["bmi_category"], "Normal");
        assert_eq!(body["meals"][0]["category"], "main_course");
    }
}
