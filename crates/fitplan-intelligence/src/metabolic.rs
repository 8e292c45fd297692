// ABOUTME: Metabolic calculator: BMI, BMR, TDEE, and daily calorie and macro targets
// ABOUTME: Goal offsets, weekly weight change targets, calorie floors, fiber and water
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Metabolic Calculator
//!
//! Turns a resolved [`BodyProfile`] into daily energy and macronutrient targets.
//! Inputs are never rejected: missing or unusable profile fields have already
//! been replaced with defaults by `ProfileInput::resolve`.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>
//! - Hall, K.D. (2008). What is the required energy deficit per unit weight loss?
//!   *International Journal of Obesity*, 32(3), 573-576.

use crate::config::nutrition::{ActivityFactorsConfig, BmrConfig, NutritionConfig};
use fitplan_core::constants::units::{
    CM_PER_METER, DAYS_PER_WEEK, KCAL_PER_GRAM_CARB, KCAL_PER_GRAM_FAT, KCAL_PER_GRAM_PROTEIN,
    KCAL_PER_KG_BODY_MASS,
};
use fitplan_core::models::{ActivityLevel, BodyProfile, Gender, Goal, TargetSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Exact (unrounded) daily targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DailyTargets {
    /// Body mass index
    pub bmi: f64,
    /// Basal metabolic rate (kcal/day)
    pub bmr: f64,
    /// Total daily energy expenditure (kcal/day)
    pub tdee: f64,
    /// Daily calorie target after goal offset and floor (kcal/day)
    pub daily_calories: f64,
    /// Protein (g)
    pub protein_g: f64,
    /// Carbohydrate (g)
    pub carbs_g: f64,
    /// Fat (g)
    pub fat_g: f64,
    /// Fiber (g)
    pub fiber_g: f64,
    /// Water (ml)
    pub water_ml: f64,
    /// Share of non-protein calories assigned to fat
    pub fat_ratio: f64,
}

impl DailyTargets {
    /// Wire summary: whole numbers, BMI to one decimal
    #[must_use]
    pub fn summary(&self) -> TargetSummary {
        TargetSummary {
            daily_calories: round_whole(self.daily_calories),
            protein: round_whole(self.protein_g),
            carbs: round_whole(self.carbs_g),
            fat: round_whole(self.fat_g),
            fiber: round_whole(self.fiber_g),
            water_ml: round_whole(self.water_ml),
            tdee: round_whole(self.tdee),
            bmr: round_whole(self.bmr),
            bmi: round_to(self.bmi, 1),
        }
    }

    /// Energy accounted for by the macro grams (kcal)
    #[must_use]
    pub fn macro_calories(&self) -> f64 {
        self.protein_g.mul_add(
            KCAL_PER_GRAM_PROTEIN,
            self.carbs_g
                .mul_add(KCAL_PER_GRAM_CARB, self.fat_g * KCAL_PER_GRAM_FAT),
        )
    }
}

/// WHO body mass index category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    /// BMI below 18.5
    Underweight,
    /// BMI 18.5 to under 25
    Normal,
    /// BMI 25 to under 30
    Overweight,
    /// BMI 30 and above
    Obese,
}

impl BmiCategory {
    /// Classify a BMI value
    #[must_use]
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Normal => "Normal",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the targets mean for the user's goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalInsights {
    /// Goal the targets were computed for
    pub goal: Goal,
    /// BMI category label
    pub bmi_category: String,
    /// Daily target minus TDEE (negative = deficit)
    pub daily_deficit_surplus: i64,
    /// Projected weekly weight change (kg, two decimals)
    pub weekly_weight_change_estimate: f64,
}

/// Body mass index from weight (kg) and height (cm)
#[must_use]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / CM_PER_METER;
    weight_kg / (height_m * height_m)
}

/// Basal metabolic rate using Mifflin-St Jeor
///
/// Formula: `BMR = 10·weight + 6.25·height − 5·age + s` with `s = +5` (male) or `−161` (female)
#[must_use]
pub fn calculate_bmr(profile: &BodyProfile, config: &BmrConfig) -> f64 {
    let gender_constant = match profile.gender {
        Gender::Male => config.male_constant,
        Gender::Female => config.female_constant,
    };

    config.weight_coef * profile.weight_kg
        + config.height_coef * profile.height_cm
        + config.age_coef * f64::from(profile.age)
        + gender_constant
}

/// Total daily energy expenditure: BMR × activity factor
#[must_use]
pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel, config: &ActivityFactorsConfig) -> f64 {
    let factor = match activity_level {
        ActivityLevel::Sedentary => config.sedentary,
        ActivityLevel::Light => config.light,
        ActivityLevel::Moderate => config.moderate,
        ActivityLevel::VeryActive => config.very_active,
        ActivityLevel::ExtraActive => config.extra_active,
    };
    bmr * factor
}

/// Calorie offset, protein (g/kg) and fat ratio for a profile
struct GoalPlan {
    offset_kcal: f64,
    protein_g_per_kg: f64,
    fat_ratio: f64,
}

fn goal_plan(profile: &BodyProfile, bmi: f64, config: &NutritionConfig) -> GoalPlan {
    let macros = &config.macronutrients;
    let offsets = &config.goal_offsets;

    // A weekly change target overrides the goal's default offset. Weight loss
    // always runs a deficit of |change|; other goals follow the signed change.
    if profile.weekly_weight_change_kg != 0.0 {
        let adjustment = profile.weekly_weight_change_kg * KCAL_PER_KG_BODY_MASS / DAYS_PER_WEEK;
        return if profile.goal == Goal::WeightLoss {
            GoalPlan {
                offset_kcal: -adjustment.abs(),
                protein_g_per_kg: macros.loss_protein_g_per_kg,
                fat_ratio: macros.loss_fat_ratio,
            }
        } else {
            GoalPlan {
                offset_kcal: adjustment,
                protein_g_per_kg: macros.weekly_target_gain_protein_g_per_kg,
                fat_ratio: macros.gain_fat_ratio,
            }
        };
    }

    match profile.goal {
        Goal::WeightLoss => {
            let deficit = offsets
                .loss_deficits
                .iter()
                .find(|tier| bmi > tier.bmi_bound)
                .map_or(offsets.loss_deficit_default, |tier| tier.kcal);
            let protein = if bmi > macros.high_bmi_threshold {
                macros.loss_high_bmi_protein_g_per_kg
            } else {
                macros.loss_protein_g_per_kg
            };
            GoalPlan {
                offset_kcal: -deficit,
                protein_g_per_kg: protein,
                fat_ratio: macros.loss_fat_ratio,
            }
        }
        Goal::WeightGain | Goal::MuscleGain => {
            let surplus = offsets
                .gain_surpluses
                .iter()
                .find(|tier| bmi < tier.bmi_bound)
                .map_or(offsets.gain_surplus_default, |tier| tier.kcal);
            GoalPlan {
                offset_kcal: surplus,
                protein_g_per_kg: macros.gain_protein_g_per_kg,
                fat_ratio: macros.gain_fat_ratio,
            }
        }
        Goal::Maintain | Goal::Endurance => GoalPlan {
            offset_kcal: 0.0,
            protein_g_per_kg: macros.maintain_protein_g_per_kg,
            fat_ratio: macros.maintain_fat_ratio,
        },
    }
}

fn calorie_floor(profile: &BodyProfile, config: &NutritionConfig) -> f64 {
    let floors = &config.calorie_floors;
    let older = profile.age >= floors.older_age_threshold;
    match (profile.gender, older) {
        (Gender::Female, false) => floors.female,
        (Gender::Female, true) => floors.female_older,
        (Gender::Male, false) => floors.male,
        (Gender::Male, true) => floors.male_older,
    }
}

/// Daily calorie, macro, fiber, and water targets for a profile
///
/// Protein grams are capped so protein never exceeds the daily target; the
/// remaining calories are split between fat and carbohydrate by the goal's fat
/// ratio. `protein·4 + carbs·4 + fat·9` therefore equals the daily target.
#[must_use]
pub fn calculate_daily_targets(profile: &BodyProfile, config: &NutritionConfig) -> DailyTargets {
    let bmi = calculate_bmi(profile.weight_kg, profile.height_cm);
    let bmr = calculate_bmr(profile, &config.bmr);
    let tdee = calculate_tdee(bmr, profile.activity_level, &config.activity_factors);

    let plan = goal_plan(profile, bmi, config);
    let daily_calories = (tdee + plan.offset_kcal).max(calorie_floor(profile, config));

    let protein_g =
        (profile.weight_kg * plan.protein_g_per_kg).min(daily_calories / KCAL_PER_GRAM_PROTEIN);
    let remaining = (daily_calories - protein_g * KCAL_PER_GRAM_PROTEIN).max(0.0);
    let fat_g = remaining * plan.fat_ratio / KCAL_PER_GRAM_FAT;
    let carbs_g = remaining * (1.0 - plan.fat_ratio) / KCAL_PER_GRAM_CARB;

    let micro = &config.micronutrients;
    let fiber_g = (daily_calories / 1000.0 * micro.fiber_g_per_1000_kcal)
        .clamp(micro.fiber_min_g, micro.fiber_max_g);
    let mut water_ml = profile.weight_kg * micro.water_ml_per_kg;
    if profile.activity_level.is_highly_active() {
        water_ml += micro.water_active_bonus_ml;
    }

    DailyTargets {
        bmi,
        bmr,
        tdee,
        daily_calories,
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        water_ml,
        fat_ratio: plan.fat_ratio,
    }
}

/// BMI category and projected weekly change for a set of targets
#[must_use]
pub fn goal_insights(goal: Goal, summary: &TargetSummary) -> GoalInsights {
    let difference = summary.daily_calories - summary.tdee;
    let weekly_kg = difference as f64 * DAYS_PER_WEEK / KCAL_PER_KG_BODY_MASS;

    GoalInsights {
        goal,
        bmi_category: BmiCategory::from_bmi(summary.bmi).label().to_owned(),
        daily_deficit_surplus: difference,
        weekly_weight_change_estimate: round_to(weekly_kg, 2),
    }
}

/// Round half away from zero to a whole number
#[must_use]
pub fn round_whole(value: f64) -> i64 {
    value.round() as i64
}

/// Round to a number of decimal places
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10_f64.powi(places);
    (value * scale).round() / scale
}
