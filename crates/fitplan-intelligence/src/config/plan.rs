// ABOUTME: Meal planning configuration for daily and weekly plan assembly
// ABOUTME: Day variation curve, snack rules, calorie splits, and per-meal macro ratios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use super::error::ConfigError;
use fitplan_core::constants::defaults;
use fitplan_core::models::{Goal, MealType};
use serde::{Deserialize, Serialize};

/// Goal families that share a calorie split and protein boosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalBand {
    /// Weight loss
    Loss,
    /// Weight gain and muscle gain
    Gain,
    /// Maintenance and endurance
    Maintain,
}

impl From<Goal> for GoalBand {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::WeightLoss => Self::Loss,
            Goal::WeightGain | Goal::MuscleGain => Self::Gain,
            Goal::Maintain | Goal::Endurance => Self::Maintain,
        }
    }
}

/// Per main meal values (breakfast, lunch, dinner)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MainMeals {
    /// Breakfast value
    pub breakfast: f64,
    /// Lunch value
    pub lunch: f64,
    /// Dinner value
    pub dinner: f64,
}

impl MainMeals {
    /// Value for a meal type; snacks have no main-meal entry
    #[must_use]
    pub const fn get(&self, meal: MealType) -> Option<f64> {
        match meal {
            MealType::Breakfast => Some(self.breakfast),
            MealType::Lunch => Some(self.lunch),
            MealType::Dinner => Some(self.dinner),
            MealType::Snack => None,
        }
    }

    fn sum(&self) -> f64 {
        self.breakfast + self.lunch + self.dinner
    }
}

/// Carbohydrate and fat calorie shares for one meal type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MacroShare {
    /// Share of meal calories from carbohydrate
    pub carbs: f64,
    /// Share of meal calories from fat
    pub fat: f64,
}

/// Meal planning configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanConfig {
    /// Sine amplitude of the day variation curve
    pub variation_sin_amplitude: f64,
    /// Sine frequency of the day variation curve
    pub variation_sin_frequency: f64,
    /// Cosine amplitude of the day variation curve
    pub variation_cos_amplitude: f64,
    /// Cosine frequency of the day variation curve
    pub variation_cos_frequency: f64,
    /// Day calories above which a snack is planned
    pub snack_calorie_threshold: f64,
    /// Snack share of the day when one snack is planned
    pub snack_share: f64,
    /// Share of each snack when two snacks are planned
    pub double_snack_share: f64,
    /// Breakfast/lunch/dinner split for weight loss
    pub loss_split: MainMeals,
    /// Breakfast/lunch/dinner split for gain goals
    pub gain_split: MainMeals,
    /// Breakfast/lunch/dinner split for maintenance
    pub maintain_split: MainMeals,
    /// Protein share of meal calories for gain goals
    pub gain_protein_share: f64,
    /// Protein share of meal calories otherwise
    pub base_protein_share: f64,
    /// Protein boosts for weight loss
    pub loss_protein_boost: MainMeals,
    /// Protein boosts for gain goals
    pub gain_protein_boost: MainMeals,
    /// Protein boosts for maintenance
    pub maintain_protein_boost: MainMeals,
    /// Carb/fat shares for breakfast
    pub breakfast_macros: MacroShare,
    /// Carb/fat shares for lunch
    pub lunch_macros: MacroShare,
    /// Carb/fat shares for dinner
    pub dinner_macros: MacroShare,
    /// Carb/fat shares for snacks
    pub snack_macros: MacroShare,
    /// Rating attached to every generated meal
    pub default_meal_rating: f64,
    /// Goal alignment score reported by single-day analytics
    pub goal_alignment_score: f64,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            variation_sin_amplitude: 0.1,
            variation_sin_frequency: 0.7,
            variation_cos_amplitude: 0.05,
            variation_cos_frequency: 1.3,
            snack_calorie_threshold: defaults::SNACK_CALORIE_THRESHOLD,
            snack_share: 0.15,
            double_snack_share: 0.10,
            loss_split: MainMeals {
                breakfast: 0.30,
                lunch: 0.40,
                dinner: 0.30,
            },
            gain_split: MainMeals {
                breakfast: 0.25,
                lunch: 0.35,
                dinner: 0.40,
            },
            maintain_split: MainMeals {
                breakfast: 0.25,
                lunch: 0.40,
                dinner: 0.35,
            },
            gain_protein_share: 0.25,
            base_protein_share: 0.20,
            loss_protein_boost: MainMeals {
                breakfast: 1.3,
                lunch: 1.1,
                dinner: 1.0,
            },
            gain_protein_boost: MainMeals {
                breakfast: 1.2,
                lunch: 1.3,
                dinner: 1.4,
            },
            maintain_protein_boost: MainMeals {
                breakfast: 1.1,
                lunch: 1.2,
                dinner: 1.0,
            },
            breakfast_macros: MacroShare {
                carbs: 0.50,
                fat: 0.25,
            },
            lunch_macros: MacroShare {
                carbs: 0.45,
                fat: 0.30,
            },
            dinner_macros: MacroShare {
                carbs: 0.35,
                fat: 0.40,
            },
            snack_macros: MacroShare {
                carbs: 0.40,
                fat: 0.35,
            },
            default_meal_rating: 4.0,
            goal_alignment_score: 85.0,
        }
    }
}

impl PlanConfig {
    /// Breakfast/lunch/dinner split for a goal
    #[must_use]
    pub fn split_for(&self, goal: Goal) -> MainMeals {
        match GoalBand::from(goal) {
            GoalBand::Loss => self.loss_split,
            GoalBand::Gain => self.gain_split,
            GoalBand::Maintain => self.maintain_split,
        }
    }

    /// Protein boost for a meal under a goal; snacks are never boosted
    #[must_use]
    pub fn protein_boost(&self, goal: Goal, meal: MealType) -> f64 {
        let boosts = match GoalBand::from(goal) {
            GoalBand::Loss => self.loss_protein_boost,
            GoalBand::Gain => self.gain_protein_boost,
            GoalBand::Maintain => self.maintain_protein_boost,
        };
        boosts.get(meal).unwrap_or(1.0)
    }

    /// Protein share of meal calories for a goal
    #[must_use]
    pub const fn protein_share(&self, goal: Goal) -> f64 {
        if goal.is_gain_oriented() {
            self.gain_protein_share
        } else {
            self.base_protein_share
        }
    }

    /// Carb/fat shares for a meal type
    #[must_use]
    pub const fn macro_share(&self, meal: MealType) -> MacroShare {
        match meal {
            MealType::Breakfast => self.breakfast_macros,
            MealType::Lunch => self.lunch_macros,
            MealType::Dinner => self.dinner_macros,
            MealType::Snack => self.snack_macros,
        }
    }

    /// Validate shares and splits
    ///
    /// # Errors
    ///
    /// Returns an error if a split does not sum to one or a share is out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        for split in [self.loss_split, self.gain_split, self.maintain_split] {
            if (split.sum() - 1.0).abs() > 1e-6 {
                return Err(ConfigError::InvalidWeights(
                    "Meal splits must sum to 1.0",
                ));
            }
        }

        if !(0.0..0.5).contains(&self.snack_share) || !(0.0..0.5).contains(&self.double_snack_share)
        {
            return Err(ConfigError::InvalidRange(
                "Snack shares must be between 0 and 0.5",
            ));
        }

        for share in [
            self.breakfast_macros,
            self.lunch_macros,
            self.dinner_macros,
            self.snack_macros,
        ] {
            if share.carbs < 0.0 || share.fat < 0.0 || share.carbs + share.fat > 1.0 {
                return Err(ConfigError::InvalidRange(
                    "Meal carb and fat shares must be non-negative and sum to at most 1.0",
                ));
            }
        }

        if self.snack_calorie_threshold <= 0.0 {
            return Err(ConfigError::InvalidRange(
                "Snack calorie threshold must be positive",
            ));
        }

        Ok(())
    }
}
