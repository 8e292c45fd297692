// ABOUTME: Static meal lookup tables keyed by meal type and goal
// ABOUTME: Meal names, ingredients, instructions, timing windows, and portion guidance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use fitplan_core::models::{Goal, MealType};

/// Goal column of the meal tables; endurance shares the maintenance column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GoalColumn {
    WeightLoss,
    WeightGain,
    MuscleGain,
    Maintain,
}

impl From<Goal> for GoalColumn {
    fn from(goal: Goal) -> Self {
        match goal {
            Goal::WeightLoss => Self::WeightLoss,
            Goal::WeightGain => Self::WeightGain,
            Goal::MuscleGain => Self::MuscleGain,
            Goal::Maintain | Goal::Endurance => Self::Maintain,
        }
    }
}

const BREAKFAST_LOSS: &[&str] = &[
    "Protein-Rich Morning Start",
    "Spinach Egg White Scramble",
    "Berry Greek Yogurt Parfait",
    "Overnight Oats with Chia",
    "Veggie Omelette Wrap",
    "Cottage Cheese and Fruit Bowl",
    "Green Smoothie Bowl",
];
const BREAKFAST_GAIN: &[&str] = &[
    "Power Breakfast Bowl",
    "Avocado Toast with Eggs",
    "Peanut Butter Banana Oats",
    "Loaded Breakfast Burrito",
    "Whole Grain Pancake Stack",
    "Granola and Whole Milk Bowl",
    "Smoked Salmon Bagel",
];
const BREAKFAST_MUSCLE: &[&str] = &[
    "High-Protein Breakfast",
    "Protein Pancakes",
    "Turkey Sausage Egg Muffins",
    "Whey Oatmeal with Berries",
    "Steak and Egg Plate",
    "Quark Power Bowl",
];
const BREAKFAST_MAINTAIN: &[&str] = &[
    "Balanced Morning Meal",
    "Veggie Frittata",
    "Yogurt Fruit Bowl",
    "Whole Grain Toast with Eggs",
    "Muesli with Milk",
];

const LUNCH_LOSS: &[&str] = &[
    "Lean & Green Lunch",
    "Grilled Chicken Salad",
    "Turkey Lettuce Wraps",
    "Quinoa Veggie Bowl",
    "Lentil Vegetable Soup",
    "Tuna Nicoise Salad",
];
const LUNCH_GAIN: &[&str] = &[
    "Hearty Midday Meal",
    "Chicken Thigh Rice Bowl",
    "Beef Burrito Bowl",
    "Pasta with Meat Sauce",
    "Salmon Poke Bowl",
];
const LUNCH_MUSCLE: &[&str] = &[
    "Muscle-Building Lunch",
    "Lean Beef and Sweet Potato",
    "Chicken Breast Quinoa Plate",
    "Tuna Whole Wheat Wrap",
    "Turkey Chili",
    "Tofu Tempeh Stir Fry",
    "Shrimp Brown Rice Bowl",
];
const LUNCH_MAINTAIN: &[&str] = &[
    "Balanced Lunch Plate",
    "Mediterranean Grain Bowl",
    "Chicken Veggie Wrap",
    "Fish Taco Plate",
];

const DINNER_LOSS: &[&str] = &[
    "Light Evening Meal",
    "Baked White Fish with Greens",
    "Zucchini Noodle Stir Fry",
    "Herb Chicken with Roasted Vegetables",
    "Shrimp and Broccoli Skillet",
];
const DINNER_GAIN: &[&str] = &[
    "Substantial Dinner",
    "Salmon with Quinoa",
    "Beef Stew with Potatoes",
    "Chicken Alfredo",
    "Pork Tenderloin with Rice",
    "Lamb and Couscous",
];
const DINNER_MUSCLE: &[&str] = &[
    "Recovery Dinner",
    "Lean Steak and Asparagus",
    "Grilled Chicken with Sweet Potato",
    "Baked Cod with Brown Rice",
    "Turkey Meatballs with Whole Wheat Pasta",
];
const DINNER_MAINTAIN: &[&str] = &[
    "Balanced Evening Meal",
    "Grilled Salmon Plate",
    "Vegetable Curry with Rice",
    "Chicken Stir Fry",
    "Stuffed Bell Peppers",
    "Bean and Vegetable Chili",
];

const SNACK_LOSS: &[&str] = &[
    "Smart Snack Choice",
    "Apple with Almond Butter",
    "Celery and Hummus",
];
const SNACK_GAIN: &[&str] = &[
    "Energy Boost Snack",
    "Trail Mix Handful",
    "Peanut Butter Toast",
    "Dried Fruit and Nuts",
];
const SNACK_MUSCLE: &[&str] = &[
    "Protein Power Snack",
    "Greek Yogurt with Granola",
    "Protein Shake",
];
const SNACK_MAINTAIN: &[&str] = &["Healthy Snack", "Mixed Nuts and Fruit", "Yogurt Cup"];

/// Meal names for a meal type and goal
#[must_use]
pub fn meal_names(meal: MealType, goal: Goal) -> &'static [&'static str] {
    match (meal, GoalColumn::from(goal)) {
        (MealType::Breakfast, GoalColumn::WeightLoss) => BREAKFAST_LOSS,
        (MealType::Breakfast, GoalColumn::WeightGain) => BREAKFAST_GAIN,
        (MealType::Breakfast, GoalColumn::MuscleGain) => BREAKFAST_MUSCLE,
        (MealType::Breakfast, GoalColumn::Maintain) => BREAKFAST_MAINTAIN,
        (MealType::Lunch, GoalColumn::WeightLoss) => LUNCH_LOSS,
        (MealType::Lunch, GoalColumn::WeightGain) => LUNCH_GAIN,
        (MealType::Lunch, GoalColumn::MuscleGain) => LUNCH_MUSCLE,
        (MealType::Lunch, GoalColumn::Maintain) => LUNCH_MAINTAIN,
        (MealType::Dinner, GoalColumn::WeightLoss) => DINNER_LOSS,
        (MealType::Dinner, GoalColumn::WeightGain) => DINNER_GAIN,
        (MealType::Dinner, GoalColumn::MuscleGain) => DINNER_MUSCLE,
        (MealType::Dinner, GoalColumn::Maintain) => DINNER_MAINTAIN,
        (MealType::Snack, GoalColumn::WeightLoss) => SNACK_LOSS,
        (MealType::Snack, GoalColumn::WeightGain) => SNACK_GAIN,
        (MealType::Snack, GoalColumn::MuscleGain) => SNACK_MUSCLE,
        (MealType::Snack, GoalColumn::Maintain) => SNACK_MAINTAIN,
    }
}

/// Meal name for a day: `names[day mod len]`
#[must_use]
pub fn meal_name(meal: MealType, goal: Goal, day_index: u64) -> &'static str {
    let names = meal_names(meal, goal);
    let slot = (day_index % names.len() as u64) as usize;
    names.get(slot).copied().unwrap_or("Healthy Meal")
}

/// Ingredient list for a meal type and goal
#[must_use]
pub fn meal_ingredients(meal: MealType, goal: Goal) -> &'static [&'static str] {
    match (meal, GoalColumn::from(goal)) {
        (MealType::Breakfast, GoalColumn::WeightLoss) => {
            &["Egg whites", "Spinach", "Berries", "Greek yogurt", "Oats"]
        }
        (MealType::Breakfast, GoalColumn::WeightGain) => &[
            "Whole eggs",
            "Avocado",
            "Nuts",
            "Whole grain toast",
            "Banana",
        ],
        (MealType::Breakfast, GoalColumn::MuscleGain) => &[
            "Protein powder",
            "Oats",
            "Berries",
            "Almond butter",
            "Milk",
        ],
        (MealType::Breakfast, GoalColumn::Maintain) => {
            &["Eggs", "Vegetables", "Whole grains", "Fruit", "Yogurt"]
        }
        (MealType::Lunch, GoalColumn::WeightLoss) => &[
            "Lean protein",
            "Mixed greens",
            "Vegetables",
            "Olive oil",
            "Quinoa",
        ],
        (MealType::Lunch, GoalColumn::WeightGain) => &[
            "Chicken thigh",
            "Brown rice",
            "Avocado",
            "Nuts",
            "Vegetables",
        ],
        (MealType::Lunch, GoalColumn::MuscleGain) => &[
            "Lean beef",
            "Sweet potato",
            "Broccoli",
            "Olive oil",
            "Quinoa",
        ],
        (MealType::Lunch, GoalColumn::Maintain) => &[
            "Fish or chicken",
            "Mixed vegetables",
            "Whole grains",
            "Healthy fats",
        ],
        (MealType::Dinner, GoalColumn::WeightLoss) => &[
            "White fish",
            "Steamed vegetables",
            "Leafy greens",
            "Herbs",
            "Lemon",
        ],
        (MealType::Dinner, GoalColumn::WeightGain) => &[
            "Salmon",
            "Quinoa",
            "Roasted vegetables",
            "Nuts",
            "Olive oil",
        ],
        (MealType::Dinner, GoalColumn::MuscleGain) => &[
            "Lean steak",
            "Sweet potato",
            "Asparagus",
            "Garlic",
            "Herbs",
        ],
        (MealType::Dinner, GoalColumn::Maintain) => &[
            "Protein of choice",
            "Vegetables",
            "Complex carbs",
            "Healthy fats",
        ],
        (MealType::Snack, GoalColumn::WeightLoss) => {
            &["Apple", "Almond butter", "Celery", "Hummus"]
        }
        (MealType::Snack, GoalColumn::WeightGain) => {
            &["Trail mix", "Dried fruit", "Nuts", "Seeds"]
        }
        (MealType::Snack, GoalColumn::MuscleGain) => {
            &["Protein bar", "Greek yogurt", "Berries", "Granola"]
        }
        (MealType::Snack, GoalColumn::Maintain) => &["Mixed nuts", "Fruit", "Yogurt", "Vegetables"],
    }
}

/// Preparation and eating instructions for a meal type
#[must_use]
pub const fn meal_instructions(meal: MealType) -> &'static [&'static str] {
    match meal {
        MealType::Breakfast => &[
            "Start your day with this nutritious meal",
            "Eat within 1-2 hours of waking up",
            "Include protein to maintain energy levels",
            "Pair with water or herbal tea",
        ],
        MealType::Lunch => &[
            "Perfect midday fuel for sustained energy",
            "Eat when you feel moderately hungry",
            "Balance protein, carbs, and healthy fats",
            "Take time to eat mindfully",
        ],
        MealType::Dinner => &[
            "End your day with this satisfying meal",
            "Eat 2-3 hours before bedtime",
            "Focus on protein and vegetables",
            "Keep portions appropriate for evening",
        ],
        MealType::Snack => &[
            "Perfect between-meal energy boost",
            "Choose when you feel genuinely hungry",
            "Focus on protein or healthy fats",
            "Keep portions controlled",
        ],
    }
}

/// Suggested eating window for a meal type
#[must_use]
pub const fn meal_timing(meal: MealType) -> &'static str {
    match meal {
        MealType::Breakfast => "7:00-9:00 AM",
        MealType::Lunch => "12:00-2:00 PM",
        MealType::Dinner => "6:00-8:00 PM",
        MealType::Snack => "3:00-4:00 PM or 9:00-10:00 PM",
    }
}

/// Portion size label from meal calories
#[must_use]
pub const fn portion_guidance(meal: MealType, calories: i64) -> &'static str {
    match meal {
        MealType::Breakfast if calories < 300 => "Light breakfast",
        MealType::Breakfast if calories < 450 => "Standard breakfast",
        MealType::Breakfast => "Hearty breakfast",
        MealType::Lunch if calories < 400 => "Light lunch",
        MealType::Lunch if calories < 600 => "Standard lunch",
        MealType::Lunch => "Large lunch",
        MealType::Dinner if calories < 350 => "Light dinner",
        MealType::Dinner if calories < 550 => "Standard dinner",
        MealType::Dinner => "Large dinner",
        MealType::Snack => "Snack portion",
    }
}
