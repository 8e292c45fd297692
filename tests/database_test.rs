// ABOUTME: Storage tests for profiles and saved plans on SQLite
// ABOUTME: Persistence across reopen, schema upgrade of older profile tables, per-user listing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use fitplan_core::models::{CreateDietPlan, CreateExercisePlan, Goal, ProfileUpdate};
use fitplan_server::database::{round_weekly_change, Database};
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use tempfile::TempDir;
use uuid::Uuid;

fn database_url(dir: &TempDir) -> String {
    format!("sqlite:{}", dir.path().join("fitplan.db").display())
}

#[test]
fn test_round_weekly_change() {
    assert!((round_weekly_change(0.46) - 0.5).abs() < 1e-9);
    assert!((round_weekly_change(-0.44) + 0.4).abs() < 1e-9);
    assert!((round_weekly_change(1.0) - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_profile_survives_reopen() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);
    let user_id = Uuid::new_v4();

    {
        let database = Database::new(&url).await.unwrap();
        database
            .upsert_profile(user_id, &common::reference_profile_update())
            .await
            .unwrap();
        database.pool().close().await;
    }

    let reopened = Database::new(&url).await.unwrap();
    let profile = reopened.get_profile(user_id).await.unwrap().unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Test Runner"));
    assert_eq!(profile.goal, Some(Goal::Maintain));
    assert_eq!(profile.age, Some(30));
}

#[tokio::test]
async fn test_database_creates_missing_directory() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested").join("deeper").join("fitplan.db");

    let database = Database::new(&format!("sqlite:{}", nested.display()))
        .await
        .unwrap();
    database.ping().await.unwrap();

    assert!(nested.exists());
}

#[tokio::test]
async fn test_upsert_keeps_created_at() {
    let database = common::create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();

    let first = database
        .upsert_profile(user_id, &common::reference_profile_update())
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let update = ProfileUpdate {
        weight: Some(72.5),
        ..ProfileUpdate::default()
    };
    let second = database.upsert_profile(user_id, &update).await.unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.weight, Some(72.5));
    assert_eq!(second.full_name, None);
}

#[tokio::test]
async fn test_migration_adds_weekly_weight_change_column() {
    let dir = TempDir::new().unwrap();
    let url = database_url(&dir);
    let user_id = Uuid::new_v4();

    // A profiles table from before weekly targets existed
    {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(&format!("{url}?mode=rwc"))
            .await
            .unwrap();
        sqlx::query(
            r"
            CREATE TABLE profiles (
                user_id TEXT PRIMARY KEY,
                full_name TEXT,
                weight REAL,
                height REAL,
                age INTEGER,
                gender TEXT,
                activity_level TEXT,
                goal TEXT,
                fitness_level TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO profiles (user_id, weight, goal, created_at, updated_at) VALUES (?1, 80.0, 'weight_loss', ?2, ?2)",
        )
        .bind(user_id.to_string())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&pool)
        .await
        .unwrap();
        pool.close().await;
    }

    let database = Database::new(&url).await.unwrap();
    let profile = database.get_profile(user_id).await.unwrap().unwrap();

    assert_eq!(profile.weight, Some(80.0));
    assert_eq!(profile.goal, Some(Goal::WeightLoss));
    assert!(profile.weekly_weight_change.abs() < f64::EPSILON);

    // Running migrations again is a no-op
    database.migrate().await.unwrap();
}

#[tokio::test]
async fn test_plans_are_listed_per_user_newest_first() {
    let database = common::create_test_database().await.unwrap();
    let user_id = Uuid::new_v4();
    let other_user = Uuid::new_v4();

    for name in ["Week one", "Week two"] {
        database
            .create_exercise_plan(
                user_id,
                &CreateExercisePlan {
                    name: format!("  {name} "),
                    description: None,
                    duration_minutes: Some(45),
                    difficulty: Some("intermediate".to_owned()),
                },
            )
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    database
        .create_diet_plan(
            other_user,
            &CreateDietPlan {
                name: "Bulk".to_owned(),
                description: Some("Lean bulk".to_owned()),
                calories: Some(3100),
                protein: Some(180),
                carbs: Some(380),
                fat: Some(90),
            },
        )
        .await
        .unwrap();

    let exercise = database.list_exercise_plans(user_id).await.unwrap();
    assert_eq!(exercise.len(), 2);
    assert_eq!(exercise[0].name, "Week two");
    assert_eq!(exercise[1].name, "Week one");

    assert!(database.list_diet_plans(user_id).await.unwrap().is_empty());
    assert!(database
        .list_exercise_plans(other_user)
        .await
        .unwrap()
        .is_empty());

    let diet = database.list_diet_plans(other_user).await.unwrap();
    assert_eq!(diet.len(), 1);
    assert_eq!(diet[0].calories, Some(3100));
    assert_eq!(diet[0].description.as_deref(), Some("Lean bulk"));
}
