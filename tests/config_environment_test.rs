// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Defaults, overrides, malformed values, and backend cross-checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use fitplan_server::config::{BackendKind, CommandSpec, DatabaseUrl, Environment, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

const CONFIG_VARS: &[&str] = &[
    "HOST",
    "PORT",
    "DATABASE_URL",
    "RECOMMENDER_BACKEND",
    "DIET_COMMAND",
    "EXERCISE_COMMAND",
    "RECOMMENDER_URL",
    "HTTP_CLIENT_TIMEOUT_SECS",
    "BRIDGE_MAX_CONCURRENT",
    "SNACK_CALORIE_THRESHOLD",
    "RECIPE_CATALOGUE_PATH",
    "CORS_ALLOWED_ORIGINS",
    "ENVIRONMENT",
];

fn clear_config_env() {
    for var in CONFIG_VARS {
        env::remove_var(var);
    }
}

// ============================================================================
// Pure parsing
// ============================================================================

#[test]
fn test_environment_parsing() {
    assert_eq!(
        Environment::from_str_or_default("PROD"),
        Environment::Production
    );
    assert_eq!(Environment::from_str_or_default("test"), Environment::Testing);
    assert_eq!(
        Environment::from_str_or_default("anything"),
        Environment::Development
    );
    assert!(Environment::Production.is_production());
}

#[test]
fn test_database_url_parsing() {
    assert_eq!(
        DatabaseUrl::parse_url("sqlite::memory:").unwrap(),
        DatabaseUrl::Memory
    );
    assert_eq!(
        DatabaseUrl::parse_url("sqlite:./data/app.db").unwrap(),
        DatabaseUrl::SQLite {
            path: PathBuf::from("./data/app.db")
        }
    );
    assert_eq!(
        DatabaseUrl::parse_url("plain.db").unwrap().to_connection_string(),
        "sqlite:plain.db"
    );
    assert!(DatabaseUrl::parse_url("postgres://localhost/db").is_err());
    assert!(DatabaseUrl::parse_url("  ").is_err());
}

#[test]
fn test_backend_kind_parsing() {
    assert_eq!(BackendKind::parse("NATIVE").unwrap(), BackendKind::Native);
    assert_eq!(BackendKind::parse("bridge").unwrap(), BackendKind::Process);
    assert_eq!(BackendKind::parse("remote").unwrap(), BackendKind::Http);
    assert!(BackendKind::parse("carrier-pigeon").is_err());
}

#[test]
fn test_command_spec_parsing() {
    let command = CommandSpec::parse("  python3   scripts/diet.py --json ").unwrap();
    assert_eq!(command.program, "python3");
    assert_eq!(command.args, vec!["scripts/diet.py", "--json"]);
    assert_eq!(command.to_string(), "python3 scripts/diet.py --json");

    assert!(CommandSpec::parse("   ").is_err());
}

// ============================================================================
// Environment loading
// ============================================================================

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_config_env();

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.backend, BackendKind::Native);
    assert_eq!(config.bridge.max_concurrent, Some(16));
    assert_eq!(config.bridge.diet_command, CommandSpec::new("fitplan-worker", ["diet"]));
    assert!((config.snack_calorie_threshold - 2500.0).abs() < f64::EPSILON);
    assert_eq!(
        config.cors_allowed_origins,
        vec!["http://localhost:5173", "http://127.0.0.1:5173"]
    );
    assert!(config.http_backend.base_url.is_none());
    assert!(config.recipe_catalogue.is_none());
    assert!(config.summary().contains("recipes=tables"));
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_config_env();
    env::set_var("HOST", "0.0.0.0");
    env::set_var("PORT", "8088");
    env::set_var("DATABASE_URL", "sqlite::memory:");
    env::set_var("RECOMMENDER_BACKEND", "http");
    env::set_var("RECOMMENDER_URL", "http://recommender:5000/");
    env::set_var("SNACK_CALORIE_THRESHOLD", "2200");
    env::set_var("RECIPE_CATALOGUE_PATH", " /srv/fitplan/recipes.json ");
    env::set_var("CORS_ALLOWED_ORIGINS", "*");
    env::set_var("ENVIRONMENT", "production");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.http_port, 8088);
    assert!(config.database.is_memory());
    assert_eq!(config.backend, BackendKind::Http);
    assert_eq!(
        config.http_backend.base_url.as_deref(),
        Some("http://recommender:5000")
    );
    assert!((config.snack_calorie_threshold - 2200.0).abs() < f64::EPSILON);
    assert_eq!(config.cors_allowed_origins, vec!["*"]);
    assert!(config.environment.is_production());
    assert!(config.summary().contains("backend=http"));
    assert_eq!(
        config.recipe_catalogue,
        Some(PathBuf::from("/srv/fitplan/recipes.json"))
    );
}

#[test]
#[serial]
fn test_http_backend_requires_url() {
    clear_config_env();
    env::set_var("RECOMMENDER_BACKEND", "http");

    let result = ServerConfig::from_env();
    clear_config_env();

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("RECOMMENDER_URL"));
}

#[test]
#[serial]
fn test_malformed_values_are_rejected() {
    clear_config_env();
    env::set_var("PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
    env::set_var("SNACK_CALORIE_THRESHOLD", "-5");
    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
    env::set_var("DIET_COMMAND", "   ");
    assert!(ServerConfig::from_env().is_err());

    clear_config_env();
}

#[test]
#[serial]
fn test_zero_bridge_limit_means_unbounded() {
    clear_config_env();
    env::set_var("BRIDGE_MAX_CONCURRENT", "0");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.bridge.max_concurrent, None);
    assert!(config.summary().contains("bridge_limit=unbounded"));
}

#[test]
#[serial]
fn test_process_backend_commands_from_env() {
    clear_config_env();
    env::set_var("RECOMMENDER_BACKEND", "process");
    env::set_var("DIET_COMMAND", "python3 diet.py");
    env::set_var("EXERCISE_COMMAND", "python3 exercise.py --days 7");

    let config = ServerConfig::from_env().unwrap();
    clear_config_env();

    assert_eq!(config.backend, BackendKind::Process);
    assert_eq!(config.bridge.diet_command.args, vec!["diet.py"]);
    assert_eq!(
        config.bridge.exercise_command.args,
        vec!["exercise.py", "--days", "7"]
    );
}
