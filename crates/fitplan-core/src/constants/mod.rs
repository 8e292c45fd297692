// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Ports, environment keys, profile defaults, and energy conversion constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! Constants module
//!
//! Constants are grouped by domain rather than kept in a single flat list.

/// Energy and unit conversion constants
pub mod units;

/// Network ports
pub mod ports {
    /// Default HTTP port of the recommendation API
    pub const DEFAULT_HTTP_PORT: u16 = 3000;
}

/// API routes
pub mod routes {
    /// Exercise recommendation endpoint
    pub const EXERCISE_RECOMMEND: &str = "/api/exercise/recommend";
    /// Diet recommendation endpoint
    pub const DIET_RECOMMEND: &str = "/api/diet/recommend";
    /// Weekly meal plan endpoint
    pub const DIET_WEEKLY: &str = "/api/diet/weekly";
}

/// Service names used in structured logs
pub mod service_names {
    /// Main HTTP service
    pub const FITPLAN_SERVER: &str = "fitplan-server";
    /// Stdin/stdout worker spawned by the process bridge
    pub const FITPLAN_WORKER: &str = "fitplan-worker";
}

/// Environment variable names
pub mod env_config {
    /// Listen host
    pub const HOST: &str = "HOST";
    /// Listen port
    pub const PORT: &str = "PORT";
    /// Database connection URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Recommendation backend selector (native, process, http)
    pub const RECOMMENDER_BACKEND: &str = "RECOMMENDER_BACKEND";
    /// Command line for the diet worker process
    pub const DIET_COMMAND: &str = "DIET_COMMAND";
    /// Command line for the exercise worker process
    pub const EXERCISE_COMMAND: &str = "EXERCISE_COMMAND";
    /// Base URL of a remote recommender
    pub const RECOMMENDER_URL: &str = "RECOMMENDER_URL";
    /// Timeout applied to remote recommender calls
    pub const HTTP_CLIENT_TIMEOUT_SECS: &str = "HTTP_CLIENT_TIMEOUT_SECS";
    /// Upper bound on concurrently running worker processes
    pub const BRIDGE_MAX_CONCURRENT: &str = "BRIDGE_MAX_CONCURRENT";
    /// Calorie level above which a snack slot is planned
    pub const SNACK_CALORIE_THRESHOLD: &str = "SNACK_CALORIE_THRESHOLD";
    /// JSON recipe catalogue used to fill meal slots
    pub const RECIPE_CATALOGUE_PATH: &str = "RECIPE_CATALOGUE_PATH";
    /// Comma separated CORS origins
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Deployment environment
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default listen host
    pub const HOST: &str = "127.0.0.1";
    /// Default SQLite database location
    pub const DATABASE_URL: &str = "sqlite:./data/fitplan.db";
    /// Default diet worker command line
    pub const DIET_COMMAND: &str = "fitplan-worker diet";
    /// Default exercise worker command line
    pub const EXERCISE_COMMAND: &str = "fitplan-worker exercise";
    /// Default remote recommender timeout
    pub const HTTP_CLIENT_TIMEOUT_SECS: u64 = 10;
    /// Default worker concurrency bound
    pub const BRIDGE_MAX_CONCURRENT: usize = 16;
    /// Default snack threshold in kcal
    pub const SNACK_CALORIE_THRESHOLD: f64 = 2500.0;
    /// Default CORS origins (the web client dev server)
    pub const CORS_ALLOWED_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
}

/// Values substituted when a profile field is missing or unusable
pub mod profile_defaults {
    /// Body weight in kilograms
    pub const WEIGHT_KG: f64 = 70.0;
    /// Height in centimeters
    pub const HEIGHT_CM: f64 = 170.0;
    /// Age in years
    pub const AGE_YEARS: u32 = 30;
    /// Weekly weight change target in kg
    pub const WEEKLY_WEIGHT_CHANGE_KG: f64 = 0.0;
    /// Largest weekly weight change a stored profile may request, in kg
    pub const MAX_WEEKLY_WEIGHT_CHANGE_KG: f64 = 2.0;
    /// Number of meals in a single-day diet recommendation
    pub const MEAL_COUNT: u8 = 3;
    /// Oldest age accepted before the value is treated as garbage
    pub const MAX_AGE_YEARS: u32 = 120;
    /// Heaviest body weight accepted before the value is treated as garbage
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Tallest height accepted before the value is treated as garbage
    pub const MAX_HEIGHT_CM: f64 = 300.0;
}

/// Weekday labels, Monday first
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];
