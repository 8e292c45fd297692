// ABOUTME: Core types and constants for the FitPlan recommendation service
// ABOUTME: Foundation crate with error handling, profile models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

#![deny(unsafe_code)]

//! # FitPlan Core
//!
//! Foundation crate providing shared types and constants for the FitPlan
//! nutrition and exercise service. It changes rarely, so the calculators and
//! the HTTP server can compile against it in parallel.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode`, and the HTTP error body
//! - **constants**: defaults, environment keys, and unit conversions
//! - **models**: profile, nutrition, and saved plan types

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profiles, targets, saved plans)
pub mod models;
