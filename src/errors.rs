// ABOUTME: Error types for the FitPlan server, shared with the core crate
// ABOUTME: Re-exports AppError, ErrorCode, and the JSON error body
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Unified Error Handling
//!
//! The error type lives in `fitplan-core` so the planners and the server share
//! one set of codes. With the `http-response` feature enabled, `AppError`
//! renders as `{"error": ..., "code": ..., "details": ...}` with the status
//! mapped from its code.

pub use fitplan_core::errors::{AppError, AppResult, ErrorCode, ErrorResponse};
