// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Request spans carry a request ID; CORS follows configured origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

pub mod cors;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{request_trace_layer, RequestSpan, REQUEST_ID_HEADER};
