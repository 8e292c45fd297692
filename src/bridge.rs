// ABOUTME: Process bridge that runs a recommender child process per request
// ABOUTME: JSON in on stdin, JSON out on stdout, failures mapped to structured errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

//! # Process Bridge
//!
//! Each call spawns one child, writes the request body to its stdin, closes
//! stdin, and buffers stdout and stderr until the child exits:
//!
//! ```text
//! Idle -> Spawned -> Collecting -> Exited(code) -> Success | Error
//! ```
//!
//! Spawn failures and non-zero exits become `PROCESS_FAILED`; a zero exit with
//! stdout that is not JSON becomes `INVALID_PROCESS_OUTPUT`. Both render as
//! HTTP 500. There are no retries and no timeout at this layer. An optional
//! semaphore bounds how many children run at once, and a child is killed if
//! the calling future is dropped.

use crate::config::CommandSpec;
use crate::errors::{AppError, AppResult};
use serde_json::{json, Value};
use std::fmt;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, warn};

/// Longest stderr or stdout excerpt copied into error details
const MAX_DIAGNOSTIC_CHARS: usize = 2000;

/// Lifecycle of one bridged child process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeState {
    /// Nothing started yet
    Idle,
    /// Child running, stdin being written
    Spawned,
    /// Stdin closed, waiting for output and exit
    Collecting,
    /// Child exited with this code (`None` when killed by a signal)
    Exited(Option<i32>),
}

impl fmt::Display for BridgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Spawned => f.write_str("spawned"),
            Self::Collecting => f.write_str("collecting"),
            Self::Exited(Some(code)) => write!(f, "exited({code})"),
            Self::Exited(None) => f.write_str("exited(signal)"),
        }
    }
}

/// Runs recommender commands as child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessBridge {
    limiter: Option<Arc<Semaphore>>,
}

impl ProcessBridge {
    /// Create a bridge; `None` allows unbounded concurrent children
    #[must_use]
    pub fn new(max_concurrent: Option<usize>) -> Self {
        Self {
            limiter: max_concurrent
                .filter(|n| *n > 0)
                .map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    /// Permits currently free, when bounded
    #[must_use]
    pub fn available_permits(&self) -> Option<usize> {
        self.limiter.as_ref().map(|s| s.available_permits())
    }

    async fn acquire(&self) -> AppResult<Option<OwnedSemaphorePermit>> {
        match &self.limiter {
            Some(semaphore) => Arc::clone(semaphore)
                .acquire_owned()
                .await
                .map(Some)
                .map_err(|e| AppError::internal(format!("Process bridge limiter closed: {e}"))),
            None => Ok(None),
        }
    }

    /// Run `command` with `input` on stdin and parse its stdout as JSON
    ///
    /// # Errors
    ///
    /// Returns `PROCESS_FAILED` if the child cannot start or exits non-zero, and
    /// `INVALID_PROCESS_OUTPUT` if stdout is not valid JSON
    pub async fn run(&self, command: &CommandSpec, input: &Value) -> AppResult<Value> {
        let _permit = self.acquire().await?;
        let started = Instant::now();
        let mut state = BridgeState::Idle;
        debug!(command = %command, state = %state, "Process bridge request");

        let payload = serde_json::to_vec(input)?;

        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                warn!(command = %command, error = %e, "Failed to spawn recommender process");
                AppError::process_failed(format!("Failed to start recommender process: {e}"))
                    .with_details(json!({ "command": command.to_string(), "stage": "spawn" }))
            })?;
        state = BridgeState::Spawned;
        debug!(command = %command, pid = child.id(), state = %state, "Child spawned");

        let stdin = child.stdin.take();
        let write_input = async move {
            if let Some(mut stdin) = stdin {
                // A child that exits without reading stdin surfaces through its exit status
                if let Err(e) = stdin.write_all(&payload).await {
                    debug!(error = %e, "Child closed stdin before reading the request");
                }
                drop(stdin);
            }
        };

        state = BridgeState::Collecting;
        debug!(command = %command, state = %state, "Collecting child output");
        let ((), output) = tokio::join!(write_input, child.wait_with_output());
        let output = output.map_err(|e| {
            AppError::process_failed(format!("Failed to collect recommender output: {e}"))
                .with_details(json!({ "command": command.to_string(), "stage": "collect" }))
        })?;

        state = BridgeState::Exited(output.status.code());
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!(
            command = %command,
            state = %state,
            elapsed_ms = started.elapsed().as_millis() as u64,
            stdout_bytes = output.stdout.len(),
            "Child exited"
        );

        if !output.status.success() {
            warn!(command = %command, state = %state, stderr = %excerpt(&stderr), "Recommender process failed");
            return Err(AppError::process_failed(format!(
                "Recommender process failed with {state}"
            ))
            .with_details(json!({
                "exit_code": output.status.code(),
                "stderr": excerpt(&stderr),
            })));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            let stdout = String::from_utf8_lossy(&output.stdout);
            warn!(command = %command, error = %e, "Recommender process returned invalid JSON");
            AppError::invalid_process_output("Recommender process returned invalid JSON")
                .with_details(json!({
                    "parse_error": e.to_string(),
                    "stdout": excerpt(&stdout),
                    "stderr": excerpt(&stderr),
                }))
        })
    }
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX_DIAGNOSTIC_CHARS {
        trimmed.to_owned()
    } else {
        let mut cut: String = trimmed.chars().take(MAX_DIAGNOSTIC_CHARS).collect();
        cut.push_str("...");
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_display() {
        assert_eq!(BridgeState::Exited(Some(3)).to_string(), "exited(3)");
        assert_eq!(BridgeState::Exited(None).to_string(), "exited(signal)");
        assert_eq!(BridgeState::Collecting.to_string(), "collecting");
    }

    #[test]
    fn test_zero_limit_is_unbounded() {
        assert_eq!(ProcessBridge::new(Some(0)).available_permits(), None);
        assert_eq!(ProcessBridge::new(Some(4)).available_permits(), Some(4));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(MAX_DIAGNOSTIC_CHARS + 10);
        assert_eq!(excerpt(&long).len(), MAX_DIAGNOSTIC_CHARS + 3);
        assert_eq!(excerpt("  short \n"), "short");
    }
}
