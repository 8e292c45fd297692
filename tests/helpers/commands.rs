// ABOUTME: Command specs for fake recommender child processes used by bridge tests
// ABOUTME: Shell one-liners for failure modes plus the real worker binary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitPlan Contributors

use fitplan_server::config::{BridgeConfig, CommandSpec};

/// Shell command running `script` with `sh -c`
pub fn sh(script: &str) -> CommandSpec {
    CommandSpec::new("sh", ["-c", script])
}

/// Child that echoes its stdin back
#[allow(dead_code)]
pub fn echo_stdin() -> CommandSpec {
    CommandSpec::new("cat", Vec::<String>::new())
}

/// Child that writes to stderr and exits with `code`
#[allow(dead_code)]
pub fn failing(code: i32) -> CommandSpec {
    sh(&format!("echo 'model file missing' >&2; exit {code}"))
}

/// Child that exits cleanly but prints something other than JSON
#[allow(dead_code)]
pub fn garbage_output() -> CommandSpec {
    sh("cat > /dev/null; echo 'Traceback (most recent call last):'")
}

/// Program that does not exist
#[allow(dead_code)]
pub fn missing_program() -> CommandSpec {
    CommandSpec::new("fitplan-no-such-program", Vec::<String>::new())
}

/// The worker binary built alongside these tests
#[allow(dead_code)]
pub fn worker(subcommand: &str) -> CommandSpec {
    CommandSpec::new(env!("CARGO_BIN_EXE_fitplan-worker"), [subcommand])
}

/// Bridge settings with the given diet and exercise commands
#[allow(dead_code)]
pub fn bridge_config(diet: CommandSpec, exercise: CommandSpec) -> BridgeConfig {
    BridgeConfig {
        diet_command: diet,
        exercise_command: exercise,
        max_concurrent: Some(4),
    }
}
