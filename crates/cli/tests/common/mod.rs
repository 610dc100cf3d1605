// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for replay CLI tests.

#![allow(dead_code)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

/// Fixtures shared by most scenarios
pub const FIXTURES: &str = r#"
name = "front desk"

[[cases]]
code = "CASE-1"
name = "Jordan Smith"

[[cases]]
code = "CASE-9"
error = "case service offline"

[[items]]
code = "ITEM-1"
amount = 1.0
unit = "bag"
category = "Food"

[[items]]
code = "A-17"
amount = 25.0
unit = "USD"
category = "Voucher"
"#;

/// Keys for a full case-card scan
pub const CASE_1_BURST: &str = r#"
[[steps]]
type = "keys"
keys = ["C", "A", "S", "E", "-", "1", "Enter"]
"#;

/// Create a temporary scenario file
/// Detects JSON vs TOML content and uses appropriate extension
pub fn write_scenario(content: &str) -> NamedTempFile {
    let is_json = content.trim().starts_with('{');

    let mut file = if is_json {
        tempfile::Builder::new().suffix(".json").tempfile().unwrap()
    } else {
        tempfile::Builder::new().suffix(".toml").tempfile().unwrap()
    };

    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Scenario file with the shared fixtures followed by `steps`
pub fn write_steps(steps: &str) -> NamedTempFile {
    write_scenario(&format!("{}\n{}", FIXTURES, steps))
}

/// casescan command isolated from the caller's CASESCAN_* environment
pub fn casescan() -> Command {
    let mut cmd = Command::cargo_bin("casescan").unwrap();
    for name in [
        "CASESCAN_SCENARIO",
        "CASESCAN_CAPTURE_FILE",
        "CASESCAN_INTER_KEY_GAP_MS",
        "CASESCAN_SETTLE_MS",
        "CASESCAN_DEBOUNCE_MS",
        "CASESCAN_LOOKUP_DELAY_MS",
    ] {
        cmd.env_remove(name);
    }
    cmd
}

/// Run a scenario with `--output-format json` and parse the document
pub fn replay_json(scenario: &NamedTempFile, extra: &[&str]) -> serde_json::Value {
    let output = casescan()
        .arg("--scenario")
        .arg(scenario.path())
        .args(["--output-format", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
