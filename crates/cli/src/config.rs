// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner tuning and scenario configuration types for TOML/JSON files.

use crate::key::FocusTarget;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inter-key gap above which buffered characters are treated as typing
pub const DEFAULT_INTER_KEY_GAP_MS: u64 = 200;
/// Quiet period after the last key before an unterminated burst is flushed
pub const DEFAULT_SETTLE_MS: u64 = 150;
/// Minimum buffered length for an idle flush
pub const DEFAULT_MIN_LENGTH: usize = 3;
/// Minimum time between two accepted scans
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

fn default_inter_key_gap_ms() -> u64 {
    DEFAULT_INTER_KEY_GAP_MS
}

fn default_settle_ms() -> u64 {
    DEFAULT_SETTLE_MS
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_true() -> bool {
    true
}

fn default_interval_ms() -> u64 {
    20
}

/// Timing thresholds and routing preferences for one scanner
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    /// Gap between keys that resets the buffer (default: 200)
    #[serde(default = "default_inter_key_gap_ms")]
    pub inter_key_gap_ms: u64,

    /// Idle time before an unterminated burst is flushed (default: 150)
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Minimum length for an idle flush (default: 3)
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Duplicate-scan suppression window (default: 200)
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Show a scanned case in the scanner instead of navigating to it
    #[serde(default = "default_true")]
    pub auto_open_scanned_case: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            inter_key_gap_ms: DEFAULT_INTER_KEY_GAP_MS,
            settle_ms: DEFAULT_SETTLE_MS,
            min_length: DEFAULT_MIN_LENGTH,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_open_scanned_case: true,
        }
    }
}

impl ScannerConfig {
    /// Check thresholds for values the buffer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settle_ms == 0 {
            return Err(ConfigError::ZeroSettle);
        }
        if self.inter_key_gap_ms == 0 {
            return Err(ConfigError::ZeroInterKeyGap);
        }
        if self.min_length == 0 {
            return Err(ConfigError::ZeroMinLength);
        }
        Ok(())
    }
}

/// Scanner thresholds the keystroke buffer cannot work with
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("settle_ms must be positive")]
    ZeroSettle,

    #[error("inter_key_gap_ms must be positive")]
    ZeroInterKeyGap,

    #[error("min_length must be at least 1")]
    ZeroMinLength,
}

/// Top-level replay scenario
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Name for logging/debugging
    #[serde(default)]
    pub name: String,

    /// Scanner thresholds
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Simulated latency for every lookup
    #[serde(default)]
    pub lookup_delay_ms: u64,

    /// Cases known to the fixture catalog
    #[serde(default)]
    pub cases: Vec<CaseFixture>,

    /// Assistance items known to the fixture catalog
    #[serde(default)]
    pub items: Vec<ItemFixture>,

    /// Scripted input, replayed in order
    #[serde(default)]
    pub steps: Vec<StepSpec>,
}

/// A case reachable by barcode
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFixture {
    /// Code printed on the case card
    pub code: String,

    /// Case identifier (defaults to the code)
    #[serde(default)]
    pub id: Option<String>,

    /// Client display name
    #[serde(default)]
    pub name: Option<String>,

    /// Simulate a lookup failure with this message
    #[serde(default)]
    pub error: Option<String>,
}

/// An assistance item reachable by barcode
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ItemFixture {
    /// Code on the item label (catalog items use `A-<id>`)
    pub code: String,

    #[serde(default)]
    pub amount: Option<f64>,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Simulate a lookup failure with this message
    #[serde(default)]
    pub error: Option<String>,
}

/// One scripted step
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum StepSpec {
    /// Key presses (e.g., ["C", "1", "2", "Enter"]) spaced `interval_ms` apart
    Keys {
        keys: Vec<String>,
        #[serde(default = "default_interval_ms")]
        interval_ms: u64,
        /// Pause before the first key
        #[serde(default)]
        delay_ms: u64,
        #[serde(default)]
        focus: FocusTarget,
    },
    /// Code typed into the manual entry field
    Manual {
        code: String,
        #[serde(default)]
        delay_ms: u64,
    },
    /// Assistance item picked from the catalog by id
    Catalog {
        item: String,
        #[serde(default)]
        delay_ms: u64,
    },
    /// Remove a scanned item by position
    Remove { index: usize },
    /// Let time pass
    Wait { ms: u64 },
    /// Close the scanner, discarding unsaved state
    Close,
    /// Reopen the scanner
    Open,
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
