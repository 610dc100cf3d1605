// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing for the scenario replay binary.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::ScannerConfig;

/// Barcode scan dispatcher replay
#[derive(Parser, Debug, Clone)]
#[command(
    name = "casescan",
    version,
    about = "Replay scripted scanner input against the scan dispatcher"
)]
pub struct Cli {
    /// Scenario file (TOML, or JSON by extension)
    #[arg(long, value_name = "FILE", env = "CASESCAN_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Append every dispatched scan to this JSONL file
    #[arg(long, value_name = "FILE", env = "CASESCAN_CAPTURE_FILE")]
    pub capture_file: Option<PathBuf>,

    /// Duplicate-scan suppression window in milliseconds
    #[arg(long, value_name = "MS", env = "CASESCAN_DEBOUNCE_MS")]
    pub debounce_ms: Option<u64>,

    /// Idle time before an unterminated burst is flushed
    #[arg(long, value_name = "MS", env = "CASESCAN_SETTLE_MS")]
    pub settle_ms: Option<u64>,

    /// Gap between keys that resets the keystroke buffer
    #[arg(long, value_name = "MS", env = "CASESCAN_INTER_KEY_GAP_MS")]
    pub inter_key_gap_ms: Option<u64>,

    /// Simulated latency for every lookup, replacing the scenario's value
    #[arg(long, value_name = "MS", env = "CASESCAN_LOOKUP_DELAY_MS")]
    pub lookup_delay_ms: Option<u64>,

    /// Navigate to scanned cases instead of opening them in the scanner
    #[arg(long)]
    pub no_auto_open: bool,

    /// Print debug lines to stderr
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Resolve scanner settings: flag or environment, then `base`.
    pub fn scanner_config(&self, base: &ScannerConfig) -> ScannerConfig {
        let mut config = base.clone();
        if let Some(ms) = self.debounce_ms {
            config.debounce_ms = ms;
        }
        if let Some(ms) = self.settle_ms {
            config.settle_ms = ms;
        }
        if let Some(ms) = self.inter_key_gap_ms {
            config.inter_key_gap_ms = ms;
        }
        if self.no_auto_open {
            config.auto_open_scanned_case = false;
        }
        config
    }
}

/// Output format options
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One human-readable line per step
    #[default]
    Text,
    /// Single JSON document with entries and final session
    Json,
    /// Line-delimited JSON, one object per entry
    #[value(name = "stream-json")]
    StreamJson,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
