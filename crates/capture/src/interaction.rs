// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured scan record types.

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime};

/// One dispatched scan and what came of it
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CapturedScan {
    /// Sequence number within the log
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(with = "crate::duration_serde")]
    pub elapsed: Duration,

    /// What was dispatched
    pub input: CapturedScanInput,

    /// How the dispatcher resolved it
    pub outcome: CapturedOutcome,
}

/// The dispatched code and the session it was dispatched into
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedScanInput {
    /// Raw candidate as received (before trimming)
    pub code: String,
    /// `scanner` or `manual`
    pub origin: String,
    /// Scanner session id, if a session was open
    pub session_id: Option<String>,
    /// Session generation at dispatch time
    pub generation: u64,
    /// Whether the session already had an active case
    pub had_case: bool,
}

/// Captured outcome of a dispatch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CapturedOutcome {
    /// Case found and shown in the scanner
    CaseOpened { case_id: String },
    /// Case found; the session ended and the case detail view opens
    NavigatedToCase { case_id: String },
    /// Assistance item appended to the session
    ItemAdded { barcode_id: String, index: usize },
    /// Dropped inside the debounce window
    Debounced,
    /// Lookup finished after the session was closed
    Discarded,
    /// Per-scan failure surfaced to the user
    Rejected { kind: String, message: String },
}

impl CapturedOutcome {
    /// Whether the dispatch changed session state
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            Self::CaseOpened { .. } | Self::NavigatedToCase { .. } | Self::ItemAdded { .. }
        )
    }
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
