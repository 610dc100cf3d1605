// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan router: debounce, validate, and route a code by session state.
//!
//! With no active case a code is looked up as a case card; once a case is
//! active, codes are looked up as assistance items and appended to the
//! session. The debounce check and timestamp update run before the first
//! await, so scans are accepted strictly in arrival order. Lookup results are
//! applied only if the session generation is unchanged when they arrive.

use crate::barcode::is_likely_valid_barcode;
use crate::config::ScannerConfig;
use crate::lookup::LookupProvider;
use crate::session::{CaseRecord, ScannedAssistanceItem, SharedSession};
use crate::time::{Clock, ClockHandle};
use casescan_capture::{CaptureLog, CapturedOutcome, CapturedScanInput};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where a code came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrigin {
    /// Reconstructed from scanner keystrokes
    Scanner,
    /// Typed into the manual entry field
    Manual,
}

impl ScanOrigin {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scanner => "scanner",
            Self::Manual => "manual",
        }
    }
}

/// What the router did with an accepted code
#[derive(Clone, Debug, PartialEq)]
pub enum ScanAction {
    /// Dropped inside the debounce window
    Debounced,
    /// Case found and shown in the scanner
    CaseOpened(CaseRecord),
    /// Case found; the session was closed and the case detail view should open
    NavigateToCase(CaseRecord),
    /// Assistance item appended at `index`
    ItemAdded {
        index: usize,
        item: ScannedAssistanceItem,
    },
    /// Result arrived for a session that has since closed or moved on
    Discarded,
}

/// Per-scan failures shown to the user
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("'{code}' is not a valid barcode")]
    InvalidScan { code: String },

    #[error("no case found for '{code}'")]
    CaseNotFound { code: String },

    #[error("could not add assistance item '{code}': {reason}")]
    AssistanceLookupFailed { code: String, reason: String },
}

impl ScanError {
    /// Stable identifier for logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidScan { .. } => "invalid_scan",
            Self::CaseNotFound { .. } => "case_not_found",
            Self::AssistanceLookupFailed { .. } => "assistance_lookup_failed",
        }
    }

    /// Prompt shown in the scanner UI
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidScan { .. } => "Invalid barcode. Please scan again.".to_string(),
            Self::CaseNotFound { code } => {
                format!("No case matches '{}'. Scan the case card again or enter it manually.", code)
            }
            Self::AssistanceLookupFailed { code, .. } => {
                format!("Could not find assistance item '{}'.", code)
            }
        }
    }
}

/// Routes validated codes to the case or assistance lookup
#[derive(Debug)]
pub struct ScanRouter {
    debounce_ms: u64,
    auto_open: bool,
    last_accepted: Mutex<Option<u64>>,
    clock: ClockHandle,
    capture: Option<CaptureLog>,
}

impl ScanRouter {
    pub fn new(config: &ScannerConfig, clock: ClockHandle) -> Self {
        Self {
            debounce_ms: config.debounce_ms,
            auto_open: config.auto_open_scanned_case,
            last_accepted: Mutex::new(None),
            clock,
            capture: None,
        }
    }

    /// Record every dispatch into `log`
    pub fn with_capture(mut self, log: CaptureLog) -> Self {
        self.capture = Some(log);
        self
    }

    /// Forget the last accepted scan time.
    pub fn reset(&self) {
        *self.last_accepted.lock() = None;
    }

    /// Time of the last accepted scan
    pub fn last_accepted(&self) -> Option<u64> {
        *self.last_accepted.lock()
    }

    /// Debounce, validate and route one code that arrived at `at_ms`.
    ///
    /// The debounce window is measured between arrival times, so lookup
    /// latency on an earlier scan never widens or narrows it. Manual entries
    /// skip the window and never auto-open a case.
    pub async fn handle_scan(
        &self,
        raw: &str,
        origin: ScanOrigin,
        at_ms: u64,
        session: &SharedSession,
        lookups: &dyn LookupProvider,
    ) -> Result<ScanAction, ScanError> {
        let input = {
            let s = session.lock();
            CapturedScanInput {
                code: raw.to_string(),
                origin: origin.as_str().to_string(),
                session_id: s.id().map(str::to_string),
                generation: s.generation(),
                had_case: s.active_case().is_some(),
            }
        };

        let result = self.dispatch(raw, origin, at_ms, session, lookups).await;

        if let Some(ref log) = self.capture {
            log.record(input, captured_outcome(&result));
        }
        result
    }

    async fn dispatch(
        &self,
        raw: &str,
        origin: ScanOrigin,
        at_ms: u64,
        session: &SharedSession,
        lookups: &dyn LookupProvider,
    ) -> Result<ScanAction, ScanError> {
        if origin == ScanOrigin::Scanner && !self.accept_at(at_ms) {
            return Ok(ScanAction::Debounced);
        }

        let code = raw.trim();
        if !is_likely_valid_barcode(code) {
            return Err(ScanError::InvalidScan {
                code: code.to_string(),
            });
        }

        let (generation, has_case) = {
            let s = session.lock();
            if !s.is_open() {
                return Ok(ScanAction::Discarded);
            }
            (s.generation(), s.active_case().is_some())
        };

        if has_case {
            self.route_item(code, generation, session, lookups).await
        } else {
            self.route_case(code, origin, generation, session, lookups)
                .await
        }
    }

    async fn route_case(
        &self,
        code: &str,
        origin: ScanOrigin,
        generation: u64,
        session: &SharedSession,
        lookups: &dyn LookupProvider,
    ) -> Result<ScanAction, ScanError> {
        let found = lookups.lookup_case(code).await;

        let mut s = session.lock();
        if s.generation() != generation || s.active_case().is_some() {
            return Ok(ScanAction::Discarded);
        }
        let case = match found {
            Ok(Some(case)) => case,
            Ok(None) | Err(_) => {
                return Err(ScanError::CaseNotFound {
                    code: code.to_string(),
                })
            }
        };
        if s.set_active_case(case.clone()).is_err() {
            return Ok(ScanAction::Discarded);
        }

        if origin == ScanOrigin::Scanner && self.auto_open {
            Ok(ScanAction::CaseOpened(case))
        } else {
            s.close();
            Ok(ScanAction::NavigateToCase(case))
        }
    }

    async fn route_item(
        &self,
        code: &str,
        generation: u64,
        session: &SharedSession,
        lookups: &dyn LookupProvider,
    ) -> Result<ScanAction, ScanError> {
        let found = lookups.lookup_assistance_item(code).await;

        let mut s = session.lock();
        if s.generation() != generation {
            return Ok(ScanAction::Discarded);
        }
        let payload = match found {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                return Err(ScanError::AssistanceLookupFailed {
                    code: code.to_string(),
                    reason: "not found".to_string(),
                })
            }
            Err(e) => {
                return Err(ScanError::AssistanceLookupFailed {
                    code: code.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let item = ScannedAssistanceItem {
            barcode_id: code.to_string(),
            scanned_at: self.timestamp(),
            payload,
        };
        match s.append_item(item.clone()) {
            Ok(index) => Ok(ScanAction::ItemAdded { index, item }),
            Err(_) => Ok(ScanAction::Discarded),
        }
    }

    /// Accept a scanner dispatch unless it falls inside the debounce window.
    fn accept_at(&self, at_ms: u64) -> bool {
        let mut last = self.last_accepted.lock();
        if let Some(prev) = *last {
            if at_ms.saturating_sub(prev) < self.debounce_ms {
                return false;
            }
        }
        *last = Some(at_ms);
        true
    }

    fn timestamp(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.clock.now_millis() as i64).unwrap_or_default()
    }
}

/// Capture-log form of a dispatch result
pub fn captured_outcome(result: &Result<ScanAction, ScanError>) -> CapturedOutcome {
    match result {
        Ok(ScanAction::Debounced) => CapturedOutcome::Debounced,
        Ok(ScanAction::Discarded) => CapturedOutcome::Discarded,
        Ok(ScanAction::CaseOpened(case)) => CapturedOutcome::CaseOpened {
            case_id: case.id.clone(),
        },
        Ok(ScanAction::NavigateToCase(case)) => CapturedOutcome::NavigatedToCase {
            case_id: case.id.clone(),
        },
        Ok(ScanAction::ItemAdded { index, item }) => CapturedOutcome::ItemAdded {
            barcode_id: item.barcode_id.clone(),
            index: *index,
        },
        Err(e) => CapturedOutcome::Rejected {
            kind: e.kind().to_string(),
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
