// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One scanner UI lifetime: keystroke buffer, router, session and lookups.

use crate::barcode::catalog_barcode;
use crate::config::ScannerConfig;
use crate::key::KeyEvent;
use crate::keystroke::{Candidate, KeystrokeBuffer};
use crate::lookup::LookupProvider;
use crate::router::{ScanAction, ScanError, ScanOrigin, ScanRouter};
use crate::session::{
    AssistanceRecord, ScanSession, ScannedAssistanceItem, SessionError, SharedSession,
};
use crate::time::{Clock, ClockHandle};
use casescan_capture::CaptureLog;
use chrono::DateTime;
use std::sync::Arc;

/// Result of dispatching one code
#[derive(Clone, Debug, PartialEq)]
pub struct ScanReport {
    /// Code as dispatched (untrimmed)
    pub code: String,
    pub origin: ScanOrigin,
    /// Arrival time: the terminating key, the idle deadline, or manual submit
    pub at_ms: u64,
    pub result: Result<ScanAction, ScanError>,
}

/// Drives scan dispatch for an embedding UI shell
pub struct ScanController {
    buffer: KeystrokeBuffer,
    router: ScanRouter,
    session: SharedSession,
    lookups: Arc<dyn LookupProvider>,
    clock: ClockHandle,
}

impl ScanController {
    pub fn new(config: &ScannerConfig, clock: ClockHandle, lookups: Arc<dyn LookupProvider>) -> Self {
        Self {
            buffer: KeystrokeBuffer::new(config),
            router: ScanRouter::new(config, clock.clone()),
            session: ScanSession::shared(),
            lookups,
            clock,
        }
    }

    /// Record every dispatch into `log`
    pub fn with_capture(mut self, log: CaptureLog) -> Self {
        self.router = self.router.with_capture(log);
        self
    }

    /// Handle to the session, for UI reads
    pub fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    pub fn is_open(&self) -> bool {
        self.session.lock().is_open()
    }

    /// Open the scanner with fresh buffer, debounce and session state.
    pub fn open(&mut self) {
        self.buffer.dispose();
        self.router.reset();
        self.session.lock().open();
    }

    /// Close the scanner.
    ///
    /// Cancels the idle flush, forgets the debounce timestamp and resets the
    /// session, which invalidates lookups still in flight.
    pub fn close(&mut self) {
        self.buffer.dispose();
        self.router.reset();
        self.session.lock().close();
    }

    /// When the buffer's idle flush comes due
    pub fn flush_deadline(&self) -> Option<u64> {
        if self.is_open() {
            self.buffer.flush_deadline()
        } else {
            None
        }
    }

    /// Feed one key press; keys are ignored while the scanner is closed.
    ///
    /// An idle flush that came due before this key is dispatched first, so
    /// up to two reports can result.
    pub async fn key_event(&mut self, event: &KeyEvent) -> Vec<ScanReport> {
        let mut reports = Vec::new();
        if !self.is_open() {
            return reports;
        }
        if let Some(candidate) = self.buffer.poll(event.at_ms) {
            reports.push(self.dispatch(candidate).await);
        }
        if let Some(candidate) = self.buffer.handle_key_event(event) {
            reports.push(self.dispatch(candidate).await);
        }
        reports
    }

    /// Fire the idle flush if it is due at `now`.
    pub async fn idle(&mut self, now: u64) -> Option<ScanReport> {
        if !self.is_open() {
            return None;
        }
        let candidate = self.buffer.poll(now)?;
        Some(self.dispatch(candidate).await)
    }

    /// Dispatch a code typed into the manual entry field
    pub async fn manual_entry(&mut self, code: &str) -> ScanReport {
        let at_ms = self.clock.now_millis();
        self.run(code, ScanOrigin::Manual, at_ms).await
    }

    /// Add an assistance item picked from the catalog, stored as `A-<id>`.
    pub fn add_catalog_item(
        &mut self,
        item_id: &str,
        payload: AssistanceRecord,
    ) -> Result<usize, SessionError> {
        let item = ScannedAssistanceItem {
            barcode_id: catalog_barcode(item_id),
            scanned_at: DateTime::from_timestamp_millis(self.clock.now_millis() as i64)
                .unwrap_or_default(),
            payload,
        };
        self.session.lock().append_item(item)
    }

    /// Remove a scanned item.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_item(&mut self, index: usize) -> ScannedAssistanceItem {
        self.session.lock().remove_item(index)
    }

    /// Lookup provider, for catalog resolution by the host
    pub fn lookups(&self) -> &dyn LookupProvider {
        self.lookups.as_ref()
    }

    async fn dispatch(&mut self, candidate: Candidate) -> ScanReport {
        self.run(&candidate.code, ScanOrigin::Scanner, candidate.at_ms)
            .await
    }

    /// Route `code`, which arrived at `at_ms`.
    async fn run(&mut self, code: &str, origin: ScanOrigin, at_ms: u64) -> ScanReport {
        let result = self
            .router
            .handle_scan(code, origin, at_ms, &self.session, self.lookups.as_ref())
            .await;
        if matches!(result, Ok(ScanAction::NavigateToCase(_))) {
            // Router already reset the session; drop scanner-side state too
            self.buffer.dispose();
            self.router.reset();
        }
        ScanReport {
            code: code.to_string(),
            origin,
            at_ms,
            result,
        }
    }
}

impl std::fmt::Debug for ScanController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanController")
            .field("buffer", &self.buffer)
            .field("router", &self.router)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
