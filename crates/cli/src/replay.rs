// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scenario replay on a fake clock.
//!
//! Steps are replayed in order against one [`ScanController`]. Time only
//! moves when a step says so (key intervals, delays, waits) or when a lookup
//! sleeps, so every run of a scenario produces the same reports. Idle
//! flushes fire at their exact deadline whenever the timeline passes one.

use std::sync::Arc;

use casescan_capture::CaptureLog;
use serde::Serialize;

use crate::barcode::catalog_barcode;
use crate::config::{ScannerConfig, StepSpec};
use crate::controller::{ScanController, ScanReport};
use crate::key::{Key, KeyEvent};
use crate::lookup::{FixtureCatalog, LookupProvider};
use crate::output_diagnostic::print_debug;
use crate::scenario::Scenario;
use crate::session::{CaseRecord, ScannedAssistanceItem, SessionState};
use crate::time::{Clock, ClockHandle, FakeClock};

/// Something observable that happened during a step
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayEvent {
    /// A code was dispatched through the router
    Scan(ScanReport),
    /// Catalog item appended to the session
    CatalogAdded {
        item_id: String,
        barcode_id: String,
        index: usize,
    },
    CatalogFailed { item_id: String, reason: String },
    Removed { index: usize, barcode_id: String },
    RemoveFailed { index: usize, reason: String },
    Opened,
    Closed,
}

/// An event stamped with the step that produced it
#[derive(Clone, Debug, PartialEq)]
pub struct ReplayEntry {
    /// 1-based step number
    pub step: usize,
    pub at_ms: u64,
    pub event: ReplayEvent,
}

/// Session contents when the replay finished
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub open: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_case: Option<CaseRecord>,
    pub items: Vec<ScannedAssistanceItem>,
}

/// Everything a replay produced
#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    pub name: String,
    pub entries: Vec<ReplayEntry>,
    pub session: SessionSnapshot,
    /// Fake-clock time at the end of the replay
    pub elapsed_ms: u64,
}

impl ReplayOutcome {
    /// Scan reports only, in dispatch order
    pub fn scans(&self) -> impl Iterator<Item = &ScanReport> {
        self.entries.iter().filter_map(|e| match &e.event {
            ReplayEvent::Scan(report) => Some(report),
            _ => None,
        })
    }
}

/// Replays one scenario
#[derive(Debug)]
pub struct Replay {
    scenario: Scenario,
    scanner: ScannerConfig,
    lookup_delay_ms: u64,
    clock: FakeClock,
    capture: Option<CaptureLog>,
}

impl Replay {
    pub fn new(scenario: Scenario) -> Self {
        let scanner = scenario.scanner().clone();
        let lookup_delay_ms = scenario.config().lookup_delay_ms;
        Self {
            scenario,
            scanner,
            lookup_delay_ms,
            clock: FakeClock::at_epoch(),
            capture: None,
        }
    }

    /// Replace the scenario's scanner settings
    pub fn with_scanner(mut self, scanner: ScannerConfig) -> Self {
        self.scanner = scanner;
        self
    }

    /// Replace the scenario's simulated lookup latency
    pub fn with_lookup_delay_ms(mut self, delay_ms: u64) -> Self {
        self.lookup_delay_ms = delay_ms;
        self
    }

    pub fn with_capture(mut self, log: CaptureLog) -> Self {
        self.capture = Some(log);
        self
    }

    pub fn clock(&self) -> &FakeClock {
        &self.clock
    }

    pub async fn run(self) -> ReplayOutcome {
        let handle = ClockHandle::Fake(self.clock.clone());
        let catalog = FixtureCatalog::from_config(self.scenario.config(), handle.clone())
            .with_delay_ms(self.lookup_delay_ms);
        let mut controller = ScanController::new(&self.scanner, handle, Arc::new(catalog));
        if let Some(log) = self.capture.clone() {
            controller = controller.with_capture(log);
        }
        controller.open();

        let mut run = Run {
            clock: &self.clock,
            controller,
            entries: Vec::new(),
        };

        for (i, step) in self.scenario.steps().iter().enumerate() {
            run.step(i + 1, step).await;
        }
        let last = self.scenario.steps().len().max(1);
        run.settle(last, u64::MAX).await;

        let session = run.snapshot();
        ReplayOutcome {
            name: self.scenario.name().to_string(),
            entries: run.entries,
            session,
            elapsed_ms: self.clock.now_millis(),
        }
    }
}

struct Run<'a> {
    clock: &'a FakeClock,
    controller: ScanController,
    entries: Vec<ReplayEntry>,
}

impl Run<'_> {
    async fn step(&mut self, step: usize, spec: &StepSpec) {
        match spec {
            StepSpec::Keys {
                keys,
                interval_ms,
                delay_ms,
                focus,
            } => {
                let mut at = self.clock.now_millis() + delay_ms;
                for (k, name) in keys.iter().enumerate() {
                    if k > 0 {
                        at += interval_ms;
                    }
                    self.advance_to(step, at).await;
                    at = self.clock.now_millis();
                    let event = KeyEvent::new(Key::parse(name), at).with_focus(*focus);
                    for report in self.controller.key_event(&event).await {
                        self.push_scan(step, report);
                    }
                }
            }
            StepSpec::Manual { code, delay_ms } => {
                self.advance_to(step, self.clock.now_millis() + delay_ms).await;
                let report = self.controller.manual_entry(code).await;
                self.push_scan(step, report);
            }
            StepSpec::Catalog { item, delay_ms } => {
                self.advance_to(step, self.clock.now_millis() + delay_ms).await;
                let event = self.add_catalog_item(item).await;
                self.push(step, event);
            }
            StepSpec::Remove { index } => {
                self.advance_to(step, self.clock.now_millis()).await;
                let event = self.remove_item(*index);
                self.push(step, event);
            }
            StepSpec::Wait { ms } => {
                self.advance_to(step, self.clock.now_millis() + ms).await;
            }
            StepSpec::Close => {
                self.advance_to(step, self.clock.now_millis()).await;
                self.controller.close();
                self.push(step, ReplayEvent::Closed);
            }
            StepSpec::Open => {
                self.advance_to(step, self.clock.now_millis()).await;
                self.controller.open();
                self.push(step, ReplayEvent::Opened);
            }
        }
    }

    /// Fire idle flushes up to `at`, then move the clock there.
    async fn advance_to(&mut self, step: usize, at: u64) {
        self.settle(step, at).await;
        self.clock.set(at);
    }

    /// Fire every idle flush due at or before `until`.
    async fn settle(&mut self, step: usize, until: u64) {
        while let Some(deadline) = self.controller.flush_deadline() {
            if deadline > until {
                break;
            }
            self.clock.set(deadline);
            print_debug(format_args!("idle flush due at {}ms", deadline));
            if let Some(report) = self.controller.idle(self.clock.now_millis()).await {
                self.push_scan(step, report);
            }
        }
    }

    async fn add_catalog_item(&mut self, item_id: &str) -> ReplayEvent {
        let barcode_id = catalog_barcode(item_id);
        let lookup = self
            .controller
            .lookups()
            .lookup_assistance_item(&barcode_id)
            .await;
        let failed = |reason: String| ReplayEvent::CatalogFailed {
            item_id: item_id.to_string(),
            reason,
        };
        match lookup {
            Ok(Some(payload)) => match self.controller.add_catalog_item(item_id, payload) {
                Ok(index) => ReplayEvent::CatalogAdded {
                    item_id: item_id.to_string(),
                    barcode_id,
                    index,
                },
                Err(e) => failed(e.to_string()),
            },
            Ok(None) => failed(format!("'{}' is not in the catalog", barcode_id)),
            Err(e) => failed(e.to_string()),
        }
    }

    fn remove_item(&mut self, index: usize) -> ReplayEvent {
        let len = self.controller.session().lock().scanned_items().len();
        if index >= len {
            return ReplayEvent::RemoveFailed {
                index,
                reason: format!("no item at index {} ({} scanned)", index, len),
            };
        }
        let removed = self.controller.remove_item(index);
        ReplayEvent::Removed {
            index,
            barcode_id: removed.barcode_id,
        }
    }

    fn push_scan(&mut self, step: usize, report: ScanReport) {
        let at_ms = report.at_ms;
        print_debug(format_args!(
            "step {}: {} scan '{}' at {}ms",
            step,
            report.origin.as_str(),
            report.code,
            at_ms
        ));
        self.entries.push(ReplayEntry {
            step,
            at_ms,
            event: ReplayEvent::Scan(report),
        });
    }

    fn push(&mut self, step: usize, event: ReplayEvent) {
        self.entries.push(ReplayEntry {
            step,
            at_ms: self.clock.now_millis(),
            event,
        });
    }

    fn snapshot(&self) -> SessionSnapshot {
        let session = self.controller.session();
        let session = session.lock();
        SessionSnapshot {
            state: session.state(),
            open: session.is_open(),
            session_id: session.id().map(str::to_string),
            active_case: session.active_case().cloned(),
            items: session.scanned_items().to_vec(),
        }
    }
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
