// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Capture log implementation.

use crate::interaction::{CapturedOutcome, CapturedScan, CapturedScanInput};
use parking_lot::Mutex;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

/// Capture log for recording dispatched scans
pub struct CaptureLog {
    start: Instant,
    scans: Arc<Mutex<Vec<CapturedScan>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl CaptureLog {
    /// Create a new in-memory capture log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            scans: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create a capture log that also writes to a file (JSONL format)
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            scans: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Record a dispatched scan
    pub fn record(&self, input: CapturedScanInput, outcome: CapturedOutcome) {
        let mut scans = self.scans.lock();
        let seq = scans.len() as u64;
        let scan = CapturedScan {
            seq,
            timestamp: SystemTime::now(),
            elapsed: self.start.elapsed(),
            input,
            outcome,
        };

        scans.push(scan.clone());

        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&scan) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }
    }

    /// Get all captured scans
    pub fn scans(&self) -> Vec<CapturedScan> {
        self.scans.lock().clone()
    }

    /// Get the last N scans
    pub fn last(&self, n: usize) -> Vec<CapturedScan> {
        let all = self.scans.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count scans matching a predicate
    pub fn count<F: Fn(&CapturedScan) -> bool>(&self, pred: F) -> usize {
        self.scans.lock().iter().filter(|s| pred(s)).count()
    }

    /// Find scans that changed session state
    pub fn find_applied(&self) -> Vec<CapturedScan> {
        self.scans
            .lock()
            .iter()
            .filter(|s| s.outcome.is_applied())
            .cloned()
            .collect()
    }

    /// Find scans surfaced to the user as failures
    pub fn find_rejections(&self) -> Vec<CapturedScan> {
        self.scans
            .lock()
            .iter()
            .filter(|s| matches!(s.outcome, CapturedOutcome::Rejected { .. }))
            .cloned()
            .collect()
    }

    /// Get the total number of scans
    pub fn len(&self) -> usize {
        self.scans.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.scans.lock().is_empty()
    }

    /// Clear all recorded scans
    pub fn clear(&self) {
        self.scans.lock().clear();
    }
}

impl Default for CaptureLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CaptureLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            scans: Arc::clone(&self.scans),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for CaptureLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureLog")
            .field("len", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
