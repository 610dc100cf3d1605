// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scanner session state: the active case and the items scanned for it.
//!
//! ```text
//! Idle --open()--> AwaitingCase --case found--> HasCase --item found--> HasCase
//!   ^                                                                     |
//!   +------------------------------ close() ------------------------------+
//! ```
//!
//! Closing discards unsaved scan state. Every `open()` and `close()` bumps
//! the session generation so lookups started earlier can detect that their
//! result no longer belongs to this session.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Session shared between the controller, the router and in-flight lookups
pub type SharedSession = Arc<Mutex<ScanSession>>;

/// A case returned by the case lookup
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CaseRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
        }
    }
}

/// Assistance details returned by the item lookup
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One item captured during a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScannedAssistanceItem {
    /// Scanned code, or `A-<id>` for catalog picks
    pub barcode_id: String,
    pub scanned_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: AssistanceRecord,
}

/// Where the session is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    AwaitingCase,
    HasCase,
}

/// Errors from session mutation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("scanner session is closed")]
    Closed,

    #[error("scan a case before adding assistance items")]
    NoActiveCase,
}

/// State of one scanner session
#[derive(Debug, Default)]
pub struct ScanSession {
    id: Option<String>,
    generation: u64,
    active_case: Option<CaseRecord>,
    scanned_items: Vec<ScannedAssistanceItem>,
}

impl ScanSession {
    /// Create a closed session
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a fresh closed session for sharing
    pub fn shared() -> SharedSession {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Start a new session, discarding whatever the previous one held.
    pub fn open(&mut self) {
        self.reset();
        self.id = Some(uuid::Uuid::new_v4().to_string());
    }

    /// Set the case that subsequent item scans attach to
    pub fn set_active_case(&mut self, case: CaseRecord) -> Result<(), SessionError> {
        if !self.is_open() {
            return Err(SessionError::Closed);
        }
        self.active_case = Some(case);
        Ok(())
    }

    /// Append an item, returning its index
    pub fn append_item(&mut self, item: ScannedAssistanceItem) -> Result<usize, SessionError> {
        if !self.is_open() {
            return Err(SessionError::Closed);
        }
        if self.active_case.is_none() {
            return Err(SessionError::NoActiveCase);
        }
        self.scanned_items.push(item);
        Ok(self.scanned_items.len() - 1)
    }

    /// Remove the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_item(&mut self, index: usize) -> ScannedAssistanceItem {
        self.scanned_items.remove(index)
    }

    /// End the session. Clears the case and items unconditionally.
    pub fn close(&mut self) {
        self.reset();
    }

    pub fn state(&self) -> SessionState {
        match (&self.id, &self.active_case) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::AwaitingCase,
            (Some(_), Some(_)) => SessionState::HasCase,
        }
    }

    pub fn is_open(&self) -> bool {
        self.id.is_some()
    }

    /// Session id assigned by the last `open()`
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Token that changes whenever the session is opened or closed
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_case(&self) -> Option<&CaseRecord> {
        self.active_case.as_ref()
    }

    pub fn scanned_items(&self) -> &[ScannedAssistanceItem] {
        &self.scanned_items
    }

    fn reset(&mut self) {
        self.id = None;
        self.active_case = None;
        self.scanned_items.clear();
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
