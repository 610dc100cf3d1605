// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Keystroke buffer that reconstructs keyboard-wedge scanner bursts.
//!
//! A wedge scanner types its code far faster than a person and usually ends
//! with Enter. The buffer keeps characters only while they arrive within the
//! inter-key gap, emits a [`Candidate`] on Enter, and otherwise arms an idle
//! flush that the host fires through [`KeystrokeBuffer::poll`].
//!
//! Hosts must call `poll(event.at_ms)` before `handle_key_event(event)` so a
//! flush that came due before the key is emitted first.

use crate::barcode::is_barcode_char;
use crate::config::ScannerConfig;
use crate::key::{Key, KeyEvent};

/// How a candidate was completed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Enter arrived with characters buffered
    Terminator,
    /// Idle flush after the settle window
    Settled,
}

/// A reconstructed, not yet validated code
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub code: String,
    /// When the candidate was emitted
    pub at_ms: u64,
    pub completion: Completion,
}

/// Accumulates scanner keystrokes between flushes
#[derive(Clone, Debug)]
pub struct KeystrokeBuffer {
    inter_key_gap_ms: u64,
    settle_ms: u64,
    min_length: usize,
    pending: String,
    last_key_at: Option<u64>,
    flush_deadline: Option<u64>,
}

impl KeystrokeBuffer {
    /// Create an empty buffer using the thresholds in `config`
    pub fn new(config: &ScannerConfig) -> Self {
        Self {
            inter_key_gap_ms: config.inter_key_gap_ms,
            settle_ms: config.settle_ms,
            min_length: config.min_length,
            pending: String::new(),
            last_key_at: None,
            flush_deadline: None,
        }
    }

    /// Feed one key press.
    ///
    /// Returns a candidate when Enter completes a non-empty burst. Presses
    /// made while a text field or editable region has focus are ignored.
    pub fn handle_key_event(&mut self, event: &KeyEvent) -> Option<Candidate> {
        if event.focus.is_text_entry() {
            return None;
        }

        if let Some(last) = self.last_key_at {
            if event.at_ms.saturating_sub(last) > self.inter_key_gap_ms {
                self.discard();
            }
        }
        self.last_key_at = Some(event.at_ms);

        match event.key {
            Key::Enter if !self.pending.is_empty() => {
                self.flush_deadline = None;
                Some(self.take(event.at_ms, Completion::Terminator))
            }
            Key::Char(c) if is_barcode_char(c) => {
                self.pending.push(c);
                self.flush_deadline = Some(event.at_ms.saturating_add(self.settle_ms));
                None
            }
            _ => None,
        }
    }

    /// Fire the idle-flush timer if it is due at `now`.
    ///
    /// The timer is consumed either way; the buffer is emitted only when it
    /// holds at least the configured minimum length.
    pub fn poll(&mut self, now: u64) -> Option<Candidate> {
        let deadline = self.flush_deadline?;
        if now < deadline {
            return None;
        }
        self.flush_deadline = None;
        if self.pending.chars().count() >= self.min_length {
            Some(self.take(now, Completion::Settled))
        } else {
            None
        }
    }

    /// When the armed idle flush comes due, if one is armed
    pub fn flush_deadline(&self) -> Option<u64> {
        self.flush_deadline
    }

    /// Characters buffered since the last flush
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Drop buffered input and cancel the idle flush.
    pub fn dispose(&mut self) {
        self.discard();
        self.last_key_at = None;
    }

    fn discard(&mut self) {
        self.pending.clear();
        self.flush_deadline = None;
    }

    fn take(&mut self, at_ms: u64, completion: Completion) -> Candidate {
        Candidate {
            code: std::mem::take(&mut self.pending),
            at_ms,
            completion,
        }
    }
}

#[cfg(test)]
#[path = "keystroke_tests.rs"]
mod tests;
