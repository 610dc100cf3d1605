// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Barcode scan dispatcher
//!
//! Tells keyboard-wedge scanner bursts apart from human typing, rebuilds the
//! scanned code, validates it, and routes it to a case lookup or an
//! assistance-item lookup depending on the scanner session.
//!
//! The pieces, leaves first:
//!
//! - [`barcode`]: validation predicate
//! - [`keystroke`]: key events to candidate codes
//! - [`router`]: debounce, validate, route
//! - [`session`]: active case and scanned items
//! - [`controller`] / [`listener`]: one scanner UI lifetime, sync or as a task
//!
//! The `casescan` binary replays scenario files through the same pipeline.
#![doc = include_str!("../README.md")]

pub mod barcode;
/// Re-exported capture types from casescan-capture crate.
pub mod capture {
    pub use casescan_capture::{CaptureLog, CapturedOutcome, CapturedScan, CapturedScanInput};
}
#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod controller;
pub mod key;
pub mod keystroke;
pub mod listener;
pub mod lookup;
#[doc(hidden)]
pub mod output;
#[doc(hidden)]
pub mod output_diagnostic;
pub mod replay;
pub mod router;
pub mod scenario;
pub mod session;
pub mod time;

#[cfg(test)]
mod test_helpers;
