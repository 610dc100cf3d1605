// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scan dispatch capture and recording.
//!
//! Every code the dispatcher routes is recorded here together with the
//! outcome, so tests and operators can inspect what a scanner session did.
//! Records can be mirrored to a JSONL file.

mod duration_serde;
mod interaction;
mod log;

pub use interaction::{CapturedOutcome, CapturedScan, CapturedScanInput};
pub use log::CaptureLog;
