// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output format handling for text, JSON, and streaming JSON modes.

use std::io::{self, Write};

use casescan_capture::CapturedOutcome;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::replay::{ReplayEntry, ReplayEvent, ReplayOutcome, SessionSnapshot};
use crate::router::{captured_outcome, ScanAction, ScanOrigin};
use crate::session::{CaseRecord, ScannedAssistanceItem, SessionState};

/// One replay entry in JSON form
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryLine<'a> {
    Scan {
        step: usize,
        at_ms: u64,
        code: &'a str,
        origin: ScanOrigin,
        outcome: CapturedOutcome,
        /// Prompt shown to the user for rejected scans
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    CatalogAdded {
        step: usize,
        at_ms: u64,
        item_id: &'a str,
        barcode_id: &'a str,
        index: usize,
    },
    CatalogFailed {
        step: usize,
        at_ms: u64,
        item_id: &'a str,
        reason: &'a str,
    },
    Removed {
        step: usize,
        at_ms: u64,
        index: usize,
        barcode_id: &'a str,
    },
    RemoveFailed {
        step: usize,
        at_ms: u64,
        index: usize,
        reason: &'a str,
    },
    Opened {
        step: usize,
        at_ms: u64,
    },
    Closed {
        step: usize,
        at_ms: u64,
    },
}

impl<'a> From<&'a ReplayEntry> for EntryLine<'a> {
    fn from(entry: &'a ReplayEntry) -> Self {
        let step = entry.step;
        let at_ms = entry.at_ms;
        match &entry.event {
            ReplayEvent::Scan(report) => EntryLine::Scan {
                step,
                at_ms,
                code: &report.code,
                origin: report.origin,
                outcome: captured_outcome(&report.result),
                message: report.result.as_ref().err().map(|e| e.user_message()),
            },
            ReplayEvent::CatalogAdded {
                item_id,
                barcode_id,
                index,
            } => EntryLine::CatalogAdded {
                step,
                at_ms,
                item_id,
                barcode_id,
                index: *index,
            },
            ReplayEvent::CatalogFailed { item_id, reason } => EntryLine::CatalogFailed {
                step,
                at_ms,
                item_id,
                reason,
            },
            ReplayEvent::Removed { index, barcode_id } => EntryLine::Removed {
                step,
                at_ms,
                index: *index,
                barcode_id,
            },
            ReplayEvent::RemoveFailed { index, reason } => EntryLine::RemoveFailed {
                step,
                at_ms,
                index: *index,
                reason,
            },
            ReplayEvent::Opened => EntryLine::Opened { step, at_ms },
            ReplayEvent::Closed => EntryLine::Closed { step, at_ms },
        }
    }
}

/// Whole replay as one JSON document
#[derive(Clone, Debug, Serialize)]
pub struct ReplayDocument<'a> {
    pub scenario: &'a str,
    pub elapsed_ms: u64,
    pub entries: Vec<EntryLine<'a>>,
    pub session: &'a SessionSnapshot,
}

impl<'a> From<&'a ReplayOutcome> for ReplayDocument<'a> {
    fn from(outcome: &'a ReplayOutcome) -> Self {
        Self {
            scenario: &outcome.name,
            elapsed_ms: outcome.elapsed_ms,
            entries: outcome.entries.iter().map(EntryLine::from).collect(),
            session: &outcome.session,
        }
    }
}

/// Final stream-json line
#[derive(Serialize)]
struct SessionLine<'a> {
    #[serde(rename = "type")]
    line_type: &'static str,
    elapsed_ms: u64,
    #[serde(flatten)]
    session: &'a SessionSnapshot,
}

/// Write a replay outcome in the requested format.
pub fn write_outcome<W: Write>(
    writer: &mut W,
    outcome: &ReplayOutcome,
    format: OutputFormat,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(writer, outcome),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, &ReplayDocument::from(outcome))?;
            writeln!(writer)
        }
        OutputFormat::StreamJson => {
            for entry in &outcome.entries {
                serde_json::to_writer(&mut *writer, &EntryLine::from(entry))?;
                writeln!(writer)?;
            }
            let last = SessionLine {
                line_type: "session",
                elapsed_ms: outcome.elapsed_ms,
                session: &outcome.session,
            };
            serde_json::to_writer(&mut *writer, &last)?;
            writeln!(writer)
        }
    }
}

fn write_text<W: Write>(writer: &mut W, outcome: &ReplayOutcome) -> io::Result<()> {
    if !outcome.name.is_empty() {
        writeln!(writer, "scenario: {}", outcome.name)?;
    }
    for entry in &outcome.entries {
        writeln!(
            writer,
            "{:>6}ms  step {:<3} {}",
            entry.at_ms,
            entry.step,
            describe(&entry.event)
        )?;
    }
    write_session(writer, &outcome.session)
}

/// One-line description of a replay event
pub fn describe(event: &ReplayEvent) -> String {
    match event {
        ReplayEvent::Scan(report) => {
            let result = match &report.result {
                Ok(ScanAction::Debounced) => "debounced".to_string(),
                Ok(ScanAction::CaseOpened(case)) => format!("case opened: {}", case_label(case)),
                Ok(ScanAction::NavigateToCase(case)) => {
                    format!("navigate to case: {}", case_label(case))
                }
                Ok(ScanAction::ItemAdded { index, item }) => {
                    format!("item #{} added: {}", index, item_label(item))
                }
                Ok(ScanAction::Discarded) => "discarded".to_string(),
                Err(e) => format!("error: {}", e.user_message()),
            };
            format!(
                "{} '{}' -> {}",
                report.origin.as_str(),
                report.code.trim(),
                result
            )
        }
        ReplayEvent::CatalogAdded {
            item_id,
            barcode_id,
            index,
        } => format!("catalog {} -> item #{} added: {}", item_id, index, barcode_id),
        ReplayEvent::CatalogFailed { item_id, reason } => {
            format!("catalog {} -> error: {}", item_id, reason)
        }
        ReplayEvent::Removed { index, barcode_id } => {
            format!("removed item #{} ({})", index, barcode_id)
        }
        ReplayEvent::RemoveFailed { reason, .. } => format!("remove failed: {}", reason),
        ReplayEvent::Opened => "scanner opened".to_string(),
        ReplayEvent::Closed => "scanner closed".to_string(),
    }
}

fn write_session<W: Write>(writer: &mut W, session: &SessionSnapshot) -> io::Result<()> {
    match (session.state, &session.active_case) {
        (SessionState::Idle, _) => writeln!(writer, "session: closed"),
        (_, None) => writeln!(writer, "session: awaiting case"),
        (_, Some(case)) => {
            writeln!(
                writer,
                "session: case {}, {} item(s)",
                case_label(case),
                session.items.len()
            )?;
            for (i, item) in session.items.iter().enumerate() {
                writeln!(writer, "  {}. {}", i, item_label(item))?;
            }
            Ok(())
        }
    }
}

fn case_label(case: &CaseRecord) -> String {
    match &case.name {
        Some(name) => format!("{} ({})", case.id, name),
        None => case.id.clone(),
    }
}

fn item_label(item: &ScannedAssistanceItem) -> String {
    let payload = &item.payload;
    let mut label = item.barcode_id.clone();
    if let Some(amount) = payload.amount {
        label.push_str(&format!(" {}", amount));
        if let Some(ref unit) = payload.unit {
            label.push_str(&format!(" {}", unit));
        }
    }
    if let Some(ref category) = payload.category {
        label.push_str(&format!(" [{}]", category));
    }
    label
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
