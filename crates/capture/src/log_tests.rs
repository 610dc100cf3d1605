// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::interaction::{CapturedOutcome, CapturedScan, CapturedScanInput};
use proptest::prelude::*;
use rstest::rstest;
use std::thread;

fn make_input(code: &str) -> CapturedScanInput {
    CapturedScanInput {
        code: code.to_string(),
        origin: "scanner".to_string(),
        session_id: Some("session-1".to_string()),
        generation: 1,
        had_case: false,
    }
}

fn opened(case_id: &str) -> CapturedOutcome {
    CapturedOutcome::CaseOpened {
        case_id: case_id.to_string(),
    }
}

fn rejected(kind: &str) -> CapturedOutcome {
    CapturedOutcome::Rejected {
        kind: kind.to_string(),
        message: "try again".to_string(),
    }
}

#[test]
fn test_record_and_retrieve() {
    let log = CaptureLog::new();

    log.record(make_input("CASE-001"), opened("CASE-001"));

    assert_eq!(log.len(), 1);
    let scans = log.scans();
    assert_eq!(scans[0].seq, 0);
    assert_eq!(scans[0].input.code, "CASE-001");
    assert_eq!(scans[0].outcome, opened("CASE-001"));
}

#[rstest]
#[case(1, 1)]
#[case(5, 2)]
#[case(10, 5)]
#[case(3, 10)]
fn test_last_n(#[case] total: usize, #[case] n: usize) {
    let log = CaptureLog::new();

    for i in 0..total {
        log.record(make_input(&format!("CODE-{}", i)), CapturedOutcome::Debounced);
    }

    let last = log.last(n);
    let expected_len = n.min(total);
    assert_eq!(last.len(), expected_len);

    let start = total.saturating_sub(n);
    for (i, scan) in last.iter().enumerate() {
        assert_eq!(scan.input.code, format!("CODE-{}", start + i));
    }
}

#[test]
fn test_count() {
    let log = CaptureLog::new();

    log.record(make_input("AAA"), CapturedOutcome::Debounced);
    log.record(make_input("BBB"), rejected("invalid_scan"));
    log.record(make_input("CCC"), CapturedOutcome::Debounced);

    assert_eq!(
        log.count(|s| matches!(s.outcome, CapturedOutcome::Debounced)),
        2
    );
    assert_eq!(log.count(|s| !s.outcome.is_applied()), 3);
}

#[test]
fn test_find_applied_and_rejections() {
    let log = CaptureLog::new();

    log.record(make_input("CASE-1"), opened("CASE-1"));
    log.record(
        make_input("ITEM-1"),
        CapturedOutcome::ItemAdded {
            barcode_id: "ITEM-1".to_string(),
            index: 0,
        },
    );
    log.record(make_input("??"), rejected("invalid_scan"));
    log.record(make_input("ITEM-2"), CapturedOutcome::Discarded);

    assert_eq!(log.find_applied().len(), 2);
    assert_eq!(log.find_rejections().len(), 1);
}

#[test]
fn test_clear() {
    let log = CaptureLog::new();

    log.record(make_input("CASE-1"), opened("CASE-1"));

    assert!(!log.is_empty());
    log.clear();
    assert!(log.is_empty());
    assert_eq!(log.len(), 0);
}

#[test]
fn test_clone_shares_state() {
    let log1 = CaptureLog::new();
    let log2 = log1.clone();

    log1.record(make_input("AAA"), CapturedOutcome::Debounced);
    assert_eq!(log2.len(), 1);

    log2.record(make_input("BBB"), CapturedOutcome::Debounced);
    assert_eq!(log1.len(), 2);
}

#[test]
fn test_file_capture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scans.jsonl");

    {
        let log = CaptureLog::with_file(&path).unwrap();
        log.record(make_input("CASE-1"), opened("CASE-1"));
        log.record(make_input("x"), rejected("invalid_scan"));
    }

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let s1: CapturedScan = serde_json::from_str(lines[0]).unwrap();
    let s2: CapturedScan = serde_json::from_str(lines[1]).unwrap();

    assert_eq!(s1.input.code, "CASE-1");
    assert!(lines[0].contains(r#""type":"case_opened""#));
    assert_eq!(s2.seq, 1);
    assert!(matches!(s2.outcome, CapturedOutcome::Rejected { .. }));
}

#[test]
fn test_file_capture_invalid_path() {
    let result = CaptureLog::with_file(std::path::Path::new("/nonexistent/dir/scans.jsonl"));
    assert!(result.is_err());
}

#[test]
fn test_thread_safety() {
    let log = CaptureLog::new();
    let log_clone = log.clone();

    let handle = thread::spawn(move || {
        for i in 0..100 {
            log_clone.record(make_input(&format!("T1-{}", i)), CapturedOutcome::Debounced);
        }
    });

    for i in 0..100 {
        log.record(make_input(&format!("MAIN-{}", i)), CapturedOutcome::Debounced);
    }

    handle.join().unwrap();

    assert_eq!(log.len(), 200);
}

proptest! {
    #[test]
    fn prop_sequence_numbers_are_dense(count in 0usize..40) {
        let log = CaptureLog::new();
        for i in 0..count {
            log.record(make_input(&format!("CODE-{}", i)), CapturedOutcome::Debounced);
        }
        let scans = log.scans();
        prop_assert_eq!(scans.len(), count);
        for (i, scan) in scans.iter().enumerate() {
            prop_assert_eq!(scan.seq, i as u64);
        }
    }
}
