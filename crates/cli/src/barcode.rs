// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plausibility check for reconstructed barcodes.

/// Shortest code accepted as a barcode, after trimming
pub const MIN_BARCODE_LEN: usize = 3;

/// Prefix for assistance items picked from the catalog instead of scanned
pub const CATALOG_PREFIX: &str = "A-";

/// Whether a single character belongs to the barcode alphabet
/// `[A-Za-z0-9\-_.]`. The keystroke buffer and the whole-code check share it.
pub fn is_barcode_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Decide whether `candidate` is likely a scanned code.
///
/// Surrounding whitespace is ignored. The trimmed code must be at least
/// [`MIN_BARCODE_LEN`] characters drawn only from `[A-Za-z0-9\-_.]`.
pub fn is_likely_valid_barcode(candidate: &str) -> bool {
    let code = candidate.trim();
    code.chars().count() >= MIN_BARCODE_LEN && code.chars().all(is_barcode_char)
}

/// Barcode id for an assistance item selected from the catalog.
pub fn catalog_barcode(item_id: &str) -> String {
    format!("{}{}", CATALOG_PREFIX, item_id.trim())
}

#[cfg(test)]
#[path = "barcode_tests.rs"]
mod tests;
