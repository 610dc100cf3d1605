// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw key events as delivered by the embedding UI shell.

use serde::{Deserialize, Serialize};

/// A physical key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Key {
    /// A single character key
    Char(char),
    /// Enter / Return, the scanner's terminator
    Enter,
    /// Any other named key (Shift, Tab, ArrowUp, ...)
    Other(String),
}

impl Key {
    /// Parse a key name as used in scenario scripts.
    ///
    /// Single characters map to [`Key::Char`], `Enter`/`Return` (any case)
    /// to [`Key::Enter`], everything else to [`Key::Other`].
    pub fn parse(name: &str) -> Self {
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::Char(c),
            _ if name.eq_ignore_ascii_case("enter") || name.eq_ignore_ascii_case("return") => {
                Key::Enter
            }
            _ => Key::Other(name.to_string()),
        }
    }
}

/// Where UI focus was when the key arrived
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusTarget {
    /// Page body or a non-editable widget
    #[default]
    Body,
    /// `<input>` / `<textarea>` style text entry
    TextInput,
    /// Content-editable region
    Editable,
}

impl FocusTarget {
    /// Whether keys typed here belong to a form rather than the scanner
    pub fn is_text_entry(self) -> bool {
        matches!(self, Self::TextInput | Self::Editable)
    }
}

/// A key press with its timestamp and focus context
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    /// Milliseconds, on the same timeline as the dispatcher's clock
    pub at_ms: u64,
    pub focus: FocusTarget,
}

impl KeyEvent {
    /// Key press on the page body
    pub fn new(key: Key, at_ms: u64) -> Self {
        Self {
            key,
            at_ms,
            focus: FocusTarget::Body,
        }
    }

    /// Character key press on the page body
    pub fn char(c: char, at_ms: u64) -> Self {
        Self::new(Key::Char(c), at_ms)
    }

    /// Enter key press on the page body
    pub fn enter(at_ms: u64) -> Self {
        Self::new(Key::Enter, at_ms)
    }

    /// Same event with a different focus target
    pub fn with_focus(mut self, focus: FocusTarget) -> Self {
        self.focus = focus;
        self
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
