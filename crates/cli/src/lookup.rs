// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Case and assistance-item lookup collaborators.
//!
//! The dispatcher only knows the [`LookupProvider`] trait. [`FixtureCatalog`]
//! answers from scenario fixtures, with optional simulated latency and
//! per-code failures, for replay and tests.

use crate::config::{CaseFixture, ItemFixture, ScenarioConfig};
use crate::session::{AssistanceRecord, CaseRecord};
use crate::time::{Clock, ClockHandle};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use thiserror::Error;

/// Boxed lookup future; `Ok(None)` means the code is unknown
pub type LookupFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Option<T>, LookupError>> + Send + 'a>>;

/// Transport-level lookup failure
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    #[error("lookup service unavailable: {0}")]
    Unavailable(String),

    #[error("lookup rejected: {0}")]
    Rejected(String),
}

/// Remote lookups the router awaits
pub trait LookupProvider: Send + Sync {
    /// Resolve a case card barcode
    fn lookup_case<'a>(&'a self, code: &'a str) -> LookupFuture<'a, CaseRecord>;

    /// Resolve an assistance item barcode
    fn lookup_assistance_item<'a>(&'a self, code: &'a str) -> LookupFuture<'a, AssistanceRecord>;
}

/// In-memory lookup provider built from scenario fixtures
#[derive(Clone, Debug, Default)]
pub struct FixtureCatalog {
    cases: HashMap<String, CaseFixture>,
    items: HashMap<String, ItemFixture>,
    delay_ms: u64,
    clock: ClockHandle,
}

impl FixtureCatalog {
    /// Create an empty catalog
    pub fn new(clock: ClockHandle) -> Self {
        Self {
            clock,
            ..Self::default()
        }
    }

    /// Build a catalog from a scenario's fixtures
    pub fn from_config(config: &ScenarioConfig, clock: ClockHandle) -> Self {
        let mut catalog = Self::new(clock).with_delay_ms(config.lookup_delay_ms);
        for case in &config.cases {
            catalog.insert_case(case.clone());
        }
        for item in &config.items {
            catalog.insert_item(item.clone());
        }
        catalog
    }

    /// Simulate this much latency on every lookup
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn insert_case(&mut self, case: CaseFixture) {
        self.cases.insert(case.code.clone(), case);
    }

    pub fn insert_item(&mut self, item: ItemFixture) {
        self.items.insert(item.code.clone(), item);
    }

    pub fn case_count(&self) -> usize {
        self.cases.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    async fn simulate_latency(&self) {
        if self.delay_ms > 0 {
            self.clock.sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }
}

impl LookupProvider for FixtureCatalog {
    fn lookup_case<'a>(&'a self, code: &'a str) -> LookupFuture<'a, CaseRecord> {
        Box::pin(async move {
            self.simulate_latency().await;
            let Some(fixture) = self.cases.get(code) else {
                return Ok(None);
            };
            if let Some(ref message) = fixture.error {
                return Err(LookupError::Unavailable(message.clone()));
            }
            Ok(Some(CaseRecord {
                id: fixture.id.clone().unwrap_or_else(|| fixture.code.clone()),
                name: fixture.name.clone(),
            }))
        })
    }

    fn lookup_assistance_item<'a>(&'a self, code: &'a str) -> LookupFuture<'a, AssistanceRecord> {
        Box::pin(async move {
            self.simulate_latency().await;
            let Some(fixture) = self.items.get(code) else {
                return Ok(None);
            };
            if let Some(ref message) = fixture.error {
                return Err(LookupError::Rejected(message.clone()));
            }
            Ok(Some(AssistanceRecord {
                amount: fixture.amount,
                unit: fixture.unit.clone(),
                category: fixture.category.clone(),
                description: fixture.description.clone(),
            }))
        })
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
