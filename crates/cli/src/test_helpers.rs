// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lookup doubles for router, controller and listener tests.

use crate::config::{CaseFixture, ItemFixture};
use crate::lookup::{FixtureCatalog, LookupFuture, LookupProvider};
use crate::session::{AssistanceRecord, CaseRecord};
use crate::time::ClockHandle;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::Notify;

/// Catalog with `CASE-1`, `CASE-2` and items `ITEM-1`, `ITEM-2`, `A-17`
pub fn sample_catalog(clock: ClockHandle) -> FixtureCatalog {
    let mut catalog = FixtureCatalog::new(clock);
    for code in ["CASE-1", "CASE-2"] {
        catalog.insert_case(CaseFixture {
            code: code.to_string(),
            id: None,
            name: Some(format!("Client {}", code)),
            error: None,
        });
    }
    for code in ["ITEM-1", "ITEM-2", "A-17"] {
        catalog.insert_item(ItemFixture {
            code: code.to_string(),
            amount: Some(25.0),
            unit: Some("USD".to_string()),
            category: Some("Food".to_string()),
            description: Some(format!("Voucher {}", code)),
            error: None,
        });
    }
    catalog
}

/// Wraps a catalog, counting calls and optionally holding each lookup
/// until [`GatedLookup::release`] is called.
pub struct GatedLookup {
    inner: FixtureCatalog,
    gated: AtomicBool,
    started: Notify,
    gate: Notify,
    calls: AtomicUsize,
}

impl GatedLookup {
    /// Lookups resolve immediately
    pub fn open(inner: FixtureCatalog) -> Self {
        Self {
            inner,
            gated: AtomicBool::new(false),
            started: Notify::new(),
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Lookups wait for `release()`
    pub fn gated(inner: FixtureCatalog) -> Self {
        let lookup = Self::open(inner);
        lookup.gated.store(true, Ordering::SeqCst);
        lookup
    }

    /// Number of lookups started so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wait until a lookup has started
    pub async fn wait_started(&self) {
        self.started.notified().await;
    }

    /// Let one held lookup finish
    pub fn release(&self) {
        self.gate.notify_one();
    }

    async fn enter(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        if self.gated.load(Ordering::SeqCst) {
            self.gate.notified().await;
        }
    }
}

impl LookupProvider for GatedLookup {
    fn lookup_case<'a>(&'a self, code: &'a str) -> LookupFuture<'a, CaseRecord> {
        Box::pin(async move {
            self.enter().await;
            self.inner.lookup_case(code).await
        })
    }

    fn lookup_assistance_item<'a>(&'a self, code: &'a str) -> LookupFuture<'a, AssistanceRecord> {
        Box::pin(async move {
            self.enter().await;
            self.inner.lookup_assistance_item(code).await
        })
    }
}
