// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Async driver that feeds a key event channel into a [`ScanController`].
//!
//! The idle-flush timer is a clock sleep raced against the next key, so it is
//! cancelled simply by a key arriving or the buffer being disposed. Dropping
//! the key sender closes the scanner once the current dispatch finishes;
//! [`CloseHandle::close`] closes it immediately, dropping any lookup still in
//! flight.

use crate::controller::{ScanController, ScanReport};
use crate::key::KeyEvent;
use crate::time::{Clock, ClockHandle};
use std::sync::Arc;
use tokio::sync::{mpsc, Notify};
use tokio::task::JoinHandle;

/// Capacity of the key channel created by [`ScanListener::spawn`]
pub const KEY_CHANNEL_CAPACITY: usize = 256;

/// Owns a controller for the lifetime of one listening session
#[derive(Debug)]
pub struct ScanListener {
    controller: ScanController,
    clock: ClockHandle,
    close: Arc<Notify>,
}

/// Asks a running listener to close the scanner
#[derive(Clone, Debug)]
pub struct CloseHandle(Arc<Notify>);

impl CloseHandle {
    /// Close the scanner, cancelling a dispatch that is awaiting a lookup.
    ///
    /// A signal sent before the listener starts waiting is kept until it does.
    pub fn close(&self) {
        self.0.notify_one();
    }
}

/// Channels and task handle of a spawned listener
#[derive(Debug)]
pub struct ListenerHandle {
    pub keys: mpsc::Sender<KeyEvent>,
    pub reports: mpsc::UnboundedReceiver<ScanReport>,
    pub close: CloseHandle,
    pub task: JoinHandle<ScanController>,
}

impl ScanListener {
    pub fn new(controller: ScanController, clock: ClockHandle) -> Self {
        Self {
            controller,
            clock,
            close: Arc::new(Notify::new()),
        }
    }

    /// Handle for closing this listener while it runs
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle(Arc::clone(&self.close))
    }

    /// Spawn the listener on the current tokio runtime.
    pub fn spawn(self) -> ListenerHandle {
        let (keys, key_rx) = mpsc::channel(KEY_CHANNEL_CAPACITY);
        let (report_tx, reports) = mpsc::unbounded_channel();
        let close = self.close_handle();
        let task = tokio::spawn(self.run(key_rx, report_tx));
        ListenerHandle {
            keys,
            reports,
            close,
            task,
        }
    }

    /// Process keys until the sender is dropped or a close is signalled, then
    /// close the scanner.
    ///
    /// Opens the controller first if the host has not. A close signal races
    /// every dispatch, so a lookup in flight is dropped and reports nothing.
    /// Returns the closed controller so the host can reuse it.
    pub async fn run(
        mut self,
        mut keys: mpsc::Receiver<KeyEvent>,
        reports: mpsc::UnboundedSender<ScanReport>,
    ) -> ScanController {
        if !self.controller.is_open() {
            self.controller.open();
        }

        let close = Arc::clone(&self.close);
        loop {
            let deadline = self.controller.flush_deadline();
            let batch = tokio::select! {
                biased;
                _ = close.notified() => break,
                event = keys.recv() => {
                    let Some(event) = event else {
                        break;
                    };
                    tokio::select! {
                        biased;
                        _ = close.notified() => break,
                        batch = self.controller.key_event(&event) => batch,
                    }
                }
                _ = idle_timer(&self.clock, deadline) => {
                    let now = self.clock.now_millis();
                    tokio::select! {
                        biased;
                        _ = close.notified() => break,
                        report = self.controller.idle(now) => report.into_iter().collect(),
                    }
                }
            };
            for report in batch {
                let _ = reports.send(report);
            }
        }

        self.controller.close();
        self.controller
    }
}

async fn idle_timer(clock: &ClockHandle, deadline: Option<u64>) {
    match deadline {
        Some(deadline) => clock.sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
