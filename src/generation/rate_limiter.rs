// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Per-client fixed-window quota for card generation
//!
//! The first request from a client opens a window of `window` length; up to
//! `max_per_window` generations are admitted until it expires. Counters live
//! behind the [`QuotaStore`] trait so another backing store can be swapped in,
//! and time comes from a [`Clock`] so tests can move it forward.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

/// Default quota window (24 hours)
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration)
        .unwrap_or_else(|_| chrono::Duration::seconds(DEFAULT_WINDOW.as_secs() as i64))
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(PoisonError::into_inner);
        *now += to_chrono(by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Quota state for one client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitEntry {
    pub count: u32,
    pub reset_at: DateTime<Utc>,
}

/// Storage for per-client quota entries
///
/// Each method must be atomic with respect to a single client id.
pub trait QuotaStore: Send + Sync {
    /// Current entry for the client, if any
    fn get(&self, client_id: &str) -> Option<RateLimitEntry>;

    /// Ensure the client has a live window.
    ///
    /// Creates `{count: 0, reset_at}` when the client has no entry or when
    /// `now` is past the stored `reset_at`; otherwise leaves it alone.
    /// Returns the entry in force afterwards.
    fn open_window(
        &self,
        client_id: &str,
        now: DateTime<Utc>,
        reset_at: DateTime<Utc>,
    ) -> RateLimitEntry;

    /// Increment the client's count if it is below `max`, returning the new count
    fn try_increment(&self, client_id: &str, max: u32) -> Option<u32>;

    /// Number of clients being tracked
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local quota store
///
/// The outer map is only write-locked to add a new client; each client's
/// entry has its own mutex so unrelated clients never wait on each other.
#[derive(Debug, Default)]
pub struct InMemoryQuotaStore {
    entries: RwLock<HashMap<String, Arc<Mutex<RateLimitEntry>>>>,
}

impl InMemoryQuotaStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, client_id: &str) -> Option<Arc<Mutex<RateLimitEntry>>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(client_id)
            .cloned()
    }

    fn slot_or_insert(
        &self,
        client_id: &str,
        initial: RateLimitEntry,
    ) -> Arc<Mutex<RateLimitEntry>> {
        if let Some(slot) = self.slot(client_id) {
            return slot;
        }
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(client_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(initial)))
            .clone()
    }
}

impl QuotaStore for InMemoryQuotaStore {
    fn get(&self, client_id: &str) -> Option<RateLimitEntry> {
        self.slot(client_id)
            .map(|slot| *slot.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn open_window(
        &self,
        client_id: &str,
        now: DateTime<Utc>,
        reset_at: DateTime<Utc>,
    ) -> RateLimitEntry {
        let fresh = RateLimitEntry { count: 0, reset_at };
        let slot = self.slot_or_insert(client_id, fresh);
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if now > entry.reset_at {
            *entry = fresh;
        }
        *entry
    }

    fn try_increment(&self, client_id: &str, max: u32) -> Option<u32> {
        let slot = self.slot(client_id)?;
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);
        if entry.count >= max {
            return None;
        }
        entry.count += 1;
        Some(entry.count)
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// Fixed-window generation quota keyed by client identity
pub struct CardRateLimiter {
    store: Arc<dyn QuotaStore>,
    clock: Arc<dyn Clock>,
    max_per_window: u32,
    window: Duration,
}

impl CardRateLimiter {
    /// In-memory limiter with the default 24 hour window
    pub fn new(max_per_window: u32) -> Self {
        Self::with_window(max_per_window, DEFAULT_WINDOW)
    }

    /// In-memory limiter with a custom window duration
    pub fn with_window(max_per_window: u32, window: Duration) -> Self {
        Self::with_store(
            Arc::new(InMemoryQuotaStore::new()),
            Arc::new(SystemClock),
            max_per_window,
            window,
        )
    }

    /// Limiter over an arbitrary store and clock
    pub fn with_store(
        store: Arc<dyn QuotaStore>,
        clock: Arc<dyn Clock>,
        max_per_window: u32,
        window: Duration,
    ) -> Self {
        Self {
            store,
            clock,
            max_per_window,
            window,
        }
    }

    pub fn max_per_window(&self) -> u32 {
        self.max_per_window
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Number of clients with a quota entry
    pub fn tracked_clients(&self) -> usize {
        self.store.len()
    }

    /// Check the quota for `client_id`, consuming one slot when allowed
    pub fn check_rate_limit(&self, client_id: &str) -> RateLimitDecision {
        let now = self.clock.now();
        let reset_at = now + to_chrono(self.window);
        let entry = self.store.open_window(client_id, now, reset_at);

        match self.store.try_increment(client_id, self.max_per_window) {
            Some(count) => {
                let remaining = self.max_per_window.saturating_sub(count);
                debug!(
                    "Quota consumed: client={}, count={}, remaining={}",
                    client_id, count, remaining
                );
                RateLimitDecision {
                    allowed: true,
                    remaining,
                    reset_at: entry.reset_at,
                }
            }
            None => {
                warn!(
                    "Quota exhausted: client={}, max={}, resets_at={}",
                    client_id, self.max_per_window, entry.reset_at
                );
                RateLimitDecision {
                    allowed: false,
                    remaining: 0,
                    reset_at: entry.reset_at,
                }
            }
        }
    }
}
