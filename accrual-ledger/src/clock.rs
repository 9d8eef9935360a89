//! Time source abstraction
//!
//! Accrual is a function of elapsed wall-clock time, so the ledger takes its
//! notion of "now" from a [`Clock`] implementation. Production uses
//! [`SystemClock`]; tests use [`ManualClock`] for deterministic elapsed time.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current Unix timestamp (seconds)
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in seconds
    fn now_unix(&self) -> u64;
}

/// Wall-clock time via `chrono`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Manually advanced clock for deterministic tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Create a clock starting at `start` seconds
    pub fn new(start: u64) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    /// Set the current time
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Advance the current time by `seconds`
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
