//! In-memory admission limiter keyed by caller IP.
//!
//! One record per caller tracks a rolling request count inside a fixed one-hour
//! window. Expiry is checked lazily on every `check`; a periodic sweep only
//! keeps the store from growing while the execution environment stays warm.
//! Nothing here survives a process restart.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Length of the counting window for a single caller.
pub const WINDOW_DURATION: Duration = Duration::from_secs(60 * 60);
/// Requests a caller may make inside one window before being denied.
pub const MAX_REQUESTS: u32 = 3;
/// Sentinel for requests whose origin could not be resolved. These bypass
/// limiting entirely and are never tracked.
pub const UNKNOWN_CALLER: &str = "unknown";

/// Outcome of an admission check. The handler maps `Deny` to HTTP 429.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

struct CallerRecord {
    window_start: Instant,
    count: u32,
}

/// The admission limiter. Owned by the Lambda binary and shared with the
/// handler; the mutex guards the read-modify-write in `check` since the tokio
/// runtime may drive invocations from more than one thread.
pub struct RateLimiter {
    store: Mutex<HashMap<String, CallerRecord>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Decide whether to admit a request from `identifier` at time `now`.
    ///
    /// Never fails. Denied attempts still count against the caller, so a
    /// caller hammering the endpoint stays denied until its window expires.
    pub fn check(&self, identifier: &str, now: Instant) -> Decision {
        if identifier == UNKNOWN_CALLER {
            return Decision::Allow;
        }

        let mut store = self.store.lock().unwrap();
        match store.get_mut(identifier) {
            None => {
                store.insert(
                    identifier.to_string(),
                    CallerRecord {
                        window_start: now,
                        count: 1,
                    },
                );
                Decision::Allow
            }
            Some(record) if now.duration_since(record.window_start) > WINDOW_DURATION => {
                record.window_start = now;
                record.count = 1;
                Decision::Allow
            }
            Some(record) => {
                record.count += 1;
                if record.count > MAX_REQUESTS {
                    debug!(identifier = %identifier, count = record.count, "Admission denied");
                    Decision::Deny
                } else {
                    Decision::Allow
                }
            }
        }
    }

    /// Remove every record whose window has expired as of `now`.
    ///
    /// Not required for `check` correctness; purely memory housekeeping.
    pub fn sweep(&self, now: Instant) {
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|_, record| now.duration_since(record.window_start) <= WINDOW_DURATION);
        let evicted = before - store.len();
        if evicted > 0 {
            debug!(evicted = evicted, remaining = store.len(), "Swept expired caller records");
        }
    }

    /// Number of callers currently tracked.
    pub fn tracked_callers(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned handle for the background sweep task. Dropping it aborts the task,
/// so the timer cannot outlive the limiter's owner.
pub struct SweeperHandle {
    task: tokio::task::JoinHandle<()>,
}

impl Drop for SweeperHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the periodic sweep on a fixed `WINDOW_DURATION` interval.
pub fn spawn_sweeper(limiter: Arc<RateLimiter>) -> SweeperHandle {
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(WINDOW_DURATION);
        // The first tick completes immediately; skip it so the initial sweep
        // runs one full window after startup.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            limiter.sweep(Instant::now());
        }
    });
    info!("Started admission limiter sweep task");
    SweeperHandle { task }
}
