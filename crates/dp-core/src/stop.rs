//! Cooperative cancellation.
//!
//! A [`StopToken`] is cloned into every agent thread and checked at each
//! suspension point (before admission, before each fork acquire, during
//! timed think/eat sleeps).  Cancellation never preempts: an agent unwinds
//! only from a point where it holds no resource it has not yet released,
//! so stopping a run can never leave a fork held.

use std::sync::{Arc, Condvar, Mutex};
use std::time::{Duration, Instant};

/// Shared cancellation flag with condvar wakeup for timed sleeps.
#[derive(Clone, Default)]
pub struct StopToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation and wake every sleeper.
    pub fn stop(&self) {
        let (flag, wake) = &*self.inner;
        // A poisoned lock means a panicked sleeper; the flag itself is still
        // a valid bool, so recover the guard and proceed.
        let mut stopped = flag.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        wake.notify_all();
    }

    /// Has cancellation been requested?
    pub fn is_stopped(&self) -> bool {
        let (flag, _) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep for `d`, waking early if cancellation is requested.
    ///
    /// Returns `true` if the full duration elapsed, `false` if interrupted.
    pub fn sleep_for(&self, d: Duration) -> bool {
        let (flag, wake) = &*self.inner;
        let deadline = Instant::now() + d;
        let mut stopped = flag.lock().unwrap_or_else(|e| e.into_inner());
        while !*stopped {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            let (guard, _timeout) = wake
                .wait_timeout(stopped, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            stopped = guard;
        }
        false
    }
}
