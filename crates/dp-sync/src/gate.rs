//! The admission gate (arbitrator).
//!
//! A bounded counting gate of capacity N−1.  The arbitrated policy requires
//! an agent to `admit()` before reaching for either fork and to depart only
//! after both are back on the table.  With at most N−1 agents past the gate
//! at once, at least one admitted agent always finds both of its forks
//! takeable, so the full circular hold-and-wait chain can never form — this
//! is the deadlock-avoidance invariant.

use std::sync::{Condvar, Mutex, MutexGuard};

use dp_core::StopToken;

use crate::{SyncError, SyncResult, STOP_POLL};

// ── TableGate ─────────────────────────────────────────────────────────────────

/// Bounded admission gate.  Blocks admitters once `seats` agents are inside.
pub struct TableGate {
    seats: usize,
    admitted: Mutex<usize>,
    vacated: Condvar,
}

impl TableGate {
    /// Gate with capacity `seats`.  For an N-agent table pass
    /// [`for_agents(n)`][TableGate::for_agents] instead.
    pub fn new(seats: usize) -> Self {
        Self {
            seats,
            admitted: Mutex::new(0),
            vacated: Condvar::new(),
        }
    }

    /// The standard capacity for an `n`-agent table: N−1.
    pub fn for_agents(n: usize) -> Self {
        Self::new(n.saturating_sub(1))
    }

    pub fn seats(&self) -> usize {
        self.seats
    }

    /// How many agents are currently past the gate.
    pub fn admitted(&self) -> usize {
        *self.lock_admitted()
    }

    /// Block until a seat is free, then take it.
    ///
    /// The returned [`AdmitGuard`] departs on drop, waking one blocked
    /// admitter.  Stop-token aware like [`Fork::acquire`][crate::Fork::acquire].
    pub fn admit(&self, stop: &StopToken) -> SyncResult<AdmitGuard<'_>> {
        let mut admitted = self.lock_admitted();
        loop {
            if stop.is_stopped() {
                return Err(SyncError::Stopped);
            }
            if *admitted < self.seats {
                *admitted += 1;
                return Ok(AdmitGuard { gate: self });
            }
            let (guard, _timeout) = self
                .vacated
                .wait_timeout(admitted, STOP_POLL)
                .unwrap_or_else(|e| e.into_inner());
            admitted = guard;
        }
    }

    fn depart(&self) {
        let mut admitted = self.lock_admitted();
        *admitted = admitted.saturating_sub(1);
        self.vacated.notify_one();
    }

    fn lock_admitted(&self) -> MutexGuard<'_, usize> {
        self.admitted.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ── AdmitGuard ────────────────────────────────────────────────────────────────

/// Scoped admission; departs on drop.
#[must_use = "dropping the guard is what releases the seat"]
pub struct AdmitGuard<'a> {
    gate: &'a TableGate,
}

impl Drop for AdmitGuard<'_> {
    fn drop(&mut self) {
        self.gate.depart();
    }
}
