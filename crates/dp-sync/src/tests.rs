//! Unit tests for the fork ring and admission gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use dp_core::{AgentId, StopToken};

use crate::{ForkRing, SyncError, TableGate};

#[cfg(test)]
mod fork {
    use super::*;

    #[test]
    fn acquire_records_holder_and_drop_releases() {
        let ring = ForkRing::new(2);
        let stop = StopToken::new();

        let guard = ring.left(AgentId(0)).acquire(AgentId(0), &stop).unwrap();
        assert_eq!(ring.left(AgentId(0)).holder(), Some(AgentId(0)));
        drop(guard);
        assert_eq!(ring.left(AgentId(0)).holder(), None);
        assert!(ring.all_free());
    }

    #[test]
    fn ring_topology_wraps() {
        let ring = ForkRing::new(5);
        assert_eq!(ring.left(AgentId(0)).id().0, 0);
        assert_eq!(ring.right(AgentId(0)).id().0, 1);
        assert_eq!(ring.left(AgentId(4)).id().0, 4);
        assert_eq!(ring.right(AgentId(4)).id().0, 0);
        // Adjacent agents share exactly one fork.
        assert_eq!(ring.right(AgentId(1)).id(), ring.left(AgentId(2)).id());
    }

    #[test]
    fn stopped_acquire_does_not_take_the_fork() {
        let ring = ForkRing::new(2);
        let stop = StopToken::new();
        stop.stop();

        let err = ring.left(AgentId(0)).acquire(AgentId(0), &stop).unwrap_err();
        assert_eq!(err, SyncError::Stopped);
        assert!(ring.all_free());
    }

    #[test]
    fn stop_unblocks_a_contended_waiter() {
        let ring = Arc::new(ForkRing::new(2));
        let stop = StopToken::new();
        let held = ring.left(AgentId(0)).acquire(AgentId(0), &stop).unwrap();

        let waiter_ring = Arc::clone(&ring);
        let waiter_stop = stop.clone();
        let waiter = thread::spawn(move || {
            waiter_ring
                .left(AgentId(0))
                .acquire(AgentId(1), &waiter_stop)
                .map(|_| ())
        });

        thread::sleep(Duration::from_millis(30));
        stop.stop();
        assert_eq!(waiter.join().unwrap(), Err(SyncError::Stopped));
        drop(held);
    }

    /// Mutual exclusion under contention: many threads hammering one fork,
    /// an atomic "inside" counter must never exceed 1.
    #[test]
    fn mutual_exclusion_under_contention() {
        let ring = Arc::new(ForkRing::new(2));
        let stop = StopToken::new();
        let inside = Arc::new(AtomicUsize::new(0));
        let start = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let ring = Arc::clone(&ring);
                let stop = stop.clone();
                let inside = Arc::clone(&inside);
                let start = Arc::clone(&start);
                thread::spawn(move || {
                    start.wait();
                    for _ in 0..50 {
                        let guard = ring.left(AgentId(0)).acquire(AgentId(i), &stop).unwrap();
                        let now_inside = inside.fetch_add(1, Ordering::SeqCst) + 1;
                        assert_eq!(now_inside, 1, "two agents inside one fork");
                        inside.fetch_sub(1, Ordering::SeqCst);
                        drop(guard);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert!(ring.all_free());
    }

    /// The circular-wait precondition, forced deterministically: every agent
    /// holds exactly its left fork (barrier-synchronized, never timing
    /// dependent), so every right fork is held by the agent's neighbor and
    /// no right-fork acquire can succeed.  This is the naive policy's
    /// deadlock, reproduced at the primitive level.
    #[test]
    fn barrier_forced_circular_wait() {
        const N: usize = 5;
        let ring = Arc::new(ForkRing::new(N));
        let all_left_held = Arc::new(Barrier::new(N + 1));
        let release = Arc::new(Barrier::new(N + 1));
        let stop = StopToken::new();

        let handles: Vec<_> = (0..N)
            .map(|i| {
                let ring = Arc::clone(&ring);
                let all_left_held = Arc::clone(&all_left_held);
                let release = Arc::clone(&release);
                let stop = stop.clone();
                thread::spawn(move || {
                    let agent = AgentId(i as u32);
                    let _left = ring.left(agent).acquire(agent, &stop).unwrap();
                    all_left_held.wait();
                    // Main thread now verifies the cycle, then cancels.
                    let right = ring.right(agent).acquire(agent, &stop);
                    assert_eq!(right.err(), Some(SyncError::Stopped));
                    release.wait();
                })
            })
            .collect();

        all_left_held.wait();

        // Each fork is held by exactly the agent to its left — a full cycle.
        let holders = ring.holders();
        for (fork, holder) in holders.iter().enumerate() {
            assert_eq!(*holder, Some(AgentId(fork as u32)));
        }

        // No agent can take its right fork; cancellation is the only exit.
        stop.stop();
        release.wait();
        for h in handles {
            h.join().unwrap();
        }
        assert!(ring.all_free());
    }
}

#[cfg(test)]
mod gate {
    use super::*;

    #[test]
    fn capacity_is_agents_minus_one() {
        assert_eq!(TableGate::for_agents(5).seats(), 4);
        assert_eq!(TableGate::for_agents(2).seats(), 1);
    }

    #[test]
    fn admits_up_to_capacity_then_blocks() {
        let gate = Arc::new(TableGate::new(2));
        let stop = StopToken::new();

        let a = gate.admit(&stop).unwrap();
        let b = gate.admit(&stop).unwrap();
        assert_eq!(gate.admitted(), 2);

        // Third admitter blocks until a seat frees.
        let blocked_gate = Arc::clone(&gate);
        let blocked_stop = stop.clone();
        let blocked = thread::spawn(move || {
            let _c = blocked_gate.admit(&blocked_stop).unwrap();
            blocked_gate.admitted()
        });

        thread::sleep(Duration::from_millis(30));
        assert_eq!(gate.admitted(), 2, "third admitter got in early");
        drop(a);

        assert_eq!(blocked.join().unwrap(), 2);
        drop(b);
        assert_eq!(gate.admitted(), 0);
    }

    #[test]
    fn admitted_count_never_exceeds_capacity() {
        let gate = Arc::new(TableGate::new(3));
        let stop = StopToken::new();
        let start = Arc::new(Barrier::new(8));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let stop = stop.clone();
                let start = Arc::clone(&start);
                thread::spawn(move || {
                    start.wait();
                    for _ in 0..30 {
                        let guard = gate.admit(&stop).unwrap();
                        assert!(gate.admitted() <= 3);
                        drop(guard);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(gate.admitted(), 0);
    }

    #[test]
    fn stopped_admit_does_not_take_a_seat() {
        let gate = TableGate::for_agents(5);
        let stop = StopToken::new();
        stop.stop();
        assert_eq!(gate.admit(&stop).err(), Some(SyncError::Stopped));
        assert_eq!(gate.admitted(), 0);
    }
}
