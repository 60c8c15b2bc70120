//! Parking primitives for the execution thread and for joining owners.

use parking_lot::{Condvar, Mutex};

/// The suspension gate: a mutex-protected condition variable the execution
/// thread parks on while the worker is stopped.
///
/// Lost-wakeup discipline: callers mutate the lifecycle flags *before*
/// calling [`signal`](Self::signal), and the parked thread re-checks its
/// predicate under the gate lock after every wake. `signal` takes the same
/// lock, so it cannot slip between a waiter's predicate check and its wait.
#[derive(Debug, Default)]
pub(crate) struct SuspensionGate {
    lock: Mutex<()>,
    parked: Condvar,
}

impl SuspensionGate {
    /// Block the calling thread until `ready` returns true, re-checking it
    /// under the gate lock after every wake (spurious or signaled).
    pub fn park_until(&self, ready: impl Fn() -> bool) {
        let mut guard = self.lock.lock();
        while !ready() {
            self.parked.wait(&mut guard);
        }
    }

    /// Wake any parked thread. Callable from any thread; safe with nothing
    /// parked.
    pub fn signal(&self) {
        let _guard = self.lock.lock();
        self.parked.notify_all();
    }
}

/// A one-shot completion latch opened by the execution thread when it has
/// fully exited. Any number of joining owner threads may wait on it.
#[derive(Debug, Default)]
pub(crate) struct CompletionLatch {
    done: Mutex<bool>,
    released: Condvar,
}

impl CompletionLatch {
    /// Open the latch, releasing all current and future waiters. Idempotent.
    pub fn open(&self) {
        let mut done = self.done.lock();
        *done = true;
        self.released.notify_all();
    }

    /// Block until the latch is opened. Returns immediately if already open.
    pub fn wait(&self) {
        let mut done = self.done.lock();
        while !*done {
            self.released.wait(&mut done);
        }
    }
}
