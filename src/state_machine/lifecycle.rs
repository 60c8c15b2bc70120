use std::sync::atomic::{AtomicBool, Ordering};

use super::states::WorkerState;

/// The concurrently-observed lifecycle flag pair.
///
/// The owner thread mutates these through the lifecycle control surface; the
/// execution thread reads them at every check point of its loop. They are
/// plain atomic flags rather than a lock-guarded state value: the loop always
/// re-checks them after waking from the suspension gate instead of trusting
/// the reason it was woken, so torn intermediate observations are harmless.
///
/// Both flags being set is the terminated encoding (`terminated` implies
/// `stopped`), matching the transition rule that termination passes through
/// the stopped state.
#[derive(Debug)]
pub(crate) struct LifecycleFlags {
    stopped: AtomicBool,
    terminated: AtomicBool,
}

impl Default for LifecycleFlags {
    fn default() -> Self {
        // Workers are constructed stopped; start() launches the thread.
        Self {
            stopped: AtomicBool::new(true),
            terminated: AtomicBool::new(false),
        }
    }
}

impl LifecycleFlags {
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Snapshot the externally visible state. `terminated` dominates so the
    /// terminal state is absorbing no matter how the flags were interleaved.
    pub fn state(&self) -> WorkerState {
        if self.is_terminated() {
            WorkerState::Terminated
        } else if self.is_stopped() {
            WorkerState::Stopped
        } else {
            WorkerState::Running
        }
    }

    /// Clear the stopped flag on the way to `Running`. Refused once
    /// terminated: the terminal state is absorbing.
    ///
    /// Returns whether the worker is (now) in a runnable state.
    pub fn mark_running(&self) -> bool {
        if self.is_terminated() {
            return false;
        }
        self.stopped.store(false, Ordering::SeqCst);
        true
    }

    /// Set the stopped flag. The execution thread observes this at its next
    /// check point and parks; the thread is not destroyed.
    pub fn mark_stopped(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Drive the flags to the terminal encoding. Idempotent; returns whether
    /// this call was the one that terminated the worker.
    pub fn mark_terminated(&self) -> bool {
        self.stopped.store(true, Ordering::SeqCst);
        !self.terminated.swap(true, Ordering::SeqCst)
    }
}
