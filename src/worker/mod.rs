// Worker module: the managed entity binding one lifecycle to one execution
// thread, plus the suspension primitives and the work provider contract.

pub mod hooks;

pub(crate) mod gate;
pub(crate) mod run_loop;

pub use hooks::{from_fn, FnProvider, HookError, HookStage, WorkFailure, WorkProvider};

use chrono::Utc;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread::{self, JoinHandle};
use uuid::Uuid;

use crate::config::{Priority, WorkerConfig};
use crate::error::{Result, WorkerError};
use crate::events::{ListenerRegistry, WorkerEvent, WorkerListener};
use crate::state_machine::{LifecycleFlags, StopMode, WorkerState};
use gate::{CompletionLatch, SuspensionGate};
use run_loop::ExecutionLoop;

/// State shared between the owning side and the execution thread.
pub(crate) struct WorkerCore {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) flags: LifecycleFlags,
    pub(crate) gate: SuspensionGate,
    pub(crate) latch: CompletionLatch,
    listeners: ListenerRegistry,
    failure: OnceLock<Arc<WorkFailure>>,
}

impl WorkerCore {
    fn new(id: Uuid, name: String) -> Self {
        Self {
            id,
            name,
            flags: LifecycleFlags::default(),
            gate: SuspensionGate::default(),
            latch: CompletionLatch::default(),
            listeners: ListenerRegistry::default(),
            failure: OnceLock::new(),
        }
    }

    fn event(&self) -> WorkerEvent {
        WorkerEvent {
            worker_id: self.id,
            worker_name: self.name.clone(),
            state: self.flags.state(),
            failure: self.failure.get().cloned(),
            occurred_at: Utc::now(),
        }
    }

    /// Terminate unconditionally and wake a parked execution thread so it can
    /// observe the terminal state and exit. Idempotent.
    pub(crate) fn terminate(&self) {
        if self.flags.mark_terminated() {
            tracing::debug!(worker_id = %self.id, worker_name = %self.name, "worker terminated");
        }
        self.gate.signal();
    }

    /// Publish the stopped event to the current listener snapshot.
    pub(crate) fn publish_stopped(&self) {
        self.listeners.notify_stopped(&self.event());
    }

    /// Capture the terminating failure (first one wins), publish the failure
    /// event, then force termination. The only path by which an unhandled
    /// failure becomes visible outside the execution thread.
    pub(crate) fn record_failure(&self, failure: WorkFailure) {
        tracing::error!(
            worker_id = %self.id,
            worker_name = %self.name,
            stage = %failure.stage(),
            error = %failure,
            "unhandled failure, terminating worker"
        );
        let _ = self.failure.set(Arc::new(failure));
        self.listeners.notify_failure(&self.event());
        self.terminate();
    }
}

/// A managed worker: one logical unit of repeating work bound to one
/// dedicated execution thread for its entire life.
///
/// Constructed stopped; [`start`](Self::start) lazily spawns the execution
/// thread on first call and resumes a suspended one afterwards. Whether
/// [`stop`](Self::stop) suspends or terminates is fixed at construction by
/// [`StopMode`]. Termination is cooperative: a work cycle in progress runs to
/// completion and the request takes effect at the next check point; there is
/// no hard kill.
///
/// All lifecycle methods may be called from any thread. Dropping a worker
/// terminates it so a suspended execution thread is not leaked parked; drop
/// does not wait for the thread to exit.
pub struct Worker {
    core: Arc<WorkerCore>,
    stop_mode: StopMode,
    priority: Priority,
    provider: Mutex<Option<Box<dyn WorkProvider>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    launched: AtomicBool,
}

impl Worker {
    pub fn new<P>(config: WorkerConfig, provider: P) -> Self
    where
        P: WorkProvider + 'static,
    {
        let id = Uuid::new_v4();
        Self {
            core: Arc::new(WorkerCore::new(id, config.name)),
            stop_mode: config.stop_mode,
            priority: config.priority,
            provider: Mutex::new(Some(Box::new(provider))),
            handle: Mutex::new(None),
            launched: AtomicBool::new(false),
        }
    }

    /// Start or resume the worker.
    ///
    /// Fails with [`WorkerError::AlreadyTerminated`] on a terminated worker:
    /// calling `start` after termination is a programming error and is
    /// reported rather than silently ignored. The first successful call
    /// spawns the execution thread; the thread is created at most once per
    /// worker and later calls wake it through the suspension gate instead.
    pub fn start(&self) -> Result<()> {
        if self.core.flags.is_terminated() {
            return Err(WorkerError::AlreadyTerminated);
        }

        let mut handle = self.handle.lock();
        if let Some(provider) = self.provider.lock().take() {
            // Clear the stopped flag before spawning so the loop cannot
            // observe the initial stopped state and park with nobody left to
            // signal the gate.
            self.core.flags.mark_running();
            tracing::debug!(
                worker_id = %self.core.id,
                worker_name = %self.core.name,
                priority = %self.priority,
                "spawning execution thread"
            );
            let core = Arc::clone(&self.core);
            let thread = thread::Builder::new()
                .name(self.core.name.clone())
                .spawn(move || ExecutionLoop::new(core, provider).run())?;
            self.launched.store(true, Ordering::SeqCst);
            *handle = Some(thread);
        } else {
            // Flag first, then signal: the gate predicate re-checks the flag
            // under the gate lock, so this order cannot lose the wakeup.
            self.core.flags.mark_running();
            self.core.gate.signal();
        }
        Ok(())
    }

    /// Stop the worker according to its stop mode: terminate it, or suspend
    /// its execution thread without destroying it. No-op when already stopped
    /// or terminated.
    ///
    /// A `start()` racing with an in-flight `stop()` under suspend mode may
    /// land on either side of it; the execution thread's re-checks make both
    /// outcomes safe. This relaxed window is part of the contract.
    pub fn stop(&self) {
        if self.core.flags.is_stopped() {
            return;
        }
        match self.stop_mode {
            StopMode::Terminate => self.terminate(),
            StopMode::Suspend => {
                tracing::debug!(
                    worker_id = %self.core.id,
                    worker_name = %self.core.name,
                    "worker stop requested"
                );
                self.core.flags.mark_stopped();
            }
        }
    }

    /// Unconditionally and immediately drive the worker to its terminal
    /// state, waking a parked execution thread so it can exit. Idempotent.
    pub fn terminate(&self) {
        self.core.terminate();
    }

    /// [`terminate`](Self::terminate), then block until the execution thread
    /// has fully exited (its outermost finalizer included).
    pub fn terminate_and_wait(&self) -> Result<()> {
        self.terminate();
        self.join()
    }

    /// Block until the execution thread exits. Returns immediately if it was
    /// never launched. Safe to call from several owner threads at once; a
    /// panicking execution thread surfaces as
    /// [`WorkerError::InterruptedWait`].
    pub fn join(&self) -> Result<()> {
        if !self.launched.load(Ordering::SeqCst) {
            return Ok(());
        }
        let taken = self.handle.lock().take();
        match taken {
            Some(handle) => handle
                .join()
                .map_err(|payload| WorkerError::InterruptedWait(panic_message(&payload))),
            // Another owner holds the join handle; wait on the exit latch,
            // which the execution thread opens as its very last act.
            None => {
                self.core.latch.wait();
                Ok(())
            }
        }
    }

    /// Register a lifecycle listener. Registering the same `Arc` twice is a
    /// no-op; registration during an in-flight notification affects only
    /// future notifications.
    pub fn add_listener(&self, listener: Arc<dyn WorkerListener>) {
        self.core.listeners.add(listener);
    }

    /// Deregister a listener by `Arc` identity; an in-flight notification
    /// pass is unaffected.
    pub fn remove_listener(&self, listener: &Arc<dyn WorkerListener>) {
        self.core.listeners.remove(listener);
    }

    pub fn id(&self) -> Uuid {
        self.core.id
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn stop_mode(&self) -> StopMode {
        self.stop_mode
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn is_stopped(&self) -> bool {
        self.core.flags.is_stopped()
    }

    pub fn is_terminated(&self) -> bool {
        self.core.flags.is_terminated()
    }

    pub fn state(&self) -> WorkerState {
        self.core.flags.state()
    }

    /// The captured terminating failure: present if and only if some hook
    /// failed, absent when termination came from an explicit `stop` or
    /// `terminate`. Write-once.
    pub fn terminating_failure(&self) -> Option<Arc<WorkFailure>> {
        self.core.failure.get().cloned()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "execution thread panicked".to_string()
    }
}
