//! Shared fixtures: a hook-recording work provider and event-capturing
//! listeners.
#![allow(dead_code)]

use crossbeam::channel::{unbounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::{Duration, Instant};

use managed_thread::{HookError, HookStage, WorkProvider, WorkerEvent, WorkerListener};

/// Ordered record of hook invocations. Consecutive duplicate entries are
/// collapsed so a burst of work cycles reads as a single entry.
#[derive(Default)]
pub struct Journal {
    entries: Mutex<Vec<&'static str>>,
}

impl Journal {
    fn record(&self, name: &'static str) {
        let mut entries = self.entries.lock();
        if entries.last() != Some(&name) {
            entries.push(name);
        }
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.entries.lock().clone()
    }

    pub fn count(&self, name: &'static str) -> usize {
        self.entries.lock().iter().filter(|e| **e == name).count()
    }
}

/// Test-side view into a [`RecordingProvider`] that moved onto the
/// execution thread.
#[derive(Clone)]
pub struct Probe {
    pub journal: Arc<Journal>,
    pub cycles: Arc<AtomicUsize>,
    pub run_threads: Arc<Mutex<Vec<ThreadId>>>,
}

/// Work provider recording every hook invocation, optionally failing at a
/// chosen stage.
pub struct RecordingProvider {
    journal: Arc<Journal>,
    cycles: Arc<AtomicUsize>,
    run_threads: Arc<Mutex<Vec<ThreadId>>>,
    fail_stage: Option<HookStage>,
    fail_after_cycles: usize,
}

impl RecordingProvider {
    pub fn new() -> (Self, Probe) {
        Self::build(None, 0)
    }

    /// Fail the given stage on its first invocation.
    pub fn failing(stage: HookStage) -> (Self, Probe) {
        Self::build(Some(stage), 1)
    }

    /// Fail `work_cycle` once `cycles` invocations have happened.
    pub fn failing_after_cycles(cycles: usize) -> (Self, Probe) {
        Self::build(Some(HookStage::WorkCycle), cycles)
    }

    fn build(fail_stage: Option<HookStage>, fail_after_cycles: usize) -> (Self, Probe) {
        let journal = Arc::new(Journal::default());
        let cycles = Arc::new(AtomicUsize::new(0));
        let run_threads = Arc::new(Mutex::new(Vec::new()));
        let probe = Probe {
            journal: Arc::clone(&journal),
            cycles: Arc::clone(&cycles),
            run_threads: Arc::clone(&run_threads),
        };
        (
            Self {
                journal,
                cycles,
                run_threads,
                fail_stage,
                fail_after_cycles,
            },
            probe,
        )
    }

    fn hook(&self, stage: HookStage) -> Result<(), HookError> {
        self.journal.record(stage.as_str());
        if self.fail_stage == Some(stage) {
            return Err(format!("induced {stage} failure").into());
        }
        Ok(())
    }
}

impl WorkProvider for RecordingProvider {
    fn before_execute(&mut self) -> Result<(), HookError> {
        self.hook(HookStage::BeforeExecute)
    }

    fn before_run(&mut self) -> Result<(), HookError> {
        self.run_threads.lock().push(std::thread::current().id());
        self.hook(HookStage::BeforeRun)
    }

    fn work_cycle(&mut self) -> Result<(), HookError> {
        self.journal.record(HookStage::WorkCycle.as_str());
        let done = self.cycles.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_stage == Some(HookStage::WorkCycle) && done >= self.fail_after_cycles {
            return Err(format!("induced failure on cycle {done}").into());
        }
        std::thread::sleep(Duration::from_millis(1));
        Ok(())
    }

    fn after_run(&mut self) -> Result<(), HookError> {
        self.hook(HookStage::AfterRun)
    }

    fn cleanup(&mut self) -> Result<(), HookError> {
        self.hook(HookStage::Cleanup)
    }

    fn after_execute(&mut self) -> Result<(), HookError> {
        self.hook(HookStage::AfterExecute)
    }
}

/// Listener counting deliveries and keeping the last event of each kind.
#[derive(Default)]
pub struct CountingListener {
    pub stopped: AtomicUsize,
    pub failures: AtomicUsize,
    pub last_failure_event: Mutex<Option<WorkerEvent>>,
}

impl WorkerListener for CountingListener {
    fn on_stopped(&self, _event: &WorkerEvent) {
        self.stopped.fetch_add(1, Ordering::SeqCst);
    }

    fn on_failure(&self, event: &WorkerEvent) {
        self.failures.fetch_add(1, Ordering::SeqCst);
        *self.last_failure_event.lock() = Some(event.clone());
    }
}

/// Listener forwarding events over a channel so tests can block on delivery
/// instead of polling.
pub struct ChannelListener {
    sender: Sender<(&'static str, WorkerEvent)>,
}

impl ChannelListener {
    pub fn pair() -> (Arc<Self>, Receiver<(&'static str, WorkerEvent)>) {
        let (sender, receiver) = unbounded();
        (Arc::new(Self { sender }), receiver)
    }
}

impl WorkerListener for ChannelListener {
    fn on_stopped(&self, event: &WorkerEvent) {
        let _ = self.sender.send(("stopped", event.clone()));
    }

    fn on_failure(&self, event: &WorkerEvent) {
        let _ = self.sender.send(("failure", event.clone()));
    }
}

/// Poll `pred` until it holds or the timeout elapses.
pub fn wait_for(timeout: Duration, mut pred: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if pred() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
}
