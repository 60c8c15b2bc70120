//! The execution loop: the body of the dedicated execution thread.

use std::sync::Arc;

use super::hooks::{HookError, HookStage, WorkFailure, WorkProvider};
use super::WorkerCore;

/// Opens the completion latch when the thread body unwinds for any reason,
/// so joining owners are released even if a hook or listener panicked.
struct OpenLatchOnExit(Arc<WorkerCore>);

impl Drop for OpenLatchOnExit {
    fn drop(&mut self) {
        self.0.latch.open();
    }
}

/// Drives the hook sequence on the execution thread:
/// `before_execute`, then repeated run cycles until terminated (parking in
/// the suspension gate while stopped), then `after_execute`.
///
/// Any failure escaping a hook is captured as the worker's terminating
/// failure, published to observers, and forces termination; it is never
/// re-raised to a caller.
pub(crate) struct ExecutionLoop {
    core: Arc<WorkerCore>,
    provider: Box<dyn WorkProvider>,
}

impl ExecutionLoop {
    pub fn new(core: Arc<WorkerCore>, provider: Box<dyn WorkProvider>) -> Self {
        Self { core, provider }
    }

    pub fn run(mut self) {
        let _release_joiners = OpenLatchOnExit(Arc::clone(&self.core));

        let outcome = self.drive();
        // Outermost finalizer: runs whether the loop ended normally or not.
        let finished = self.call_hook(HookStage::AfterExecute, |p| p.after_execute());

        if let Err(failure) = outcome.and(finished) {
            self.core.record_failure(failure);
        }

        tracing::debug!(
            worker_id = %self.core.id,
            worker_name = %self.core.name,
            "execution thread exiting"
        );
    }

    fn drive(&mut self) -> Result<(), WorkFailure> {
        self.call_hook(HookStage::BeforeExecute, |p| p.before_execute())?;

        while !self.core.flags.is_terminated() {
            if self.core.flags.is_stopped() {
                self.core.publish_stopped();
                // A listener or a concurrent start() may already have resumed
                // or terminated the worker; only park if still stopped.
                if self.core.flags.is_stopped() {
                    if self.core.flags.is_terminated() {
                        break;
                    }
                    tracing::debug!(
                        worker_id = %self.core.id,
                        worker_name = %self.core.name,
                        "execution thread parking"
                    );
                    let flags = &self.core.flags;
                    self.core
                        .gate
                        .park_until(|| !flags.is_stopped() || flags.is_terminated());
                    // Never trust the reason for waking.
                    if self.core.flags.is_terminated() {
                        break;
                    }
                }
                continue;
            }

            self.run_cycle()?;
        }

        Ok(())
    }

    /// One run cycle: `before_run`, work cycles until stopped, `after_run`,
    /// and `cleanup` as the cycle's guaranteed finalizer. `after_run` still
    /// runs when a work cycle failed, but not when `before_run` itself
    /// failed. The first error of the cycle wins.
    fn run_cycle(&mut self) -> Result<(), WorkFailure> {
        let body = match self.call_hook(HookStage::BeforeRun, |p| p.before_run()) {
            Ok(()) => {
                let worked = self.work_until_stopped();
                let wound_down = self.call_hook(HookStage::AfterRun, |p| p.after_run());
                worked.and(wound_down)
            }
            Err(failure) => Err(failure),
        };

        let cleaned = self.call_hook(HookStage::Cleanup, |p| p.cleanup());
        body.and(cleaned)
    }

    /// The inner work loop. Stop and terminate requests take effect between
    /// work cycles; an invocation in progress always runs to completion.
    fn work_until_stopped(&mut self) -> Result<(), WorkFailure> {
        while !self.core.flags.is_stopped() {
            self.call_hook(HookStage::WorkCycle, |p| p.work_cycle())?;
        }
        Ok(())
    }

    fn call_hook<F>(&mut self, stage: HookStage, hook: F) -> Result<(), WorkFailure>
    where
        F: FnOnce(&mut dyn WorkProvider) -> Result<(), HookError>,
    {
        hook(self.provider.as_mut()).map_err(|source| WorkFailure::new(stage, source))
    }
}
