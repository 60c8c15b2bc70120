//! The work provider contract: the six hooks driven by the execution loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Failure type hooks report through. Anything convertible into a boxed
/// error works, including plain `&str`/`String` via `.into()`.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The collaborator supplying the worker's actual behavior.
///
/// Every hook defaults to a no-op, so implementors override only what they
/// need. [`work_cycle`](Self::work_cycle) is expected to perform one bounded
/// unit of work and return; the execution loop calls it repeatedly for as
/// long as the worker is running, observing stop/terminate requests between
/// calls. A provider that loops internally defeats cooperative suspension.
///
/// Recoverable errors belong inside `work_cycle`: any error returned from a
/// hook is treated as unhandled, captured once, published to observers, and
/// terminates the worker. There is no retry policy in the framework.
pub trait WorkProvider: Send {
    /// Runs once when the execution thread starts, before any run cycle.
    fn before_execute(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs at the start of each run cycle, before the first work cycle.
    fn before_run(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// One bounded unit of work, invoked repeatedly while running.
    fn work_cycle(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Runs when a run cycle's work loop exits, including on a work failure.
    /// Skipped if `before_run` itself failed.
    fn after_run(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Guaranteed finalizer for one run cycle; runs however the cycle exited.
    fn cleanup(&mut self) -> Result<(), HookError> {
        Ok(())
    }

    /// Outermost finalizer; runs exactly once when the execution thread ends,
    /// whether the loop ended normally or through failure propagation.
    fn after_execute(&mut self) -> Result<(), HookError> {
        Ok(())
    }
}

/// Which hook a failure escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStage {
    BeforeExecute,
    BeforeRun,
    WorkCycle,
    AfterRun,
    Cleanup,
    AfterExecute,
}

impl HookStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeExecute => "before_execute",
            Self::BeforeRun => "before_run",
            Self::WorkCycle => "work_cycle",
            Self::AfterRun => "after_run",
            Self::Cleanup => "cleanup",
            Self::AfterExecute => "after_execute",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An unhandled failure captured by the execution loop, tagged with the hook
/// stage it escaped from.
///
/// This is the worker's single terminal failure slot: set at most once, never
/// re-raised to callers of lifecycle methods, observable only through the
/// failure event and [`crate::Worker::terminating_failure`].
#[derive(Debug, Error)]
#[error("{stage} hook failed: {source}")]
pub struct WorkFailure {
    stage: HookStage,
    #[source]
    source: HookError,
}

impl WorkFailure {
    pub(crate) fn new(stage: HookStage, source: HookError) -> Self {
        Self { stage, source }
    }

    /// The hook stage the failure escaped from.
    pub fn stage(&self) -> HookStage {
        self.stage
    }

    /// The underlying error reported by the hook.
    pub fn source_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Adapt a closure into a [`WorkProvider`] whose `work_cycle` is the closure.
/// All other hooks keep their no-op defaults.
pub fn from_fn<F>(work_cycle: F) -> FnProvider<F>
where
    F: FnMut() -> Result<(), HookError> + Send,
{
    FnProvider { work_cycle }
}

/// Closure-backed work provider returned by [`from_fn`].
pub struct FnProvider<F> {
    work_cycle: F,
}

impl<F> WorkProvider for FnProvider<F>
where
    F: FnMut() -> Result<(), HookError> + Send,
{
    fn work_cycle(&mut self) -> Result<(), HookError> {
        (self.work_cycle)()
    }
}
