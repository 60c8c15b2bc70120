use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::state_machine::WorkerState;
use crate::worker::WorkFailure;

/// A lifecycle event delivered to registered listeners.
#[derive(Debug, Clone)]
pub struct WorkerEvent {
    /// Identity of the originating worker.
    pub worker_id: Uuid,
    /// Human-readable name of the originating worker.
    pub worker_name: String,
    /// Lifecycle state at the time the event was built.
    pub state: WorkerState,
    /// The captured terminating failure, present on failure events.
    pub failure: Option<Arc<WorkFailure>>,
    /// When the event was published.
    pub occurred_at: DateTime<Utc>,
}

/// Observer of worker lifecycle events.
///
/// Callbacks are invoked synchronously on the worker's execution thread: a
/// slow or blocking listener stalls that worker. Both methods default to
/// no-ops so a listener may implement only the event it cares about.
pub trait WorkerListener: Send + Sync {
    /// The worker entered the stopped state; its execution thread is about
    /// to park.
    fn on_stopped(&self, _event: &WorkerEvent) {}

    /// An unhandled failure was captured; the worker is about to terminate.
    fn on_failure(&self, _event: &WorkerEvent) {}
}
