use thiserror::Error;

/// Errors surfaced to owner threads through the lifecycle control surface.
///
/// Failures raised by hooks on the execution thread never appear here; they
/// are captured as a [`crate::worker::WorkFailure`] and surfaced only through
/// the observer channel and [`crate::Worker::terminating_failure`].
#[derive(Debug, Error)]
pub enum WorkerError {
    /// `start()` was called on a terminated worker. The worker is unaffected
    /// and remains terminated.
    #[error("worker is terminated and cannot be started again")]
    AlreadyTerminated,

    /// The operating system refused to spawn the execution thread.
    #[error("failed to spawn execution thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// An owner thread blocked in `join`/`terminate_and_wait` was released
    /// abnormally because the execution thread panicked.
    #[error("wait for execution thread was interrupted: {0}")]
    InterruptedWait(String),

    /// A numeric thread priority outside the accepted 1..=10 range.
    #[error("not a valid thread priority value: {0} (expected 1..=10)")]
    InvalidPriority(u8),
}

pub type Result<T> = std::result::Result<T, WorkerError>;
