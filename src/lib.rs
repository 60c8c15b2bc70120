#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Managed Thread
//!
//! Managed worker threads: a wrapper around a native execution thread adding
//! a controlled lifecycle (stopped → running → terminated), pluggable
//! pre/post hooks around each execution cycle, observer notification on
//! state changes and unhandled failures, and cooperative suspend/resume
//! without thread destruction.
//!
//! ## Architecture
//!
//! Each [`Worker`] binds exactly one logical unit of repeating work to
//! exactly one dedicated execution thread for that worker's entire life.
//! Three cooperating parts implement the lifecycle:
//!
//! - the **lifecycle state machine** — the shared stopped/terminated flags
//!   and the transition rules behind `start`, `stop`, and `terminate`;
//! - the **suspension gate** — the condition-variable primitive the
//!   execution thread parks on while stopped, with a strict
//!   re-check-after-waking discipline against lost wakeups;
//! - the **execution loop** — the thread body driving the
//!   [`WorkProvider`](worker::WorkProvider) hook sequence and turning any
//!   unhandled hook failure into a captured terminating failure, an observer
//!   notification, and forced termination.
//!
//! This is not a thread pool and not a task scheduler: no load balancing,
//! no work queue, no async suspension. Stop and terminate requests are
//! cooperative and take effect between work cycles.
//!
//! ## Module Organization
//!
//! - [`worker`] - The [`Worker`] surface, suspension gate, and hook contract
//! - [`state_machine`] - Lifecycle states, stop modes, and the shared flags
//! - [`events`] - Listener contract and snapshot-on-notify registry
//! - [`config`] - Construction-time policy (name, stop mode, priority)
//! - [`error`] - Structured error handling
//! - [`logging`] - Optional tracing setup for embedding binaries
//!
//! ## Quick Start
//!
//! ```rust
//! use managed_thread::{from_fn, StopMode, Worker, WorkerConfig};
//!
//! # fn main() -> Result<(), managed_thread::WorkerError> {
//! let config = WorkerConfig::named("heartbeat").with_stop_mode(StopMode::Suspend);
//! let worker = Worker::new(
//!     config,
//!     from_fn(|| {
//!         std::thread::sleep(std::time::Duration::from_millis(1));
//!         Ok(())
//!     }),
//! );
//!
//! worker.start()?; // spawns the execution thread
//! worker.stop(); // suspends it without destroying it
//! worker.start()?; // resumes the same thread
//! worker.terminate_and_wait()?; // terminal; start() would now fail
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Model
//!
//! A failure escaping any hook never reaches the caller of a lifecycle
//! method. It is captured once as the worker's
//! [`terminating_failure`](Worker::terminating_failure), published to
//! listeners as a failure event, and terminates the worker. Recoverable
//! errors belong inside the work cycle itself; the framework has no retry
//! policy.

pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod state_machine;
pub mod worker;

pub use config::{Priority, WorkerConfig};
pub use error::{Result, WorkerError};
pub use events::{WorkerEvent, WorkerListener};
pub use logging::init_logging;
pub use state_machine::{StopMode, WorkerState};
pub use worker::{from_fn, HookError, HookStage, WorkFailure, WorkProvider, Worker};
