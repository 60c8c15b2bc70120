// State machine module for the managed worker lifecycle
//
// Owns the {Stopped, Running, Terminated} state, the stop-mode policy, and
// the atomic flag pair shared between owner threads and the execution thread.

pub mod states;

pub(crate) mod lifecycle;

// Re-export main types for convenient access
pub use states::{StopMode, WorkerState};

pub(crate) use lifecycle::LifecycleFlags;
