// Event system for worker lifecycle observation
//
// Listeners are notified synchronously on the execution thread, from a
// snapshot of the registered set taken under the registry lock.

pub mod listener;

pub(crate) mod registry;

pub use listener::{WorkerEvent, WorkerListener};

pub(crate) use registry::ListenerRegistry;
