use parking_lot::Mutex;
use std::sync::Arc;

use super::listener::{WorkerEvent, WorkerListener};

/// The set of registered listeners for one worker.
///
/// Notification takes a snapshot of the current set under the lock and
/// invokes each listener outside it, so registration and removal from any
/// thread during an in-flight pass never affect that pass and never block
/// behind a slow listener.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn WorkerListener>>>,
}

impl ListenerRegistry {
    /// Register a listener. Registering the same `Arc` twice is a no-op.
    pub fn add(&self, listener: Arc<dyn WorkerListener>) {
        let mut listeners = self.listeners.lock();
        if !listeners.iter().any(|known| Arc::ptr_eq(known, &listener)) {
            listeners.push(listener);
        }
    }

    /// Deregister a listener by `Arc` identity. Takes effect for future
    /// notification passes only.
    pub fn remove(&self, listener: &Arc<dyn WorkerListener>) {
        self.listeners
            .lock()
            .retain(|known| !Arc::ptr_eq(known, listener));
    }

    pub fn notify_stopped(&self, event: &WorkerEvent) {
        for listener in self.snapshot() {
            listener.on_stopped(event);
        }
    }

    pub fn notify_failure(&self, event: &WorkerEvent) {
        for listener in self.snapshot() {
            listener.on_failure(event);
        }
    }

    fn snapshot(&self) -> Vec<Arc<dyn WorkerListener>> {
        self.listeners.lock().clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.listeners.lock().len()
    }
}
