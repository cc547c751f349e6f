//! Typed pool event notifications

use crate::handle::EntityHandle;

type HandleListener = Box<dyn Fn(EntityHandle) + Send + Sync>;
type SignalListener = Box<dyn Fn() + Send + Sync>;

/// Fire-and-forget observer lists, one per event kind.
///
/// Listeners are invoked synchronously in subscription order, after the
/// triggering mutation has completed, so a listener observes consistent pool
/// state through any shared snapshot it captured.
#[derive(Default)]
pub struct EventHub {
    initialized: Vec<SignalListener>,
    spawned: Vec<HandleListener>,
    returned: Vec<HandleListener>,
}

impl EventHub {
    /// Subscribe to the one-shot "pool initialized" signal emitted when an
    /// asynchronous population pass completes.
    pub fn on_pool_initialized<F>(&mut self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.initialized.push(Box::new(listener));
    }

    /// Subscribe to per-spawn notifications.
    pub fn on_entity_spawned<F>(&mut self, listener: F)
    where
        F: Fn(EntityHandle) + Send + Sync + 'static,
    {
        self.spawned.push(Box::new(listener));
    }

    /// Subscribe to per-release notifications, explicit or implicit.
    pub fn on_entity_returned<F>(&mut self, listener: F)
    where
        F: Fn(EntityHandle) + Send + Sync + 'static,
    {
        self.returned.push(Box::new(listener));
    }

    pub(crate) fn emit_initialized(&self) {
        for listener in &self.initialized {
            listener();
        }
    }

    pub(crate) fn emit_spawned(&self, handle: EntityHandle) {
        for listener in &self.spawned {
            listener(handle);
        }
    }

    pub(crate) fn emit_returned(&self, handle: EntityHandle) {
        for listener in &self.returned {
            listener(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_multiple_listeners_per_kind() {
        let mut hub = EventHub::default();
        let count = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let count = Arc::clone(&count);
            hub.on_entity_returned(move |_| {
                count.fetch_add(1, Ordering::Relaxed);
            });
        }

        hub.emit_returned(EntityHandle(7));
        assert_eq!(count.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_kinds_are_independent() {
        let mut hub = EventHub::default();
        let fired = Arc::new(AtomicUsize::new(0));

        let f = Arc::clone(&fired);
        hub.on_pool_initialized(move || {
            f.fetch_add(1, Ordering::Relaxed);
        });

        hub.emit_spawned(EntityHandle(1));
        hub.emit_returned(EntityHandle(1));
        assert_eq!(fired.load(Ordering::Relaxed), 0);

        hub.emit_initialized();
        assert_eq!(fired.load(Ordering::Relaxed), 1);
    }
}
