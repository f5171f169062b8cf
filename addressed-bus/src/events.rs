//! Listener registry for delivered messages.

use std::{
    panic::{self, AssertUnwindSafe},
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use tracing::warn;

use crate::envelope::Delivery;

/// Handle returned by [`Listeners::add`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Arc<dyn Fn(&Delivery) + Send + Sync>;

/// Ordered set of callbacks invoked for every delivered message.
#[derive(Default)]
pub struct Listeners {
    entries: Mutex<Vec<(ListenerId, Callback)>>,
    next_id: AtomicU64,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&Delivery) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.entries().push((id, Arc::new(listener)));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries();
        let before = entries.len();
        entries.retain(|(entry, _)| *entry != id);
        entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// Calls every listener with `delivery`, in registration order.
    ///
    /// The registry is not locked while listeners run, so a listener may add
    /// or remove listeners; such changes apply from the next dispatch. A
    /// listener that panics is logged and skipped; the rest still run.
    pub fn dispatch(&self, delivery: &Delivery) {
        let snapshot: Vec<(ListenerId, Callback)> = self
            .entries()
            .iter()
            .map(|(id, callback)| (*id, Arc::clone(callback)))
            .collect();

        for (id, callback) in snapshot {
            if panic::catch_unwind(AssertUnwindSafe(|| callback(delivery))).is_err() {
                warn!(
                    listener = id.0,
                    command = %delivery.envelope.command,
                    "listener panicked; continuing with the next one"
                );
            }
        }
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(ListenerId, Callback)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
