//! Blocking FIFO for handing items from a producer to an async consumer.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::linked_list::LinkedList;

/// Unbounded FIFO whose [`take`](Queue::take) suspends while it is empty.
///
/// [`give`](Queue::give) never blocks. Every `give` wakes all suspended
/// takers; each of them re-checks the list and only the first to find an
/// item consumes it, the others go back to waiting. Wakeups are never lost,
/// but there is no fairness between concurrent takers.
pub struct Queue<T> {
    items: Mutex<LinkedList<T>>,
    arrival: Notify,
}

impl<T> Queue<T> {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(LinkedList::new()),
            arrival: Notify::new(),
        }
    }

    /// Appends `item` and wakes every pending [`take`](Queue::take).
    pub fn give(&self, item: T) {
        self.items().push_back(item);
        self.arrival.notify_waiters();
    }

    /// Waits until an item is available, then removes and returns it.
    pub async fn take(&self) -> T {
        loop {
            // Register for the next arrival before looking, so a `give` that
            // lands between the check and the await still wakes us.
            let arrival = self.arrival.notified();
            tokio::pin!(arrival);
            arrival.as_mut().enable();

            if let Some(item) = self.try_take() {
                return item;
            }
            arrival.await;
        }
    }

    /// Removes the head item without waiting.
    pub fn try_take(&self) -> Option<T> {
        let mut items = self.items();
        if items.is_empty() {
            return None;
        }
        items.pop_front().ok()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    fn items(&self) -> MutexGuard<'_, LinkedList<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}
