/// Outstanding-task accounting
use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic counter of submitted-but-not-yet-executing tasks
///
/// Observational only: nothing reads it to gate admission, and it never
/// blocks. A task increments on submission and decrements when a worker
/// picks it up, so the value is the depth of the queue as an external
/// observer would define it.
#[derive(Debug, Default)]
pub struct TaskCounter {
    queued: AtomicUsize,
}

impl TaskCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a task joining the queue
    pub fn increment(&self) {
        self.queued.fetch_add(1, Ordering::SeqCst);
    }

    /// Record a task leaving the queue for execution
    ///
    /// Returns true when this decrement emptied the queue.
    pub fn decrement_and_test(&self) -> bool {
        self.queued.fetch_sub(1, Ordering::SeqCst) == 1
    }

    /// Tasks submitted but not yet picked up by a worker
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_up_and_down() {
        let counter = TaskCounter::new();
        assert_eq!(counter.queued(), 0);

        counter.increment();
        counter.increment();
        assert_eq!(counter.queued(), 2);

        assert!(!counter.decrement_and_test());
        assert!(counter.decrement_and_test());
        assert_eq!(counter.queued(), 0);
    }
}
