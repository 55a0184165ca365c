//! Minimal mutex-guarded FIFO shared by producers and workers.
//!
//! Correctness rests entirely on the lock serializing push/pop; there are
//! no lock-free tricks and no capacity bound. `try_pop` never blocks,
//! which is what lets workers interleave queue polling with the pool's
//! keep-alive check.

use std::collections::VecDeque;

use parking_lot::Mutex;

/// Unbounded first-in-first-out queue with interior locking.
#[derive(Debug, Default)]
pub struct FifoQueue<T> {
    items: Mutex<VecDeque<T>>,
}

impl<T> FifoQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
        }
    }

    /// Appends an item at the back. Returns as soon as the lock is released.
    pub fn push(&self, item: T) {
        self.items.lock().push_back(item);
    }

    /// Removes and returns the front item, or `None` if the queue is empty.
    /// Never blocks beyond lock contention.
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Snapshot of the current queue length.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Snapshot emptiness check.
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_pop_order_is_fifo() {
        let queue = FifoQueue::new();
        queue.push(1);
        queue.push(2);
        queue.push(3);

        assert_eq!(queue.try_pop(), Some(1));
        assert_eq!(queue.try_pop(), Some(2));
        assert_eq!(queue.try_pop(), Some(3));
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_try_pop_on_empty_returns_none() {
        let queue: FifoQueue<u32> = FifoQueue::new();
        assert_eq!(queue.try_pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_len_tracks_push_and_pop() {
        let queue = FifoQueue::new();
        assert_eq!(queue.len(), 0);

        queue.push("a");
        queue.push("b");
        assert_eq!(queue.len(), 2);

        queue.try_pop();
        assert_eq!(queue.len(), 1);
        assert!(!queue.is_empty());
    }

    #[test]
    fn test_concurrent_pushes_are_all_retained() {
        let queue = Arc::new(FifoQueue::new());
        let producers = 4;
        let per_producer = 250;

        let handles: Vec<_> = (0..producers)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..per_producer {
                        queue.push(p * per_producer + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut drained = Vec::new();
        while let Some(item) = queue.try_pop() {
            drained.push(item);
        }
        drained.sort_unstable();

        let expected: Vec<_> = (0..producers * per_producer).collect();
        assert_eq!(drained, expected, "every pushed item must survive");
    }
}
