//! # Fixed pool of worker threads draining a shared task queue.
//!
//! Provides [`WorkerPool`]: OS threads created up front, all polling one
//! [`FifoQueue`] until the keep-alive flag is cleared.
//!
//! ## Architecture
//! ```text
//! submit(handle, key, value)
//!     │  downgrade handle ──► Task { weak handle, key, value }
//!     ▼
//! FifoQueue<Task> ◄── try_pop ── worker 0..N
//!                                   │
//!                                   ├─ task: upgrade weak ─► invoke (panic-isolated)
//!                                   │                    └─► expired: drop silently
//!                                   └─ empty: yield_now, retry
//! ```
//!
//! ## Rules
//! - **Busy-poll by design**: idle workers spin on `try_pop` + `yield_now`
//!   instead of parking on a condition variable. Dispatch latency stays
//!   near zero at the cost of idle CPU; swapping in a blocking wait would
//!   change observable scheduling behavior.
//! - **All-or-nothing startup**: if any thread fails to spawn, the ones
//!   already running are stopped and joined and construction fails. No
//!   partial pool.
//! - **No drain on shutdown**: dropping the pool clears the flag and joins
//!   every worker; tasks still queued are discarded without notice.
//! - **Panic isolation**: a panicking callback is caught and reported; the
//!   worker moves on to the next task.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::core::Config;
use crate::dispatch::HandleRef;
use crate::error::PoolError;
use crate::pool::queue::FifoQueue;
use crate::pool::task::Task;

/// Fixed-size worker pool feeding tasks to dispatch handles.
///
/// The pool never owns a handle strongly: [`submit`](WorkerPool::submit)
/// downgrades before enqueueing, so subscription removal expires queued
/// work instead of delaying it.
pub struct WorkerPool<K, V> {
    queue: Arc<FifoQueue<Task<K, V>>>,
    keep_alive: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
}

impl<K, V> WorkerPool<K, V>
where
    K: Send + Sync + 'static,
    V: Send + 'static,
{
    /// Spawns `config.resolved_workers()` named threads.
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] if any thread fails to start; threads
    /// spawned before the failure are stopped and joined first.
    pub fn new(config: &Config) -> Result<Self, PoolError> {
        let queue = Arc::new(FifoQueue::new());
        let keep_alive = Arc::new(AtomicBool::new(true));
        let count = config.resolved_workers();
        let mut workers = Vec::with_capacity(count);

        for index in 0..count {
            let spawned = thread::Builder::new().name(config.worker_name(index)).spawn({
                let queue = Arc::clone(&queue);
                let keep_alive = Arc::clone(&keep_alive);
                move || Self::worker_loop(&queue, &keep_alive)
            });

            match spawned {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    keep_alive.store(false, Ordering::Release);
                    for handle in workers {
                        let _ = handle.join();
                    }
                    return Err(PoolError::Spawn { index, source });
                }
            }
        }

        debug!(workers = count, "worker pool started");
        Ok(Self {
            queue,
            keep_alive,
            workers,
        })
    }

    /// Enqueues one delivery without blocking on it.
    ///
    /// The handle is downgraded here: the caller (normally the registry
    /// map entry) stays the only strong owner.
    pub fn submit(&self, handle: &HandleRef<K, V>, key: K, value: V) {
        self.queue.push(Task::new(Arc::downgrade(handle), key, value));
    }

    /// Number of worker threads in the pool.
    pub fn workers(&self) -> usize {
        self.workers.len()
    }

    /// Snapshot of tasks currently waiting in the queue.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    fn worker_loop(queue: &FifoQueue<Task<K, V>>, keep_alive: &AtomicBool) {
        while keep_alive.load(Ordering::Acquire) {
            match queue.try_pop() {
                Some(task) => Self::run_task(task),
                None => thread::yield_now(),
            }
        }
    }

    fn run_task(task: Task<K, V>) {
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| task.dispatch())) {
            warn!(
                reason = %panic_message(&*payload),
                "subscriber callback panicked; worker continues"
            );
        }
    }
}

impl<K, V> Drop for WorkerPool<K, V> {
    /// Clears the keep-alive flag and joins every worker.
    ///
    /// Queued tasks are not drained; whatever is left when the workers
    /// observe the flag is discarded.
    fn drop(&mut self) {
        self.keep_alive.store(false, Ordering::Release);
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                // per-task panics are caught in the loop; an Err here means
                // the thread died outside a callback
                warn!("worker thread terminated abnormally");
            }
        }

        let discarded = self.queue.len();
        if discarded > 0 {
            debug!(discarded, "worker pool stopped; queued tasks discarded");
        } else {
            debug!("worker pool stopped");
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::mpsc;
    use std::time::{Duration, Instant};

    use parking_lot::Mutex;

    use crate::dispatch::BoundHandle;

    fn single_worker() -> Config {
        Config {
            workers: 1,
            ..Config::default()
        }
    }

    fn counting_handle(hits: &Arc<AtomicUsize>) -> HandleRef<String, String> {
        Arc::new(BoundHandle::new(
            hits,
            |t: &AtomicUsize, _key: &String, _value: &String| {
                t.fetch_add(1, Ordering::SeqCst);
            },
        ))
    }

    /// Handle whose callback blocks until the returned sender fires, used
    /// to hold the single worker in place while the queue is staged.
    fn gate_handle(anchor: &Arc<()>) -> (HandleRef<String, String>, mpsc::Sender<()>) {
        let (release, wait) = mpsc::channel::<()>();
        let wait = Mutex::new(wait);
        let handle: HandleRef<String, String> = Arc::new(BoundHandle::new(
            anchor,
            move |_t: &(), _key: &String, _value: &String| {
                let _ = wait.lock().recv();
            },
        ));
        (handle, release)
    }

    fn wait_for(mut pred: impl FnMut() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if pred() {
                return true;
            }
            thread::sleep(Duration::from_millis(1));
        }
        pred()
    }

    #[test]
    fn test_submitted_tasks_are_delivered() {
        let pool = WorkerPool::new(&single_worker()).unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(&hits);

        for i in 0..3 {
            pool.submit(&handle, "red".to_string(), i.to_string());
        }

        assert!(
            wait_for(|| hits.load(Ordering::SeqCst) == 3),
            "expected 3 deliveries, got {}",
            hits.load(Ordering::SeqCst)
        );
    }

    #[test]
    fn test_queued_task_expires_when_handle_dropped() {
        let pool = WorkerPool::new(&single_worker()).unwrap();
        let anchor = Arc::new(());
        let (gate, release) = gate_handle(&anchor);

        // Hold the only worker inside the gate task, then stage the rest
        // of the queue behind it.
        pool.submit(&gate, "gate".to_string(), String::new());

        let doomed_hits = Arc::new(AtomicUsize::new(0));
        let doomed = counting_handle(&doomed_hits);
        pool.submit(&doomed, "red".to_string(), "1".to_string());
        drop(doomed);

        let control_hits = Arc::new(AtomicUsize::new(0));
        let control = counting_handle(&control_hits);
        pool.submit(&control, "ctl".to_string(), String::new());

        release.send(()).unwrap();

        assert!(
            wait_for(|| control_hits.load(Ordering::SeqCst) == 1),
            "control task never arrived"
        );
        assert_eq!(
            doomed_hits.load(Ordering::SeqCst),
            0,
            "task for a dropped handle must not deliver"
        );
    }

    #[test]
    fn test_panicking_callback_does_not_kill_worker() {
        let pool = WorkerPool::new(&single_worker()).unwrap();
        let anchor = Arc::new(());
        let boom: HandleRef<String, String> = Arc::new(BoundHandle::new(
            &anchor,
            |_t: &(), _key: &String, _value: &String| panic!("boom"),
        ));
        let hits = Arc::new(AtomicUsize::new(0));
        let after = counting_handle(&hits);

        pool.submit(&boom, "boom".to_string(), String::new());
        pool.submit(&after, "ok".to_string(), String::new());

        assert!(
            wait_for(|| hits.load(Ordering::SeqCst) == 1),
            "worker did not survive the panicking callback"
        );
    }

    #[test]
    fn test_shutdown_with_backlog_completes() {
        let pool = WorkerPool::new(&single_worker()).unwrap();
        let anchor = Arc::new(());
        let (gate, release) = gate_handle(&anchor);
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(&hits);

        pool.submit(&gate, "gate".to_string(), String::new());
        for i in 0..100 {
            pool.submit(&handle, "red".to_string(), i.to_string());
        }

        release.send(()).unwrap();
        drop(pool);

        // No delivery guarantee across shutdown; the pool only has to
        // come down without deadlocking.
        assert!(hits.load(Ordering::SeqCst) <= 100);
    }
}
