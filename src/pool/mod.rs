//! Asynchronous delivery machinery: task queue and worker pool.
//!
//! Internal modules:
//! - [`queue`]: mutex-guarded FIFO shared by producers and workers;
//! - [`task`]: one queued delivery with a weakly-held handle;
//! - [`workers`]: fixed thread pool polling the queue until shutdown.

mod queue;
mod task;
mod workers;

pub use queue::FifoQueue;
pub use workers::WorkerPool;
