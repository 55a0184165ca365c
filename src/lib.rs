//! # keyrelay
//!
//! **Keyrelay** is a key-addressed publish/dispatch library for Rust.
//!
//! Producers push values at string-like keys without knowing who, if anyone,
//! is listening. Each key is owned by at most one live subscriber, and values
//! are delivered asynchronously on a fixed pool of worker threads. The crate
//! is designed as an in-process building block for pipelines that fan values
//! out by topic.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!   │   producer   │   │   producer   │   │   producer   │
//!   │ push("red",v)│   │ push("red",v)│   │ push("blue",v)│
//!   └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!          ▼                  ▼                  ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Relay (key registry)                                       │
//! │  - RwLock<HashMap<K, HandleRef>>, one handle per key        │
//! │  - clones the handle under a read lock, then hands the      │
//! │    value to the pool (push never waits for delivery)        │
//! └────────────────────────────┬────────────────────────────────┘
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  WorkerPool                                                 │
//! │  - FifoQueue<Task> (mutex-guarded ring buffer)              │
//! │  - fixed set of named worker threads                        │
//! └──────┬──────────────────┬──────────────────┬────────────────┘
//!        ▼                  ▼                  ▼
//!   ┌─────────┐        ┌─────────┐        ┌─────────┐
//!   │ worker0 │        │ worker1 │        │ workerN │
//!   └────┬────┘        └────┬────┘        └────┬────┘
//!        │ upgrade the task's weak handle, then either:
//!        ├─ live    ──► callback(&subscriber, &key, &value)
//!        └─ expired ──► discard the task silently
//! ```
//!
//! ### Lifecycle
//! ```text
//! subscribe(key, &subscriber, callback)
//!   ├─► wrap the subscriber in a BoundHandle (Weak<T> + callback)
//!   ├─► key vacant             ─► claim it, return true
//!   ├─► key held, owner alive  ─► refuse, return false
//!   └─► key held, owner gone   ─► replace the stale handle, return true
//!
//! push(key, value)
//!   ├─► read-lock the registry, clone the key's handle
//!   │     └─ unclaimed key ─► transient NullHandle (value is dropped)
//!   ├─► enqueue Task { weak handle, key, value }
//!   └─► return immediately (delivery is asynchronous)
//!
//! worker loop {
//!   ├─► try_pop
//!   │     ├─ empty ─► yield, retry
//!   │     └─ task  ─► upgrade the handle ─► invoke or discard
//!   │                  (callback panics are caught and logged)
//!   └─► until the pool shuts down (Relay drop joins the workers)
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                         |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Registry**      | Claim keys, publish values, inspect subscriptions.       | [`Relay`], [`RelayBuilder`]                |
//! | **Dispatch**      | Lifetime-safe seam between queued work and subscribers.  | [`Dispatch`], [`BoundHandle`], [`NullHandle`] |
//! | **Delivery**      | Fixed thread pool draining a shared FIFO queue.          | [`WorkerPool`], [`FifoQueue`]              |
//! | **Configuration** | Pool sizing and worker thread naming.                    | [`Config`]                                 |
//! | **Errors**        | Typed startup failures.                                  | [`PoolError`]                              |
//!
//! ## Rules
//! - A key has at most one live subscriber; [`Relay::subscribe`] refuses the
//!   key while its current owner is still alive.
//! - Dropping a subscriber releases its keys implicitly; values still queued
//!   for it are discarded at dispatch time.
//! - [`Relay::push`] never blocks on delivery and never fails; values pushed
//!   at unclaimed keys are dropped.
//! - Values for one key keep their push order only while the pool runs a
//!   single worker; with more workers, delivery order across tasks is
//!   unspecified.
//! - Dropping the [`Relay`] stops the workers without draining the queue.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use std::time::{Duration, Instant};
//!
//! use keyrelay::Relay;
//! use parking_lot::Mutex;
//!
//! struct Inbox {
//!     seen: Mutex<Vec<String>>,
//! }
//!
//! fn main() -> Result<(), keyrelay::PoolError> {
//!     let relay: Relay<String, String> = Relay::new()?;
//!     let inbox = Arc::new(Inbox {
//!         seen: Mutex::new(Vec::new()),
//!     });
//!
//!     assert!(relay.subscribe("greetings".into(), &inbox, |inbox, _key, value| {
//!         inbox.seen.lock().push(value.clone());
//!     }));
//!
//!     relay.push("greetings".into(), "hello".into());
//!     relay.push("unclaimed".into(), "nobody listens".into());
//!
//!     // Delivery is asynchronous: wait for the workers to catch up.
//!     let deadline = Instant::now() + Duration::from_secs(5);
//!     while inbox.seen.lock().is_empty() && Instant::now() < deadline {
//!         thread::yield_now();
//!     }
//!     assert_eq!(*inbox.seen.lock(), ["hello"]);
//!     Ok(())
//! }
//! ```
mod core;
mod dispatch;
mod error;
mod pool;

// ---- Public re-exports ----

pub use crate::core::{Config, Relay, RelayBuilder, FALLBACK_WORKERS};
pub use crate::dispatch::{BoundHandle, Dispatch, HandleRef, NullHandle};
pub use crate::error::PoolError;
pub use crate::pool::{FifoQueue, WorkerPool};
