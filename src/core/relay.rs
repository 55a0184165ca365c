//! # Subscription registry - the key-addressed front door.
//!
//! [`Relay`] maps each key to at most one dispatch handle and owns the
//! worker pool that performs deliveries.
//!
//! ## Architecture
//! ```text
//! subscribe(key, obj, cb) ──► write lock ── vacant? ── insert BoundHandle
//! unsubscribe(key) ─────────► write lock ── remove (handle dies here)
//!
//! push(key, value)
//!     │ read lock: clone handle, or make a NullHandle
//!     │ release lock
//!     └─► pool.submit(handle, key, value)   // downgrades, never blocks
//! ```
//!
//! ## Rules
//! - **At most one subscription per key**: the map entry is the sole
//!   strong owner of its handle.
//! - **Replacement policy**: `subscribe` on an occupied key succeeds only
//!   when the incumbent subscriber has been dropped; a live incumbent
//!   refuses the newcomer. Stated on [`Relay::subscribe`] and covered by
//!   the integration tests.
//! - **Push never blocks on delivery** and never reports whether a live
//!   subscriber existed; the handle clone happens under the read lock,
//!   the submit after it is released.

use std::any::type_name;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::trace;

use crate::core::builder::RelayBuilder;
use crate::core::config::Config;
use crate::dispatch::{BoundHandle, Dispatch, HandleRef, NullHandle};
use crate::error::PoolError;
use crate::pool::WorkerPool;

/// Concurrent key-addressed publish/dispatch registry.
///
/// Producers call [`push`](Relay::push); the value is delivered
/// asynchronously on the pool to whichever subscriber currently holds the
/// key, if any. Subscribers are held weakly: dropping one cancels its
/// pending deliveries instead of dangling them.
pub struct Relay<K, V> {
    // Declared before the map on purpose: fields drop in order, so the
    // pool joins its workers while the map still owns every handle.
    pool: WorkerPool<K, V>,
    handles: RwLock<HashMap<K, HandleRef<K, V>>>,
}

impl<K, V> Relay<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + 'static,
{
    /// Creates a relay with [`Config::default`].
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] if a worker thread fails to start.
    pub fn new() -> Result<Self, PoolError> {
        Self::with_config(Config::default())
    }

    /// Creates a relay with the given configuration.
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] if a worker thread fails to start.
    pub fn with_config(config: Config) -> Result<Self, PoolError> {
        let pool = WorkerPool::new(&config)?;
        Ok(Self {
            pool,
            handles: RwLock::new(HashMap::new()),
        })
    }

    /// Returns a builder for step-by-step configuration.
    pub fn builder() -> RelayBuilder<K, V> {
        RelayBuilder::new()
    }

    /// Claims `key` for `subscriber`, binding `callback` to it.
    ///
    /// The registry keeps only a weak reference to the subscriber; the
    /// caller's `Arc` (and its clones) remain the owners. Each delivered
    /// value invokes `callback(&subscriber, &key, &value)` on a worker
    /// thread.
    ///
    /// Returns `false` when the key is already claimed by a subscriber
    /// that is still alive. A claim whose subscriber has been dropped no
    /// longer blocks the key: the stale entry is overwritten and the call
    /// returns `true`.
    ///
    /// # Example
    /// ```
    /// use std::sync::atomic::{AtomicU64, Ordering};
    /// use std::sync::Arc;
    /// use keyrelay::Relay;
    ///
    /// fn main() -> Result<(), keyrelay::PoolError> {
    ///     let relay: Relay<&'static str, u64> = Relay::new()?;
    ///     let meter = Arc::new(AtomicU64::new(0));
    ///
    ///     assert!(relay.subscribe("ticks", &meter, |m, _key, value| {
    ///         m.fetch_add(*value, Ordering::Relaxed);
    ///     }));
    ///
    ///     // A second subscriber cannot claim the key while the first owner
    ///     // is alive.
    ///     assert!(!relay.subscribe("ticks", &Arc::new(()), |_, _, _: &u64| {}));
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe<T, F>(&self, key: K, subscriber: &Arc<T>, callback: F) -> bool
    where
        T: Send + Sync + 'static,
        F: Fn(&T, &K, &V) + Send + Sync + 'static,
    {
        let handle: HandleRef<K, V> = Arc::new(BoundHandle::new(subscriber, callback));

        let mut map = self.handles.write();
        match map.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(handle);
                trace!(subscriber = type_name::<T>(), "subscription installed");
                true
            }
            Entry::Occupied(mut slot) => {
                if slot.get().is_active() {
                    trace!(
                        subscriber = type_name::<T>(),
                        "subscription refused: key actively claimed"
                    );
                    return false;
                }
                slot.insert(handle);
                trace!(
                    subscriber = type_name::<T>(),
                    "subscription replaced expired owner"
                );
                true
            }
        }
    }

    /// Releases `key`, dropping its handle. No-op if the key is vacant.
    ///
    /// Deliveries already queued for the old handle expire with it and
    /// will not reach the subscriber.
    pub fn unsubscribe(&self, key: &K) {
        if self.handles.write().remove(key).is_some() {
            trace!("subscription removed");
        }
    }

    /// Queues `value` for asynchronous delivery to the subscriber of
    /// `key`, if one exists.
    ///
    /// Never blocks on delivery and never reports whether a live
    /// subscriber existed. With no subscription the task is built around
    /// a transient [`NullHandle`] and expires before any worker can touch
    /// it.
    pub fn push(&self, key: K, value: V) {
        let handle = {
            let map = self.handles.read();
            map.get(&key).map(Arc::clone)
        };

        match handle {
            Some(handle) => self.pool.submit(&handle, key, value),
            None => {
                trace!(
                    key_type = type_name::<K>(),
                    "push with no subscriber; delivery will expire"
                );
                let null: HandleRef<K, V> = Arc::new(NullHandle);
                self.pool.submit(&null, key, value);
            }
        }
    }

    // ---- Introspection ----

    /// Returns `true` if `key` currently has a subscription entry.
    ///
    /// The entry may belong to an already-dropped subscriber; this is a
    /// registry-level snapshot, not a liveness check.
    pub fn contains(&self, key: &K) -> bool {
        self.handles.read().contains_key(key)
    }

    /// Number of subscription entries in the registry.
    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    /// Returns `true` if no key is subscribed.
    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    /// Number of worker threads serving this relay.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }
}
