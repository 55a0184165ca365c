//! # Bound handle: a subscriber observed weakly plus its callback.
//!
//! [`BoundHandle`] is what the registry actually stores per key. It keeps
//! a [`Weak`] reference to the subscriber and a type-erased callback, so
//! holding the handle never extends the subscriber's lifetime. The
//! subscriber dying first is an expected state, not a bug: invocation
//! upgrades the weak reference and quietly does nothing when that fails.

use std::any::type_name;
use std::sync::{Arc, Weak};

use tracing::trace;

use crate::dispatch::handle::Dispatch;

/// Dispatch handle bound to one subscriber object.
///
/// Created by [`Relay::subscribe`](crate::Relay::subscribe); not usually
/// constructed directly unless you are driving a
/// [`WorkerPool`](crate::WorkerPool) by hand.
pub struct BoundHandle<T, K, V> {
    target: Weak<T>,
    callback: Box<dyn Fn(&T, &K, &V) + Send + Sync>,
}

impl<T, K, V> BoundHandle<T, K, V>
where
    T: Send + Sync + 'static,
{
    /// Binds `callback` to `subscriber` without taking ownership of it.
    ///
    /// Only a weak reference is retained: dropping every external `Arc`
    /// to the subscriber deactivates the handle, no matter how many
    /// tasks still point at it.
    pub fn new<F>(subscriber: &Arc<T>, callback: F) -> Self
    where
        F: Fn(&T, &K, &V) + Send + Sync + 'static,
    {
        Self {
            target: Arc::downgrade(subscriber),
            callback: Box::new(callback),
        }
    }
}

impl<T, K, V> Dispatch<K, V> for BoundHandle<T, K, V>
where
    T: Send + Sync + 'static,
{
    fn invoke(&self, key: &K, value: &V) {
        match self.target.upgrade() {
            Some(target) => (self.callback)(&target, key, value),
            None => {
                trace!(
                    subscriber = type_name::<T>(),
                    "dispatch skipped: subscriber dropped"
                );
            }
        }
    }

    fn is_active(&self) -> bool {
        self.target.strong_count() > 0
    }
}
