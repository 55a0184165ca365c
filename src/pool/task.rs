//! One queued unit of delivery: a weakly-held handle plus its payload.

use std::any::type_name;
use std::sync::Weak;

use tracing::trace;

use crate::dispatch::Dispatch;

/// A `(handle, key, value)` triple awaiting dispatch on a worker.
///
/// The handle is held weakly on purpose: the registry's map entry stays
/// the sole owner, so unsubscribing (or replacing) a key expires every
/// task still queued for the old handle instead of keeping it alive.
pub(crate) struct Task<K, V> {
    handle: Weak<dyn Dispatch<K, V>>,
    key: K,
    value: V,
}

impl<K, V> Task<K, V> {
    pub(crate) fn new(handle: Weak<dyn Dispatch<K, V>>, key: K, value: V) -> Self {
        Self { handle, key, value }
    }

    /// Attempts delivery, consuming the task.
    ///
    /// Returns `true` if the handle was still owned somewhere and was
    /// invoked, `false` if it had expired and the payload was discarded.
    pub(crate) fn dispatch(self) -> bool {
        match self.handle.upgrade() {
            Some(handle) => {
                handle.invoke(&self.key, &self.value);
                true
            }
            None => {
                trace!(
                    key_type = type_name::<K>(),
                    "task discarded: dispatch handle expired"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::dispatch::{BoundHandle, HandleRef};

    fn counting_handle(hits: &Arc<AtomicUsize>) -> HandleRef<String, String> {
        Arc::new(BoundHandle::new(
            hits,
            |t: &AtomicUsize, _key: &String, _value: &String| {
                t.fetch_add(1, Ordering::SeqCst);
            },
        ))
    }

    #[test]
    fn test_dispatch_delivers_while_handle_owned() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(&hits);

        let task = Task::new(Arc::downgrade(&handle), "k".to_string(), "v".to_string());
        assert!(task.dispatch());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dispatch_after_owner_drop_is_silent() {
        let hits = Arc::new(AtomicUsize::new(0));
        let handle = counting_handle(&hits);

        let task = Task::new(Arc::downgrade(&handle), "k".to_string(), "v".to_string());
        drop(handle);

        assert!(!task.dispatch(), "expired handle must not deliver");
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
