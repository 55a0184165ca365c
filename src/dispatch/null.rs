//! Null-object dispatch handle for keys with no subscriber.

use crate::dispatch::handle::Dispatch;

/// Stand-in handle used when `push` finds no subscription.
///
/// Invocation is a pure no-op and [`is_active`](Dispatch::is_active) is
/// always `false`, so a `NullHandle` never claims a registry slot. The
/// registry constructs one transiently per vacant push and drops it right
/// after submit, which expires the queued task on the spot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHandle;

impl<K, V> Dispatch<K, V> for NullHandle {
    fn invoke(&self, _key: &K, _value: &V) {}

    fn is_active(&self) -> bool {
        false
    }
}
