//! # Dispatch seam: how a queued value reaches a subscriber.
//!
//! [`Dispatch`] is the object-safe boundary between the delivery machinery
//! and subscriber code. The registry stores handles behind this trait, the
//! worker pool invokes through it, and neither side ever learns the
//! concrete subscriber type.
//!
//! Two implementations exist:
//! - [`BoundHandle`](crate::BoundHandle): wraps a live subscriber weakly;
//! - [`NullHandle`](crate::NullHandle): the no-subscriber stand-in, so the
//!   dispatch path never branches on presence.
//!
//! ## Rules
//! - `invoke` must be safe to call at any time, including after the
//!   subscriber is gone; a dead target is a silent no-op, not an error.
//! - `is_active` answers "does this handle still claim its registry
//!   slot" and is consulted only when deciding whether a `subscribe` on
//!   an occupied key may replace the incumbent. Dispatch never consults
//!   it; delivery always re-checks the weak reference itself.

use std::sync::Arc;

/// Lifetime-safe invocation target for queued `(key, value)` pairs.
pub trait Dispatch<K, V>: Send + Sync {
    /// Delivers one value to the underlying subscriber, if it still exists.
    fn invoke(&self, key: &K, value: &V);

    /// Reports whether the handle still holds a live claim on its slot.
    fn is_active(&self) -> bool;
}

/// Shared, type-erased dispatch handle as stored by the registry.
pub type HandleRef<K, V> = Arc<dyn Dispatch<K, V>>;
