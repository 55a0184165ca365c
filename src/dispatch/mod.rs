//! Dispatch handles: lifetime-safe, uniform invocation targets.
//!
//! Internal modules:
//! - [`handle`]: the [`Dispatch`] trait and the shared [`HandleRef`] alias;
//! - [`bound`]: handle bound to a real subscriber via a weak reference;
//! - [`null`]: no-op handle standing in for "no subscriber".

mod bound;
mod handle;
mod null;

pub use bound::BoundHandle;
pub use handle::{Dispatch, HandleRef};
pub use null::NullHandle;
