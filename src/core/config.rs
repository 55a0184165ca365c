//! # Relay runtime configuration.
//!
//! Provides [`Config`], the settings applied when a [`Relay`](crate::Relay)
//! (and its worker pool) is constructed.
//!
//! ## Sentinel values
//! - `workers = 0` → auto: size the pool to available hardware
//!   parallelism, falling back to [`FALLBACK_WORKERS`] when that cannot
//!   be determined.

use std::borrow::Cow;
use std::num::NonZeroUsize;
use std::thread;

/// Pool size used when `workers = 0` and the hardware parallelism of the
/// host cannot be determined.
pub const FALLBACK_WORKERS: usize = 2;

/// Configuration for a relay and its worker pool.
///
/// ## Field semantics
/// - `workers`: fixed pool size (`0` = auto-detect, see module docs)
/// - `name_prefix`: prefix for worker thread names (`<prefix>-<index>`)
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of worker threads to spawn.
    ///
    /// - `0` = auto (available parallelism, fallback
    ///   [`FALLBACK_WORKERS`])
    /// - `n > 0` = exactly `n` workers
    ///
    /// The pool size is fixed for the lifetime of the relay.
    pub workers: usize,

    /// Prefix for worker thread names.
    ///
    /// Worker `i` is named `<name_prefix>-<i>`, which is what shows up in
    /// debuggers and panic backtraces.
    pub name_prefix: Cow<'static, str>,
}

impl Config {
    /// Returns the worker count with the auto sentinel resolved.
    #[inline]
    pub fn resolved_workers(&self) -> usize {
        match self.workers {
            0 => thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(FALLBACK_WORKERS),
            n => n,
        }
    }

    /// Returns the thread name for worker `index`.
    #[inline]
    pub fn worker_name(&self, index: usize) -> String {
        format!("{}-{}", self.name_prefix, index)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `workers = 0` (auto-detect)
    /// - `name_prefix = "keyrelay"`
    fn default() -> Self {
        Self {
            workers: 0,
            name_prefix: Cow::Borrowed("keyrelay"),
        }
    }
}
