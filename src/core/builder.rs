use std::borrow::Cow;
use std::hash::Hash;
use std::marker::PhantomData;

use crate::core::{Config, Relay};
use crate::error::PoolError;

/// Builder for constructing a [`Relay`] with adjusted settings.
pub struct RelayBuilder<K, V> {
    cfg: Config,
    _marker: PhantomData<fn(K, V)>,
}

impl<K, V> RelayBuilder<K, V> {
    /// Creates a builder seeded with [`Config::default`].
    pub fn new() -> Self {
        Self {
            cfg: Config::default(),
            _marker: PhantomData,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, cfg: Config) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the worker pool size (`0` = auto-detect).
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.cfg.workers = workers;
        self
    }

    /// Sets the worker thread name prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<Cow<'static, str>>) -> Self {
        self.cfg.name_prefix = prefix.into();
        self
    }

    /// Builds the relay, spawning its worker pool.
    ///
    /// # Errors
    /// Returns [`PoolError::Spawn`] if a worker thread fails to start.
    pub fn build(self) -> Result<Relay<K, V>, PoolError>
    where
        K: Eq + Hash + Send + Sync + 'static,
        V: Send + 'static,
    {
        Relay::with_config(self.cfg)
    }
}

impl<K, V> Default for RelayBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
