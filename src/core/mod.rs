//! Relay core: registry, configuration, construction.
//!
//! Internal modules:
//! - [`relay`]: the key → handle registry that owns the worker pool;
//! - [`config`]: pool sizing and thread naming settings;
//! - [`builder`]: fluent construction on top of [`Config`].

mod builder;
mod config;
mod relay;

pub use builder::RelayBuilder;
pub use config::{Config, FALLBACK_WORKERS};
pub use relay::Relay;
