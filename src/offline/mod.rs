//! Offline cache shim: a versioned asset cache driven by the service
//! worker's install, activate and fetch events.

pub mod browser;
pub mod lifecycle;

pub use lifecycle::{CachePolicy, OfflineCache, OfflineError, ASSETS, CACHE_VERSION};
