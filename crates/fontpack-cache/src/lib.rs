//! Read-through cache for versioned font manifests.
//!
//! Given a [`fontpack_core::FontVersion`], [`cache::ManifestCache`] produces
//! the decoded manifest for that revision, preferring durable local storage
//! and falling back to a remote fetch-and-verify source that refreshes local
//! storage as a side effect. Callers only ever observe presence or absence;
//! every recoverable failure is absorbed, classified, and logged inside the
//! cache.

pub mod cache;
pub mod fetch;
pub mod store;

pub use cache::{CacheConfig, CacheMetricsSnapshot, ManifestCache};
pub use fetch::{FsFetcher, HttpFetcher, ManifestFetcher, fetcher_for};
pub use store::{FileStore, ManifestStore};
