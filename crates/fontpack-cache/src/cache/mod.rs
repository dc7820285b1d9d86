use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use fontpack_core::{FontManifest, FontVersion};
use tracing::{debug, warn};

pub mod config;
pub mod singleflight;

pub use config::CacheConfig;

use crate::fetch::ManifestFetcher;
use crate::store::{FileStore, ManifestStore};
use singleflight::Singleflight;

/// Why a local read produced no manifest. Feeds logs and metrics only;
/// callers observe plain absence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum MissReason {
    NotPresent,
    Corrupt,
    TransientFailure,
}

/// Read-through cache for versioned font manifests: disk first, remote
/// fetch-and-verify on miss, with the freshly verified file re-read from
/// disk before being returned.
#[derive(Clone, Debug)]
pub struct ManifestCache {
    config: CacheConfig,
    store: Arc<dyn ManifestStore>,
    fetcher: Arc<dyn ManifestFetcher>,
    singleflight: Singleflight,
    metrics: Arc<CacheMetrics>,
}

#[derive(Debug, Default)]
struct CacheMetrics {
    disk_hits: AtomicU64,
    disk_misses: AtomicU64,
    corrupt_entries: AtomicU64,
    fetches: AtomicU64,
    fetch_failures: AtomicU64,
}

#[derive(Clone, Debug, Default)]
pub struct CacheMetricsSnapshot {
    pub disk_hits: u64,
    pub disk_misses: u64,
    pub corrupt_entries: u64,
    pub fetches: u64,
    pub fetch_failures: u64,
}

impl ManifestCache {
    pub fn new(
        config: CacheConfig,
        store: Arc<dyn ManifestStore>,
        fetcher: Arc<dyn ManifestFetcher>,
    ) -> Self {
        Self {
            config,
            store,
            fetcher,
            singleflight: Singleflight::new(),
            metrics: Arc::new(CacheMetrics::default()),
        }
    }

    /// Convenience constructor backed by a [`FileStore`] at the configured
    /// cache root.
    pub fn with_file_store(config: CacheConfig, fetcher: Arc<dyn ManifestFetcher>) -> Self {
        let store = Arc::new(FileStore::new(config.root.clone()));
        Self::new(config, store, fetcher)
    }

    pub fn metrics(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            disk_hits: self.metrics.disk_hits.load(Ordering::Relaxed),
            disk_misses: self.metrics.disk_misses.load(Ordering::Relaxed),
            corrupt_entries: self.metrics.corrupt_entries.load(Ordering::Relaxed),
            fetches: self.metrics.fetches.load(Ordering::Relaxed),
            fetch_failures: self.metrics.fetch_failures.load(Ordering::Relaxed),
        }
    }

    /// Gets the manifest for `version`. This may hit disk, the network, or
    /// both, depending on whether a cached manifest is available for the
    /// version. Blocks for the full duration of local and remote I/O; call
    /// it from a background worker, never a latency-sensitive context.
    ///
    /// Concurrent calls for the same version serialize on a per-version
    /// lock, so one fetch refreshes storage for all of them. If an external
    /// writer races the cache on the same file, the last write wins.
    ///
    /// # Panics
    ///
    /// Panics if `version` has an empty storage path. That is a caller bug,
    /// deliberately distinguishable from absence.
    pub fn get(&self, version: &FontVersion) -> Option<FontManifest> {
        assert!(
            !version.path().is_empty(),
            "font version has an empty storage path"
        );
        if let Some(manifest) = self.from_disk(version) {
            return Some(manifest);
        }
        if !self.config.fetch_enabled {
            return None;
        }
        let _guard = self.singleflight.acquire(version.manifest_path());
        // A concurrent caller may have refreshed the file while we waited.
        if let Some(manifest) = self.from_disk(version) {
            return Some(manifest);
        }
        self.from_network(version)
    }

    fn from_disk(&self, version: &FontVersion) -> Option<FontManifest> {
        let path = version.manifest_path();
        let bytes = match self.store.read(&path) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                self.bump(MissReason::NotPresent);
                debug!(version = version.id(), "no cached manifest on disk");
                return None;
            }
            Err(err) => {
                self.bump(MissReason::NotPresent);
                warn!(version = version.id(), error = %err, "failed to read manifest from disk");
                return None;
            }
        };
        match FontManifest::from_slice(&bytes) {
            Ok(manifest) => {
                self.metrics.disk_hits.fetch_add(1, Ordering::Relaxed);
                Some(manifest)
            }
            Err(err) => {
                // Same as a missing file for callers; drop the entry so the
                // refresh path overwrites it.
                let _ = self.store.remove(&path);
                self.bump(MissReason::Corrupt);
                warn!(version = version.id(), error = %err, "corrupt manifest on disk, treating as missing");
                None
            }
        }
    }

    fn from_network(&self, version: &FontVersion) -> Option<FontManifest> {
        self.metrics.fetches.fetch_add(1, Ordering::Relaxed);
        match self
            .fetcher
            .fetch_and_verify(version, self.store.as_ref())
        {
            Ok(true) => self.from_disk(version),
            Ok(false) => {
                self.bump(MissReason::TransientFailure);
                debug!(
                    version = version.id(),
                    scheme = self.fetcher.scheme(),
                    "manifest fetch reported failure"
                );
                None
            }
            Err(err) => {
                self.bump(MissReason::TransientFailure);
                warn!(version = version.id(), error = %err, "manifest fetch failed");
                None
            }
        }
    }

    fn bump(&self, reason: MissReason) {
        let counter = match reason {
            MissReason::NotPresent => &self.metrics.disk_misses,
            MissReason::Corrupt => &self.metrics.corrupt_entries,
            MissReason::TransientFailure => &self.metrics.fetch_failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests;
