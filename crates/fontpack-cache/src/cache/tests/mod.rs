use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use fontpack_core::FontVersion;
use tempfile::TempDir;

use crate::cache::{CacheConfig, ManifestCache};
use crate::fetch::ManifestFetcher;
use crate::store::{FileStore, ManifestStore};

mod singleflight;

pub(crate) const MANIFEST_JSON: &[u8] =
    br#"{"scripts":{"latin-extended":{"regular":"Inter-Regular.otf","bold":"Inter-Bold.otf"}}}"#;

/// Test double for the remote collaborator: either commits a fixed payload
/// (counting as a verified download) or reports failure, optionally after a
/// delay to widen race windows.
#[derive(Debug)]
pub(crate) struct ScriptedFetcher {
    pub calls: AtomicU64,
    payload: Option<Vec<u8>>,
    delay: Option<Duration>,
}

impl ScriptedFetcher {
    pub fn succeeding(payload: &[u8]) -> Self {
        Self {
            calls: AtomicU64::new(0),
            payload: Some(payload.to_vec()),
            delay: None,
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicU64::new(0),
            payload: None,
            delay: None,
        }
    }

    pub fn slow(payload: &[u8], delay: Duration) -> Self {
        Self {
            calls: AtomicU64::new(0),
            payload: Some(payload.to_vec()),
            delay: Some(delay),
        }
    }
}

impl ManifestFetcher for ScriptedFetcher {
    fn scheme(&self) -> &'static str {
        "test"
    }

    fn fetch_and_verify(&self, version: &FontVersion, store: &dyn ManifestStore) -> Result<bool> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        match &self.payload {
            Some(bytes) => {
                store.write(&version.manifest_path(), bytes)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

pub(crate) fn build_cache(temp: &TempDir, fetcher: Arc<ScriptedFetcher>) -> ManifestCache {
    let config = CacheConfig {
        root: temp.path().to_path_buf(),
        fetch_enabled: true,
    };
    ManifestCache::new(
        config,
        Arc::new(FileStore::new(temp.path().to_path_buf())),
        fetcher,
    )
}

pub(crate) fn seed_disk(temp: &TempDir, version: &FontVersion, bytes: &[u8]) {
    let store = FileStore::new(temp.path().to_path_buf());
    store.write(&version.manifest_path(), bytes).expect("seed");
}
