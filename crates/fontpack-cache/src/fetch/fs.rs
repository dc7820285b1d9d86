use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use fontpack_core::FontVersion;
use tracing::debug;

use crate::fetch::{ManifestFetcher, verify_and_commit};
use crate::store::ManifestStore;

/// Fetches manifests from a local source directory. Useful for development
/// setups and for tests; the verification contract is the same as over HTTP.
#[derive(Debug)]
pub struct FsFetcher {
    source_root: PathBuf,
}

impl FsFetcher {
    pub fn new(source_root: PathBuf) -> Self {
        Self { source_root }
    }
}

impl ManifestFetcher for FsFetcher {
    fn scheme(&self) -> &'static str {
        "fs"
    }

    fn fetch_and_verify(&self, version: &FontVersion, store: &dyn ManifestStore) -> Result<bool> {
        let path = self.source_root.join(version.manifest_path());
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(version = version.id(), source = %path.display(), "manifest not present in source");
                return Ok(false);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };
        verify_and_commit(version, &bytes, store)
    }
}
