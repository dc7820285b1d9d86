use std::sync::Arc;

use anyhow::{Result, bail};
use fontpack_core::{FontManifest, FontVersion, SourceConfig, SourceKind, SourceLocation};
use tracing::warn;

use crate::store::ManifestStore;

mod fs;
mod http;

pub use fs::FsFetcher;
pub use http::HttpFetcher;

/// Remote fetch-and-verify collaborator.
///
/// `fetch_and_verify` downloads the manifest for `version`, verifies it, and
/// commits the verified bytes to `store` at the version's manifest path.
/// `Ok(false)` means the manifest could not be obtained or did not verify;
/// in that case storage is left unchanged. `Err` is reserved for
/// configuration and local I/O problems, not ordinary fetch failures.
pub trait ManifestFetcher: Send + Sync + std::fmt::Debug {
    fn scheme(&self) -> &'static str;
    fn fetch_and_verify(&self, version: &FontVersion, store: &dyn ManifestStore) -> Result<bool>;
}

/// Build the fetcher matching a configured source.
pub fn fetcher_for(config: &SourceConfig) -> Result<Arc<dyn ManifestFetcher>> {
    match (config.kind, &config.location) {
        (SourceKind::Http, SourceLocation::Remote(url)) => Ok(Arc::new(HttpFetcher::new(
            url.clone(),
            config.request_timeout,
        )?)),
        (SourceKind::Fs, SourceLocation::Dir(path)) => Ok(Arc::new(FsFetcher::new(path.clone()))),
        (kind, location) => bail!(
            "source kind `{}` does not accept location {}",
            kind.scheme(),
            location.display()
        ),
    }
}

/// Verification gate shared by every fetcher: the payload must decode as a
/// manifest, and must match the version's pinned digest when one is present.
/// Nothing is committed unless both checks pass.
pub(crate) fn verify_and_commit(
    version: &FontVersion,
    bytes: &[u8],
    store: &dyn ManifestStore,
) -> Result<bool> {
    if FontManifest::from_slice(bytes).is_err() {
        warn!(
            version = version.id(),
            "downloaded manifest failed structural verification"
        );
        return Ok(false);
    }
    if let Some(digest) = version.digest()
        && !digest.matches(bytes)
    {
        warn!(
            version = version.id(),
            expected = %digest,
            "downloaded manifest failed digest verification"
        );
        return Ok(false);
    }
    store.write(&version.manifest_path(), bytes)?;
    Ok(true)
}
