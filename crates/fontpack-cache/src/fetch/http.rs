use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use fontpack_core::FontVersion;
use reqwest::blocking::Client;
use tracing::{debug, warn};
use url::Url;

use crate::fetch::{ManifestFetcher, verify_and_commit};
use crate::store::ManifestStore;

/// Fetches manifests over HTTP/S from a base URL. The manifest for a
/// version is expected at `<base>/<version-dir>/.manifest`.
#[derive(Debug)]
pub struct HttpFetcher {
    base: Url,
    client: Client,
}

impl HttpFetcher {
    pub fn new(base: Url, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build manifest HTTP client")?;
        Ok(Self { base, client })
    }

    fn manifest_url(&self, path: &str) -> Result<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("manifest base URL cannot be a base: {}", self.base))?;
            segments.pop_if_empty();
            for part in path.split('/').filter(|part| !part.is_empty()) {
                segments.push(part);
            }
        }
        Ok(url)
    }
}

impl ManifestFetcher for HttpFetcher {
    fn scheme(&self) -> &'static str {
        "http"
    }

    fn fetch_and_verify(&self, version: &FontVersion, store: &dyn ManifestStore) -> Result<bool> {
        let url = self.manifest_url(&version.manifest_path())?;
        let response = match self.client.get(url.clone()).send() {
            Ok(response) => response,
            Err(err) => {
                warn!(version = version.id(), url = %url, error = %err, "manifest download failed");
                return Ok(false);
            }
        };
        if !response.status().is_success() {
            debug!(version = version.id(), url = %url, status = %response.status(), "manifest download rejected");
            return Ok(false);
        }
        let bytes = match response.bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(version = version.id(), url = %url, error = %err, "manifest download truncated");
                return Ok(false);
            }
        };
        verify_and_commit(version, &bytes, store)
    }
}
