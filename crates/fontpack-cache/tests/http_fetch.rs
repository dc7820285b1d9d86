use std::sync::Arc;
use std::time::Duration;

use fontpack_cache::{CacheConfig, HttpFetcher, ManifestCache};
use fontpack_core::{FontVersion, ManifestDigest, ScriptTag};
use tempfile::TempDir;
use url::Url;

const MANIFEST_JSON: &[u8] =
    br#"{"scripts":{"latin-extended":{"regular":"Inter-Regular.otf"},"arabic":{"regular":"NotoNaskh-Regular.ttf"}}}"#;

fn spawn_manifest_server() -> u16 {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("server");
    let port = server.server_addr().to_ip().expect("ip addr").port();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = if request.url() == "/fonts/v5/.manifest" {
                tiny_http::Response::from_data(MANIFEST_JSON.to_vec())
            } else {
                tiny_http::Response::from_data(Vec::new()).with_status_code(404)
            };
            let _ = request.respond(response);
        }
    });
    port
}

fn build_cache(temp: &TempDir, port: u16) -> ManifestCache {
    let base = Url::parse(&format!("http://127.0.0.1:{port}/fonts")).expect("base url");
    let fetcher = HttpFetcher::new(base, Duration::from_secs(5)).expect("fetcher");
    let config = CacheConfig {
        root: temp.path().to_path_buf(),
        fetch_enabled: true,
    };
    ManifestCache::with_file_store(config, Arc::new(fetcher))
}

#[test]
fn miss_downloads_verifies_and_caches() {
    let port = spawn_manifest_server();
    let temp = TempDir::new().expect("temp dir");
    let cache = build_cache(&temp, port);
    let version = FontVersion::new(5, "v5").with_digest(ManifestDigest::of(MANIFEST_JSON));

    let manifest = cache.get(&version).expect("manifest");
    assert!(manifest.scripts.by_tag(ScriptTag::Arabic).is_some());
    assert!(temp.path().join("v5/.manifest").exists());
    assert_eq!(cache.metrics().fetches, 1);

    // Served from disk now, no second download.
    let _ = cache.get(&version).expect("manifest");
    assert_eq!(cache.metrics().fetches, 1);
}

#[test]
fn digest_mismatch_is_absence_and_nothing_is_cached() {
    let port = spawn_manifest_server();
    let temp = TempDir::new().expect("temp dir");
    let cache = build_cache(&temp, port);
    let version = FontVersion::new(5, "v5").with_digest(ManifestDigest::of(b"tampered"));

    assert!(cache.get(&version).is_none());
    assert!(!temp.path().join("v5/.manifest").exists());
    assert_eq!(cache.metrics().fetch_failures, 1);
}

#[test]
fn missing_remote_manifest_is_absence() {
    let port = spawn_manifest_server();
    let temp = TempDir::new().expect("temp dir");
    let cache = build_cache(&temp, port);
    let version = FontVersion::new(9, "v9");

    assert!(cache.get(&version).is_none());
    assert!(!temp.path().join("v9/.manifest").exists());
}
