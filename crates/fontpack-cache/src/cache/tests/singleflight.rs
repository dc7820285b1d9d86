use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use fontpack_core::FontVersion;
use tempfile::TempDir;

use super::{MANIFEST_JSON, ScriptedFetcher, build_cache};
use crate::cache::singleflight::Singleflight;

#[test]
fn concurrent_gets_for_one_version_fetch_once() {
    let temp = TempDir::new().expect("temp dir");
    let version = FontVersion::new(5, "v5");
    let fetcher = Arc::new(ScriptedFetcher::slow(
        MANIFEST_JSON,
        Duration::from_millis(50),
    ));
    let cache = build_cache(&temp, Arc::clone(&fetcher));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let cache = cache.clone();
        let version = version.clone();
        handles.push(std::thread::spawn(move || cache.get(&version)));
    }
    for handle in handles {
        assert!(handle.join().expect("thread").is_some());
    }

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn distinct_keys_do_not_contend() {
    let flight = Singleflight::new();
    let _a = flight.acquire("v1/.manifest".to_string());
    // Holding one key must not block another.
    let _b = flight.acquire("v2/.manifest".to_string());
}

#[test]
fn key_is_reacquirable_after_release() {
    let flight = Singleflight::new();
    drop(flight.acquire("v1/.manifest".to_string()));
    let _again = flight.acquire("v1/.manifest".to_string());
}

#[test]
fn waiters_block_until_the_winner_releases() {
    let flight = Singleflight::new();
    let guard = flight.acquire("v1/.manifest".to_string());
    let flight_clone = flight.clone();
    let waiter = std::thread::spawn(move || {
        let _guard = flight_clone.acquire("v1/.manifest".to_string());
    });
    std::thread::sleep(Duration::from_millis(20));
    assert!(!waiter.is_finished());
    drop(guard);
    waiter.join().expect("waiter");
}
