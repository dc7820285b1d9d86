use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::lock_api::ArcMutexGuard;
use parking_lot::{Mutex, RawMutex};

/// Per-key lock that collapses concurrent cache-fill attempts for the same
/// manifest path into one. Losers block until the winner's guard drops, then
/// re-check local storage instead of fetching again.
#[derive(Clone, Debug, Default)]
pub struct Singleflight {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Singleflight {
    pub fn new() -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
        }
    }

    pub fn acquire(&self, key: String) -> SingleflightGuard {
        let lock = self
            .locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = lock.lock_arc();
        SingleflightGuard {
            key,
            lock,
            guard: Some(guard),
            locks: Arc::clone(&self.locks),
        }
    }
}

pub struct SingleflightGuard {
    key: String,
    lock: Arc<Mutex<()>>,
    guard: Option<ArcMutexGuard<RawMutex, ()>>,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl Drop for SingleflightGuard {
    fn drop(&mut self) {
        self.guard = None;
        if Arc::strong_count(&self.lock) == 1 {
            self.locks.remove(&self.key);
        }
    }
}
