//! In-process locks keyed by document location

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

fn registry() -> &'static Mutex<HashMap<PathBuf, Arc<Mutex<()>>>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    LOCKS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Get the mutex shared by every accessor working on `location`
///
/// Locations are canonicalized when they exist so different spellings of
/// the same file share a lock.
pub fn lock_for(location: &Path) -> Arc<Mutex<()>> {
    let key = location
        .canonicalize()
        .unwrap_or_else(|_| location.to_path_buf());
    let mut locks = registry().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    locks.entry(key).or_default().clone()
}

/// Acquire a lock, ignoring poisoning from a panicked holder
pub fn acquire(lock: &Mutex<()>) -> MutexGuard<'_, ()> {
    lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
