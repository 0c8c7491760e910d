//! Per-package write serialization.
//!
//! The filesystem alone gives last-writer-wins semantics for two
//! concurrent saves of the same package; the store additionally holds a
//! per-name async mutex around each write so temporary files and the
//! final rename never interleave for one name. Saves to different names
//! proceed concurrently, and reads take no lock.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// A table of per-name async mutexes, created on first use.
#[derive(Default)]
pub(crate) struct NameLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl NameLocks {
    pub(crate) async fn lock(&self, name: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap();
            locks.entry(name.to_string()).or_default().clone()
        };
        lock.lock_owned().await
    }
}
