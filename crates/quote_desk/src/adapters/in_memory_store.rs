// Rust guideline compliant 2026-02-23

//! In-memory adapter for the `KeyValueStore` port.
//!
//! Intended for demo runs and unit tests only; contents are lost on exit.
//! `StoreError::Unavailable` is part of the port contract but is never
//! returned by this adapter.

use std::cell::RefCell;
use std::collections::BTreeMap;

use domain::{KeyValueStore, StoreError};

/// `KeyValueStore` adapter backed by a `BTreeMap`, so prefix listings come
/// back in ascending key order for free.
// #[allow] not #[expect]: dead_code fires in quote_desk_sqlite but NOT in
// quote_desk, so #[expect] would be unfulfilled in one of the two binaries.
#[allow(dead_code, reason = "used by quote_desk binary; dead in quote_desk_sqlite")]
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RefCell<BTreeMap<String, String>>,
}

impl InMemoryStore {
    /// Create an empty store.
    // See struct-level allow(dead_code) comment above.
    #[allow(dead_code, reason = "used by quote_desk binary; dead in quote_desk_sqlite")]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` when no key is stored.
    #[cfg(test)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.inner.borrow_mut().insert(key.to_owned(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .inner
            .borrow()
            .range(prefix.to_owned()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
