//! Round-robin pool of YouTube Data API keys.
//!
//! The Data API meters quota per key, so a dashboard that polls many channels
//! burns through a single key's daily budget quickly. The pool holds every key
//! the user has configured and hands them out in a fixed rotation; the client
//! advances to the next key whenever the current one reports quota exhaustion.

use crate::youtube_api::error::ApiError;

/// An ordered pool of API keys with a rotating cursor.
///
/// Selection is plain round-robin: no health scoring is kept between calls, so
/// a key that failed earlier is eligible again on its next turn in the cycle.
/// The per-call attempt bound lives in the client, not here.
///
/// The cursor is always in `[0, len)` while the pool is non-empty. Replacing
/// the pool via [`KeyPool::configure`] resets the cursor to the first key.
#[derive(Debug, Default)]
pub struct KeyPool {
    keys: Vec<String>,
    cursor: usize,
}

impl KeyPool {
    /// Creates a pool over the given keys, starting rotation at the first.
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys, cursor: 0 }
    }

    /// Replaces the entire pool and resets the cursor to the first key.
    ///
    /// This is the settings-change path: previous rotation state is
    /// discarded, so reloading the same key list always yields the same
    /// rotation order.
    pub fn configure(&mut self, keys: Vec<String>) {
        self.keys = keys;
        self.cursor = 0;
    }

    /// Returns the key at the cursor and advances the cursor by one position,
    /// wrapping modulo the pool length.
    ///
    /// Fails with [`ApiError::NoKeysConfigured`] when the pool is empty.
    pub fn next_key(&mut self) -> Result<String, ApiError> {
        if self.keys.is_empty() {
            return Err(ApiError::NoKeysConfigured);
        }
        let key = self.keys[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.keys.len();
        Ok(key)
    }

    /// Number of keys currently in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the pool holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
