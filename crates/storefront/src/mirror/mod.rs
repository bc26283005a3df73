//! Persistent key-value mirror of the storefront state.
//!
//! The in-memory state is authoritative while the storefront runs; the
//! mirror is a write-through copy used to seed that state on the next start.
//!
//! # Format
//!
//! Every value is wrapped in a versioned envelope:
//!
//! ```json
//! {"version": 1, "data": [ ... ]}
//! ```
//!
//! A payload with another version, or one that no longer decodes as the
//! expected type, reads back as absent. Bare values written before the
//! envelope existed are still accepted and get re-wrapped on the next write.
//!
//! # Degradation
//!
//! When the backing store fails, [`Mirror::write_through`] switches the mirror
//! to memory-only mode: the failure is logged once and later writes are
//! skipped for the rest of the session. Deletions are still attempted.

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Current envelope version.
pub const SCHEMA_VERSION: u32 = 1;

/// Keys under which the storefront mirrors its state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MirrorKey {
    /// The authenticated identity, absent when anonymous.
    CurrentUser,
    /// Cart line items.
    Cart,
    /// Wishlist entries.
    Wishlist,
}

impl MirrorKey {
    /// The storage key string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentUser => "currentUser",
            Self::Cart => "cart",
            Self::Wishlist => "wishlist",
        }
    }
}

impl std::fmt::Display for MirrorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by mirror operations.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The backing store could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(#[from] StoreError),

    /// The value could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

/// Whether writes still reach the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorMode {
    WriteThrough,
    MemoryOnly,
}

/// Typed, versioned access to a [`KeyValueStore`].
pub struct Mirror {
    store: Box<dyn KeyValueStore>,
    mode: MirrorMode,
}

impl std::fmt::Debug for Mirror {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mirror").field("mode", &self.mode).finish_non_exhaustive()
    }
}

impl Mirror {
    /// Wrap a store.
    #[must_use]
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
            mode: MirrorMode::WriteThrough,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> MirrorMode {
        self.mode
    }

    /// `true` once a storage failure has switched the mirror to memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.mode == MirrorMode::MemoryOnly
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError` if serialization or the store write fails.
    pub fn put<T: Serialize>(&self, key: MirrorKey, value: &T) -> Result<(), MirrorError> {
        let payload = serde_json::to_string(&EnvelopeRef {
            version: SCHEMA_VERSION,
            data: value,
        })?;
        self.store.write(key.as_str(), &payload)?;
        Ok(())
    }

    /// Read and decode the value under `key`.
    ///
    /// Unset keys and payloads that fail to decode both come back as
    /// `Ok(None)`; only an unreadable store is an error.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::StorageUnavailable` if the store cannot be read.
    pub fn get<T: DeserializeOwned>(&self, key: MirrorKey) -> Result<Option<T>, MirrorError> {
        let Some(raw) = self.store.read(key.as_str())? else {
            return Ok(None);
        };
        Ok(decode(key, &raw))
    }

    /// Delete the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::StorageUnavailable` if the store cannot be modified.
    pub fn remove(&self, key: MirrorKey) -> Result<(), MirrorError> {
        self.store.delete(key.as_str())?;
        Ok(())
    }

    /// Persist `value`, degrading to memory-only mode on failure.
    ///
    /// Returns `true` if the value reached the store.
    pub fn write_through<T: Serialize>(&mut self, key: MirrorKey, value: &T) -> bool {
        if self.is_degraded() {
            return false;
        }
        match self.put(key, value) {
            Ok(()) => true,
            Err(e) => {
                self.degrade(key, &e);
                false
            }
        }
    }

    /// Delete `key`, degrading to memory-only mode on failure.
    ///
    /// Still attempted in memory-only mode, so logging out never leaves a
    /// `currentUser` entry behind.
    ///
    /// Returns `true` if the store was updated.
    pub fn forget(&mut self, key: MirrorKey) -> bool {
        match self.remove(key) {
            Ok(()) => true,
            Err(e) if self.is_degraded() => {
                tracing::warn!(key = %key, error = %e, "Could not delete mirror entry");
                false
            }
            Err(e) => {
                self.degrade(key, &e);
                false
            }
        }
    }

    /// Read `key` for start-up seeding, degrading to memory-only mode if the
    /// store cannot be read.
    pub fn restore<T: DeserializeOwned>(&mut self, key: MirrorKey) -> Option<T> {
        if self.is_degraded() {
            return None;
        }
        match self.get(key) {
            Ok(value) => value,
            Err(e) => {
                self.degrade(key, &e);
                None
            }
        }
    }

    fn degrade(&mut self, key: MirrorKey, error: &MirrorError) {
        tracing::warn!(
            key = %key,
            error = %error,
            "Local storage unavailable, continuing in memory only for this session"
        );
        self.mode = MirrorMode::MemoryOnly;
    }
}

fn decode<T: DeserializeOwned>(key: MirrorKey, raw: &str) -> Option<T> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding unreadable mirror entry");
            return None;
        }
    };

    let payload = match split_envelope(value) {
        Ok(Some(data)) => data,
        Ok(None) => return None,
        Err(bare) => {
            tracing::debug!(key = %key, "Reading mirror entry without envelope");
            bare
        }
    };

    match serde_json::from_value(payload) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Discarding mirror entry with unexpected shape");
            None
        }
    }
}

/// `Ok(Some(data))` for a current envelope, `Ok(None)` for an envelope of
/// another version, `Err(value)` when the value is not an envelope at all.
fn split_envelope(value: Value) -> Result<Option<Value>, Value> {
    let Value::Object(mut map) = value else {
        return Err(value);
    };
    let is_envelope =
        map.len() == 2 && map.contains_key("data") && map.get("version").is_some_and(Value::is_u64);
    if !is_envelope {
        return Err(Value::Object(map));
    }

    let version = map.get("version").and_then(Value::as_u64);
    if version != Some(u64::from(SCHEMA_VERSION)) {
        tracing::warn!(?version, expected = SCHEMA_VERSION, "Ignoring mirror entry from another schema version");
        return Ok(None);
    }
    Ok(map.remove("data"))
}
