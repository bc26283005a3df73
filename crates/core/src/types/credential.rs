//! Stored credential type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The transformed form of a password, as kept in the `users` table.
///
/// Depending on when the row was written this is either a PHC hash string
/// (`$argon2id$...`) or the legacy base64 encoding. Never the raw password.
/// `Debug` output is redacted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredCredential(String);

impl StoredCredential {
    /// Wrap an already-transformed credential.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// The stored string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is a PHC-format hash rather than a legacy encoding.
    #[must_use]
    pub fn is_phc_hash(&self) -> bool {
        self.0.starts_with('$')
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StoredCredential([REDACTED])")
    }
}

impl AsRef<str> for StoredCredential {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
