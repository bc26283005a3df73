//! Authentication service.
//!
//! Login and registration are decided against the full identity list
//! returned by the identity service: there is no server-side login call.
//!
//! # Credential schemes
//!
//! - `argon2` - salted Argon2id PHC strings (default for new accounts)
//! - `legacy` - base64 of the password, as written by the first version of
//!   the storefront. Not a security boundary.
//!
//! Verification follows the stored value, not the configured scheme, so
//! accounts created under `legacy` can still log in once `argon2` is on.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};
use tracing::instrument;

use boutique_core::{Email, NewIdentity, StoredCredential, UserIdentity};

use super::IdentityService;

/// How new credentials are transformed before they are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CredentialScheme {
    #[default]
    Argon2,
    Legacy,
}

impl std::fmt::Display for CredentialScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Argon2 => write!(f, "argon2"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for CredentialScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2" => Ok(Self::Argon2),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("invalid credential scheme: {s} (expected argon2 or legacy)")),
        }
    }
}

/// A registration request.
#[derive(Debug)]
pub struct Registration {
    pub email: String,
    pub password: SecretString,
    /// Display attributes stored alongside the identity.
    pub attributes: Map<String, Value>,
}

impl Registration {
    /// A registration with no display attributes.
    #[must_use]
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
            attributes: Map::new(),
        }
    }

    /// Add a display attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Authentication service.
pub struct AuthService<'a, I> {
    identities: &'a I,
    scheme: CredentialScheme,
}

impl<'a, I: IdentityService> AuthService<'a, I> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(identities: &'a I, scheme: CredentialScheme) -> Self {
        Self { identities, scheme }
    }

    /// Find the identity whose email matches exactly and whose stored
    /// credential verifies against `password`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when nothing matches, including
    /// when the identity list could not be fetched.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<UserIdentity, AuthError> {
        let users = self.identities.list_users().await;

        users
            .into_iter()
            .find(|user| user.email.matches(email) && verify_password(password, &user.credential))
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Create a new identity.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password is empty.
    /// Returns `AuthError::DuplicateIdentity` if the email is already used
    /// (exact, case-sensitive comparison).
    /// Returns `AuthError::CreationFailed` if the service returns nothing.
    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn register(&self, registration: Registration) -> Result<UserIdentity, AuthError> {
        let email = Email::parse(&registration.email)?;
        validate_password(&registration.password)?;

        let users = self.identities.list_users().await;
        if users.iter().any(|user| user.email == email) {
            return Err(AuthError::DuplicateIdentity);
        }

        let candidate = NewIdentity {
            email,
            credential: hash_password(&registration.password, self.scheme)?,
            is_admin: false,
            attributes: without_reserved_fields(registration.attributes),
        };

        self.identities
            .create_user(&candidate)
            .await
            .ok_or(AuthError::CreationFailed)
    }
}

/// Drop attributes that would shadow identity fields once flattened.
fn without_reserved_fields(mut attributes: Map<String, Value>) -> Map<String, Value> {
    for reserved in ["id", "email", "password", "is_admin"] {
        attributes.remove(reserved);
    }
    attributes
}

/// Validate password meets requirements.
fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    if password.expose_secret().is_empty() {
        return Err(AuthError::WeakPassword("password cannot be empty".to_string()));
    }
    Ok(())
}

/// Transform a password for storage.
fn hash_password(
    password: &SecretString,
    scheme: CredentialScheme,
) -> Result<StoredCredential, AuthError> {
    match scheme {
        CredentialScheme::Legacy => Ok(StoredCredential::new(legacy_encode(password))),
        CredentialScheme::Argon2 => {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.expose_secret().as_bytes(), &salt)
                .map(|hash| StoredCredential::new(hash.to_string()))
                .map_err(|_| AuthError::PasswordHash)
        }
    }
}

/// Check `password` against a stored credential of either scheme.
fn verify_password(password: &SecretString, stored: &StoredCredential) -> bool {
    if stored.is_phc_hash() {
        return PasswordHash::new(stored.as_str()).is_ok_and(|hash| {
            Argon2::default()
                .verify_password(password.expose_secret().as_bytes(), &hash)
                .is_ok()
        });
    }
    legacy_encode(password) == stored.as_str()
}

fn legacy_encode(password: &SecretString) -> String {
    BASE64.encode(password.expose_secret().as_bytes())
}
