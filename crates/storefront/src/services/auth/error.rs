//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during login and registration.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] boutique_core::EmailError),

    /// No identity matched the email and password. Deliberately does not say
    /// which of the two was wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An identity with this email already exists.
    #[error("an identity with this email already exists")]
    DuplicateIdentity,

    /// Password rejected before hashing.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// The identity service did not return the created identity.
    #[error("identity service did not create the account")]
    CreationFailed,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Message safe to show to the person using the storefront.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(_) => "Invalid email address".to_string(),
            Self::InvalidCredentials => "Invalid email or password".to_string(),
            Self::DuplicateIdentity => "This email is already in use".to_string(),
            Self::WeakPassword(msg) => msg.clone(),
            Self::CreationFailed | Self::PasswordHash => {
                "Could not create the account, please try again".to_string()
            }
        }
    }
}
