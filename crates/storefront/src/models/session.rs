//! Session state.
//!
//! The storefront holds exactly one session value: anonymous, or
//! authenticated as a user identity. The identity is mirrored under the
//! `currentUser` key.

use boutique_core::UserIdentity;

/// Current authentication state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(UserIdentity),
}

impl Session {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Authenticated and carrying the administrator flag.
    #[must_use]
    pub const fn is_administrator(&self) -> bool {
        match self {
            Self::Authenticated(identity) => identity.is_admin,
            Self::Anonymous => false,
        }
    }

    /// The authenticated identity, if any.
    #[must_use]
    pub const fn identity(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            Self::Anonymous => None,
        }
    }
}

impl From<Option<UserIdentity>> for Session {
    fn from(identity: Option<UserIdentity>) -> Self {
        identity.map_or(Self::Anonymous, Self::Authenticated)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn identity(is_admin: bool) -> UserIdentity {
        serde_json::from_value(json!({
            "id": "u1", "email": "a@b.c", "password": "x", "is_admin": is_admin
        }))
        .unwrap()
    }

    #[test]
    fn test_anonymous_by_default() {
        let session = Session::default();
        assert!(!session.is_authenticated());
        assert!(!session.is_administrator());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_administrator_requires_flag() {
        assert!(!Session::Authenticated(identity(false)).is_administrator());
        assert!(Session::Authenticated(identity(true)).is_administrator());
    }

    #[test]
    fn test_from_restored_identity() {
        assert_eq!(Session::from(None), Session::Anonymous);
        assert!(Session::from(Some(identity(false))).is_authenticated());
    }
}
