//! User identities as held by the identity service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::credential::StoredCredential;
use super::email::Email;
use super::id::UserId;

/// A user row from the `users` table.
///
/// Display attributes (names, phone, address...) are not interpreted by the
/// storefront; they are kept in `attributes` so that whatever the service
/// returns survives a round trip through the local mirror.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: UserId,
    pub email: Email,
    #[serde(rename = "password")]
    pub credential: StoredCredential,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub is_admin: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl UserIdentity {
    /// A human-readable name for greetings, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let part = |key: &str| {
            self.attributes
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        match (part("first_name"), part("last_name")) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_owned(),
            (None, None) => part("name").map_or_else(|| self.email.to_string(), str::to_owned),
        }
    }
}

/// The body posted to the identity service to create a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIdentity {
    pub email: Email,
    #[serde(rename = "password")]
    pub credential: StoredCredential,
    pub is_admin: bool,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_unknown_fields_roundtrip() {
        let row = json!({
            "id": "u1",
            "email": "marie@boutique.fr",
            "password": "cGFzcw==",
            "is_admin": true,
            "first_name": "Marie",
            "phone": "0600000000"
        });

        let identity: UserIdentity = serde_json::from_value(row.clone()).unwrap();
        assert!(identity.is_admin);
        assert_eq!(identity.attributes.len(), 2);
        assert_eq!(serde_json::to_value(&identity).unwrap(), row);
    }

    #[test]
    fn test_missing_admin_flag_defaults_to_false() {
        let identity: UserIdentity = serde_json::from_value(json!({
            "id": "u2", "email": "paul@boutique.fr", "password": "x"
        }))
        .unwrap();
        assert!(!identity.is_admin);
        assert_eq!(identity.display_name(), "paul@boutique.fr");
    }

    #[test]
    fn test_null_admin_flag_defaults_to_false() {
        let identity: UserIdentity = serde_json::from_value(json!({
            "id": "u4", "email": "jules@boutique.fr", "password": "x", "is_admin": null
        }))
        .unwrap();
        assert!(!identity.is_admin);
        assert!(identity.attributes.is_empty());
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        let identity: UserIdentity = serde_json::from_value(json!({
            "id": "u3", "email": "a@b.c", "password": "x",
            "first_name": "Marie", "last_name": "Curie"
        }))
        .unwrap();
        assert_eq!(identity.display_name(), "Marie Curie");
    }
}
