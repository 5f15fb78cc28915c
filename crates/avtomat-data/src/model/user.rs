//! User identity records.

use serde::{Deserialize, Serialize};

/// A registered user, as stored in the credential store and its snapshot.
///
/// Records are created at registration and never mutated or deleted
/// afterwards. The salt and digest never leave the store; callers receive
/// a [`UserProfile`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque unique identifier.
    pub id: String,
    /// Email address, unique across the collection, stored as given.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Random salt generated at registration.
    pub password_salt: String,
    /// Hex digest of `password || salt`.
    pub password_hash: String,
}

impl User {
    /// Returns the public view of this record, with salt and digest stripped.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.display_name.clone(),
        }
    }
}

/// Registration payload.
///
/// All fields are optional at the wire level; the credential store rejects
/// missing email or password with a validation error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    /// Email address to register.
    pub email: Option<String>,
    /// Plaintext password, hashed before storage.
    pub password: Option<String>,
    /// Optional display name.
    #[serde(rename = "name")]
    pub display_name: Option<String>,
}

/// Public view of a [`User`] with credential material stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Opaque unique identifier.
    pub id: String,
    /// Email address.
    pub email: String,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_strips_credentials() {
        let user = User {
            id: "u1".to_owned(),
            email: "a@b.com".to_owned(),
            display_name: Some("Ada".to_owned()),
            password_salt: "salt".to_owned(),
            password_hash: "hash".to_owned(),
        };

        let profile = user.profile();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["name"], "Ada");
        assert!(json.get("passwordSalt").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[test]
    fn new_user_accepts_partial_payloads() {
        let new_user: NewUser = serde_json::from_str(r#"{"email":"a@b.com"}"#).unwrap();
        assert_eq!(new_user.email.as_deref(), Some("a@b.com"));
        assert!(new_user.password.is_none());
        assert!(new_user.display_name.is_none());
    }
}
