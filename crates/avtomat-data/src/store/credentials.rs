//! User identities and salted password digests.

use std::sync::Arc;

use avtomat_core::{Error, Result, new_record_id};
use sha2::{Digest, Sha256};
use tokio::sync::RwLock;

use crate::model::{NewUser, User, UserProfile};
use crate::snapshot::SnapshotFile;

/// Tracing target for credential operations.
const TRACING_TARGET: &str = "avtomat_data::store::credentials";

/// Holds user records and verifies passwords against stored digests.
///
/// Tokens are not this store's concern: callers authenticate to a
/// [`UserProfile`] and bind whatever capability they issue to its id.
#[derive(Clone)]
pub struct CredentialStore {
    users: Arc<RwLock<Vec<User>>>,
    snapshot: SnapshotFile,
}

impl CredentialStore {
    /// Loads the store from its snapshot; a missing document starts empty.
    pub async fn load(snapshot: SnapshotFile) -> Self {
        let users: Vec<User> = snapshot.load().await;
        tracing::debug!(
            target: TRACING_TARGET,
            count = users.len(),
            "credential store loaded"
        );
        Self {
            users: Arc::new(RwLock::new(users)),
            snapshot,
        }
    }

    /// Registers a new user.
    ///
    /// Rejects a missing email or password with a validation error and a
    /// duplicate email with a conflict. On success the stored record carries
    /// a fresh random salt and the digest of `password || salt`; the caller
    /// gets the stripped public view.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile> {
        let email = match new_user.email.filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => return Err(Error::validation("email is required")),
        };
        let password = match new_user.password.filter(|p| !p.is_empty()) {
            Some(password) => password,
            None => return Err(Error::validation("password is required")),
        };

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            tracing::debug!(
                target: TRACING_TARGET,
                email = %email,
                "registration rejected, email exists"
            );
            return Err(Error::conflict("user exists"));
        }

        let salt = generate_salt();
        let user = User {
            id: new_record_id(),
            email,
            display_name: new_user.display_name,
            password_hash: password_digest(&password, &salt),
            password_salt: salt,
        };
        let profile = user.profile();

        users.push(user);
        self.snapshot.persist(&users).await?;

        tracing::info!(
            target: TRACING_TARGET,
            user_id = %profile.id,
            "user registered"
        );

        Ok(profile)
    }

    /// Verifies an email/password pair against the stored digest.
    ///
    /// A digest is computed whether or not the email is known, so the
    /// failure path does not reveal which half of the pair was wrong.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<UserProfile> {
        let users = self.users.read().await;
        let user = users.iter().find(|u| u.email == email);

        let password_valid = match user {
            Some(user) => {
                digest_matches(&password_digest(password, &user.password_salt), &user.password_hash)
            }
            None => {
                let _ = password_digest(password, "dummy-salt");
                false
            }
        };

        match user {
            Some(user) if password_valid => Ok(user.profile()),
            _ => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    email = %email,
                    user_exists = user.is_some(),
                    "authentication failed"
                );
                Err(Error::unauthorized().with_message("invalid credentials"))
            }
        }
    }

}

/// Returns a fresh random hex salt.
fn generate_salt() -> String {
    let bytes: [u8; 8] = rand::random();
    hex::encode(bytes)
}

/// Hex digest of `password || salt`.
fn password_digest(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compares two hex digests without short-circuiting on length-equal inputs.
fn digest_matches(computed: &str, stored: &str) -> bool {
    let computed = computed.as_bytes();
    let stored = stored.as_bytes();
    if computed.len() != stored.len() {
        return false;
    }
    computed
        .iter()
        .zip(stored)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
