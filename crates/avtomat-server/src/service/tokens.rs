//! Symmetric token signing and verification.

use std::sync::Arc;

use avtomat_data::model::UserProfile;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{ErrorKind, Result};

/// Claims carried by every issued token.
///
/// Tokens are pure capabilities: there is no expiry and no server-side
/// session record, so possession of a validly signed token is the whole
/// proof of identity.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject: the user id the token authenticates.
    pub sub: String,
    /// Email of the user at issue time.
    pub email: String,
    /// Issued at, as epoch seconds.
    pub iat: i64,
}

/// HMAC keys for issuing and verifying bearer tokens.
///
/// Both directions derive from the same shared secret, kept behind an [`Arc`]
/// so the state container stays cheap to clone. The signing scheme is an
/// implementation detail of this type; handlers only see issue and verify.
#[derive(Clone)]
pub struct TokenKeys {
    inner: Arc<TokenKeysInner>,
}

struct TokenKeysInner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Derives signing and verification keys from a shared secret.
    pub fn from_secret(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens never expire and carry no audience.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["sub"]);

        Self {
            inner: Arc::new(TokenKeysInner {
                encoding_key: EncodingKey::from_secret(secret.as_bytes()),
                decoding_key: DecodingKey::from_secret(secret.as_bytes()),
                validation,
            }),
        }
    }

    /// Issues a signed token for the given user.
    pub fn issue(&self, profile: &UserProfile) -> Result<String> {
        let claims = TokenClaims {
            sub: profile.id.clone(),
            email: profile.email.clone(),
            iat: avtomat_core::epoch_millis_now() / 1000,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.inner.encoding_key,
        )
        .map_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_AUTHENTICATION,
                error = %error,
                user_id = %profile.id,
                "failed to encode token"
            );
            ErrorKind::InternalServerError.into_error()
        })
    }

    /// Verifies a token's signature and returns its claims, or `None` when
    /// the token is malformed, tampered with, or signed with another secret.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        match decode::<TokenClaims>(token, &self.inner.decoding_key, &self.inner.validation) {
            Ok(token_data) => Some(token_data.claims),
            Err(error) => {
                tracing::debug!(
                    target: TRACING_TARGET_AUTHENTICATION,
                    error = %error,
                    "token verification failed"
                );
                None
            }
        }
    }
}
