//! Authentication state extractor for bearer tokens.
//!
//! Tokens are verified by signature alone; there is no session table to
//! consult, so a valid signature is the whole authentication decision.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::TRACING_TARGET_AUTHENTICATION;
use crate::handler::{Error, ErrorKind, Result};
use crate::service::{TokenClaims, TokenKeys};

/// Verified claims of the caller, extracted from the `Authorization` header.
///
/// Extraction fails with:
/// - [`ErrorKind::MissingAuthToken`] when the header is absent or not Bearer
/// - [`ErrorKind::Unauthorized`] when the token fails verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState(pub TokenClaims);

impl AuthState {
    /// Returns the authenticated user's id.
    #[inline]
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.0.sub
    }
}

impl<S> FromRequestParts<S> for AuthState
where
    S: Send + Sync + 'static,
    TokenKeys: FromRef<S>,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Reuse the verification result for later extractors in the request.
        if let Some(auth_state) = parts.extensions.get::<Self>() {
            return Ok(auth_state.clone());
        }

        let TypedHeader(bearer_auth) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ErrorKind::MissingAuthToken.into_error())?;

        let token_keys = TokenKeys::from_ref(state);
        let claims = token_keys.verify(bearer_auth.token()).ok_or_else(|| {
            tracing::debug!(
                target: TRACING_TARGET_AUTHENTICATION,
                "rejecting request with unverifiable token"
            );
            ErrorKind::Unauthorized.with_message("Invalid token")
        })?;

        let auth_state = Self(claims);
        parts.extensions.insert(auth_state.clone());
        Ok(auth_state)
    }
}
