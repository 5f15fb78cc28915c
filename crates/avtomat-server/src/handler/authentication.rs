//! Registration and login handlers.

use avtomat_data::CredentialStore;
use avtomat_data::model::{NewUser, UserProfile};
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router, extract::State};
use serde::{Deserialize, Serialize};

use crate::handler::{Error, ErrorKind, Result};
use crate::service::{ServiceState, TokenKeys};

/// Tracing target for authentication operations.
const TRACING_TARGET: &str = "avtomat_server::handler::authentication";

/// Credentials presented on login.
#[derive(Debug, Clone, Deserialize)]
struct LoginRequest {
    email: Option<String>,
    password: Option<String>,
}

/// The bearer token handed back on a successful login.
#[derive(Debug, Clone, Serialize)]
struct LoginResponse {
    token: String,
}

async fn register(
    State(credentials): State<CredentialStore>,
    Json(request): Json<NewUser>,
) -> Result<(StatusCode, Json<UserProfile>)> {
    let profile = credentials.register(request).await.map_err(|error| {
        // The route contract reports a duplicate email as a bad request,
        // same as a missing field.
        match error.kind() {
            avtomat_core::ErrorKind::Conflict => {
                ErrorKind::BadRequest.with_message("User already exists")
            }
            _ => Error::from(error),
        }
    })?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %profile.id,
        "user registered"
    );

    Ok((StatusCode::CREATED, Json(profile)))
}

async fn login(
    State(credentials): State<CredentialStore>,
    State(token_keys): State<TokenKeys>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>)> {
    let email = request.email.unwrap_or_default();
    let password = request.password.unwrap_or_default();

    let profile = credentials.authenticate(&email, &password).await?;
    let token = token_keys.issue(&profile)?;

    tracing::info!(
        target: TRACING_TARGET,
        user_id = %profile.id,
        "user logged in"
    );

    Ok((StatusCode::OK, Json(LoginResponse { token })))
}

/// Returns a [`Router`] with all authentication routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn register_returns_public_view() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "pw", "name": "Ada"}))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);

        let body: serde_json::Value = response.json();
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["name"], "Ada");
        assert!(body["id"].is_string());
        // The stored secret never leaves the server.
        assert!(body.get("passwordHash").is_none());
        assert!(body.get("passwordSalt").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn register_rejects_missing_fields_and_duplicates() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server
            .post("/auth/register")
            .json(&json!({"password": "pw"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);

        let response = server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);

        server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "pw"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);
        let response = server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "other"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn login_issues_a_token() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "pw"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "ada@example.com", "password": "pw"}))
            .await;
        response.assert_status_ok();

        let body: serde_json::Value = response.json();
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        Ok(())
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "pw"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "ada@example.com", "password": "wrong"}))
            .await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);

        let response = server
            .post("/auth/login")
            .json(&json!({"email": "nobody@example.com", "password": "pw"}))
            .await;
        response.assert_status(axum::http::StatusCode::UNAUTHORIZED);
        Ok(())
    }
}
