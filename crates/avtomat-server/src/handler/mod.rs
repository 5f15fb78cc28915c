//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod authentication;
mod error;
mod executions;
mod monitors;
mod workflows;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, ErrorResponse, Result};
use crate::service::ServiceState;

#[inline]
async fn fallback() -> Response {
    ErrorKind::NotFound.into_response()
}

/// Returns a [`Router`] with every route of the service.
///
/// The caller supplies state via [`Router::with_state`] and wraps the result
/// in whatever middleware the deployment needs (CORS, request tracing).
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(authentication::routes())
        .merge(workflows::routes())
        .merge(executions::routes())
        .merge(monitors::routes())
        .fallback(fallback)
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use axum_test::TestServer;
    use serde_json::json;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] over an in-memory service with a short
    /// completion delay.
    pub async fn create_test_server() -> anyhow::Result<TestServer> {
        let config = ServiceConfig {
            completion_delay: Duration::from_millis(10),
            ..ServiceConfig::default()
        };
        let state = ServiceState::from_config(&config).await;
        let app = routes().with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Registers a throwaway user and returns a valid bearer token.
    pub async fn bearer_token(server: &TestServer) -> anyhow::Result<String> {
        server
            .post("/auth/register")
            .json(&json!({"email": "tester@example.com", "password": "pw"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let body: serde_json::Value = server
            .post("/auth/login")
            .json(&json!({"email": "tester@example.com", "password": "pw"}))
            .await
            .json();
        Ok(body["token"].as_str().unwrap_or_default().to_owned())
    }

    #[tokio::test]
    async fn unknown_routes_return_a_json_error() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/nope").await;
        response.assert_status(axum::http::StatusCode::NOT_FOUND);
        let body: serde_json::Value = response.json();
        assert_eq!(body, json!({"error": "Not found"}));
        Ok(())
    }

    #[tokio::test]
    async fn full_register_to_poll_scenario() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        server
            .post("/auth/register")
            .json(&json!({"email": "ada@example.com", "password": "pw", "name": "Ada"}))
            .await
            .assert_status(axum::http::StatusCode::CREATED);

        let login: serde_json::Value = server
            .post("/auth/login")
            .json(&json!({"email": "ada@example.com", "password": "pw"}))
            .await
            .json();
        let token = login["token"].as_str().unwrap();

        let workflow: serde_json::Value = server
            .post("/workflows")
            .authorization_bearer(token)
            .json(&json!({"name": "Nightly sync"}))
            .await
            .json();
        let workflow_id = workflow["id"].as_str().unwrap();

        let accepted: serde_json::Value = server
            .post(&format!("/workflows/{workflow_id}/execute"))
            .authorization_bearer(token)
            .await
            .json();
        let execution_id = accepted["executionId"].as_str().unwrap();

        tokio::time::sleep(Duration::from_millis(100)).await;

        let execution: serde_json::Value =
            server.get(&format!("/executions/{execution_id}")).await.json();
        assert_eq!(execution["status"], "success");
        assert_eq!(execution["logs"][0]["message"], "Execution finished");
        Ok(())
    }
}
