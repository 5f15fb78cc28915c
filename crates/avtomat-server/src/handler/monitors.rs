//! Service liveness and greeting handlers.

use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::handler::Result;
use crate::service::ServiceState;

/// Liveness response body.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
}

/// Greeting body served at the root.
#[derive(Debug, Clone, Serialize)]
struct GreetingResponse {
    message: &'static str,
}

async fn health_status() -> Result<(StatusCode, Json<HealthResponse>)> {
    let response = HealthResponse {
        status: "ok",
        service: "avtomat",
    };
    Ok((StatusCode::OK, Json(response)))
}

async fn greeting() -> Result<(StatusCode, Json<GreetingResponse>)> {
    let response = GreetingResponse {
        message: "Hello from the avtomat workflow backend",
    };
    Ok((StatusCode::OK, Json(response)))
}

/// Returns a [`Router`] with all monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/health", get(health_status))
        .route("/", get(greeting))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::handler::test::create_test_server;

    #[tokio::test]
    async fn health_reports_ok() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body, json!({"status": "ok", "service": "avtomat"}));
        Ok(())
    }

    #[tokio::test]
    async fn root_greets() -> anyhow::Result<()> {
        let server = create_test_server().await?;

        let response = server.get("/").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert!(body["message"].as_str().unwrap().contains("avtomat"));
        Ok(())
    }
}
