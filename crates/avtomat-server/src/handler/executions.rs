//! Execution trigger and polling handlers.

use avtomat_data::ExecutionLedger;
use avtomat_data::model::Execution;
use avtomat_engine::ExecutionEngine;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router, extract::Path, extract::State};
use serde::Serialize;

use crate::extract::AuthState;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for execution operations.
const TRACING_TARGET: &str = "avtomat_server::handler::executions";

/// Acknowledgement body for an accepted trigger.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExecuteResponse {
    execution_id: String,
}

async fn execute_workflow(
    State(engine): State<ExecutionEngine>,
    auth_state: AuthState,
    Path(workflow_id): Path<String>,
) -> Result<(StatusCode, Json<ExecuteResponse>)> {
    let execution_id = engine.trigger(&workflow_id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        execution_id = %execution_id,
        workflow_id = %workflow_id,
        user_id = %auth_state.user_id(),
        "execution accepted"
    );

    Ok((StatusCode::ACCEPTED, Json(ExecuteResponse { execution_id })))
}

async fn list_workflow_executions(
    State(ledger): State<ExecutionLedger>,
    Path(workflow_id): Path<String>,
) -> Result<(StatusCode, Json<Vec<Execution>>)> {
    let executions = ledger.list_by_workflow(&workflow_id).await;
    Ok((StatusCode::OK, Json(executions)))
}

async fn get_execution(
    State(ledger): State<ExecutionLedger>,
    Path(execution_id): Path<String>,
) -> Result<(StatusCode, Json<Execution>)> {
    let execution = ledger.get(&execution_id).await?;
    Ok((StatusCode::OK, Json(execution)))
}

/// Returns a [`Router`] with all execution routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/workflows/{workflow_id}/execute", post(execute_workflow))
        .route(
            "/workflows/{workflow_id}/executions",
            get(list_workflow_executions),
        )
        .route("/executions/{execution_id}", get(get_execution))
}
