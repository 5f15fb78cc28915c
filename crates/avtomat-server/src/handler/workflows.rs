//! Workflow CRUD handlers.
//!
//! Reads are public; every mutation requires a verified bearer token.

use avtomat_data::WorkflowRegistry;
use avtomat_data::model::{NewWorkflow, Workflow, WorkflowChanges};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router, extract::Path, extract::State};
use serde::Serialize;

use crate::extract::AuthState;
use crate::handler::Result;
use crate::service::ServiceState;

/// Tracing target for workflow operations.
const TRACING_TARGET: &str = "avtomat_server::handler::workflows";

/// Acknowledgement body for a successful delete.
#[derive(Debug, Clone, Serialize)]
struct DeleteResponse {
    success: bool,
}

async fn list_workflows(
    State(registry): State<WorkflowRegistry>,
) -> Result<(StatusCode, Json<Vec<Workflow>>)> {
    let workflows = registry.list().await;
    Ok((StatusCode::OK, Json(workflows)))
}

async fn get_workflow(
    State(registry): State<WorkflowRegistry>,
    Path(workflow_id): Path<String>,
) -> Result<(StatusCode, Json<Workflow>)> {
    let workflow = registry.get(&workflow_id).await?;
    Ok((StatusCode::OK, Json(workflow)))
}

async fn create_workflow(
    State(registry): State<WorkflowRegistry>,
    auth_state: AuthState,
    Json(request): Json<NewWorkflow>,
) -> Result<(StatusCode, Json<Workflow>)> {
    let workflow = registry.create(request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        workflow_id = %workflow.id,
        user_id = %auth_state.user_id(),
        "workflow created"
    );

    Ok((StatusCode::CREATED, Json(workflow)))
}

async fn update_workflow(
    State(registry): State<WorkflowRegistry>,
    auth_state: AuthState,
    Path(workflow_id): Path<String>,
    Json(request): Json<WorkflowChanges>,
) -> Result<(StatusCode, Json<Workflow>)> {
    let workflow = registry.update(&workflow_id, request).await?;

    tracing::info!(
        target: TRACING_TARGET,
        workflow_id = %workflow.id,
        user_id = %auth_state.user_id(),
        "workflow updated"
    );

    Ok((StatusCode::OK, Json(workflow)))
}

async fn delete_workflow(
    State(registry): State<WorkflowRegistry>,
    auth_state: AuthState,
    Path(workflow_id): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>)> {
    registry.delete(&workflow_id).await?;

    tracing::info!(
        target: TRACING_TARGET,
        workflow_id = %workflow_id,
        user_id = %auth_state.user_id(),
        "workflow deleted"
    );

    Ok((StatusCode::OK, Json(DeleteResponse { success: true })))
}

/// Returns a [`Router`] with all workflow CRUD routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .route("/workflows", get(list_workflows).post(create_workflow))
        .route(
            "/workflows/{workflow_id}",
            get(get_workflow)
                .put(update_workflow)
                .delete(delete_workflow),
        )
}
