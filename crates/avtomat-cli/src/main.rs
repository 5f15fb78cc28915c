#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process;

use avtomat_server::handler::routes;
use avtomat_server::service::ServiceState;
use axum::Router;
use axum::http::{Method, header};
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Cli;

/// Tracing target for startup events.
pub const TRACING_TARGET_SERVER_STARTUP: &str = "avtomat_cli::server::startup";
/// Tracing target for shutdown events.
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "avtomat_cli::server::shutdown";
/// Tracing target for configuration events.
pub const TRACING_TARGET_CONFIG: &str = "avtomat_cli::config";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            "application terminated successfully"
        );
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    Cli::init_tracing();
    log_startup_info();
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.service.to_service_config()).await;
    let router = create_router(state.clone());

    server::serve(router, cli.server).await?;

    // Let in-flight execution completions land before the process exits.
    state.shutdown().await;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Request tracing (outermost)
/// 2. CORS
/// 3. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState) -> Router {
    routes()
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Permissive CORS for browser clients on any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Logs startup information.
fn log_startup_info() {
    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        version = env!("CARGO_PKG_VERSION"),
        "starting avtomat server"
    );
}
