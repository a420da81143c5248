//! Main entry point for the UserDesk backend.
//!
//! This file initializes tracing, loads configuration, opens the database,
//! and mounts the session and admin routes on the Axum server.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod services;
mod state;
mod utils;

use crate::api::common::ApiResponse;
use anyhow::Context;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use repositories::user_repository::SqliteUserRepository;
use services::user_service::UserService;
use state::AppState;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;

    let users = Arc::new(SqliteUserRepository::new(db.pool().clone()));
    let state = AppState::new(users, &config.session, config.bcrypt_cost);

    if let Some(admin) = &config.admin {
        UserService::new(&state)
            .ensure_admin(admin)
            .await
            .with_context(|| format!("failed to provision admin {}", admin.email))?;
    }

    let app = build_app(state);

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    info!("Starting UserDesk server on port {}", config.server_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    Ok(())
}

/// Assembles the full router around a ready `AppState`.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::auth_router())
        .nest("/admin", api::admin::routes::admin_router())
        .layer(Extension(state))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        serde_json::json!({
            "service": "UserDesk Backend",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to UserDesk API",
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
