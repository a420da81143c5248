//! Defines the HTTP routes for session management.
//!
//! Admin login lives with the rest of the admin surface in `api::admin`.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all session routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
}
