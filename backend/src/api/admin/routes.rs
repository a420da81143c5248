//! Defines the HTTP routes for the admin surface.

use super::handlers::*;
use crate::auth::handlers::admin_login;
use crate::auth::middleware::{admin_auth, jwt_auth};
use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

pub fn admin_router() -> Router {
    let dashboard = Router::new()
        .route("/dashboard", get(list_users))
        .route("/dashboard/update/{id}", put(update_user))
        .route("/dashboard/delete/{id}", delete(delete_user))
        .route("/dashboard/export-data", get(export_users))
        .method_not_allowed_fallback(not_found)
        .route_layer(middleware::from_fn(admin_auth))
        .route_layer(middleware::from_fn(jwt_auth));

    Router::new()
        .route("/login", post(admin_login))
        .route("/register", post(register_user))
        .merge(dashboard)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
}
