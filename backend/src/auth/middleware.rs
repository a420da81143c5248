//! Middleware for protecting authenticated routes and handling authorization.
//!
//! `jwt_auth` validates the bearer access token and stores its claims in the
//! request extensions; `admin_auth` must run after it.

use crate::api::common::{ApiError, service_error_to_http};
use crate::errors::{AccessDenial, AuthFailure, ServiceError};
use crate::state::AppState;
use crate::utils::jwt::AccessClaims;
use axum::{
    extract::Request,
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

fn unauthenticated() -> ApiError {
    service_error_to_http(ServiceError::Authentication(AuthFailure::InvalidAccessToken))
}

fn app_state(request: &Request) -> Result<AppState, ApiError> {
    request.extensions().get::<AppState>().cloned().ok_or_else(|| {
        tracing::error!("AppState extension missing from request");
        service_error_to_http(ServiceError::internal_error("application state not configured"))
    })
}

/// JWT authentication middleware
pub async fn jwt_auth(mut request: Request, next: Next) -> Result<Response, ApiError> {
    let state = app_state(&request)?;

    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or_else(unauthenticated)?;

    let claims = state
        .jwt
        .validate_access_token(token)
        .map_err(service_error_to_http)?;

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Admin role authorization middleware
pub async fn admin_auth(request: Request, next: Next) -> Result<Response, ApiError> {
    let state = app_state(&request)?;

    let user_id = request
        .extensions()
        .get::<AccessClaims>()
        .map(|claims| claims.sub.clone())
        .ok_or_else(unauthenticated)?;

    let user = state
        .users
        .find_by_id(&user_id)
        .await
        .map_err(|e| service_error_to_http(ServiceError::from(e)))?;

    match user {
        Some(user) if user.is_admin && !user.is_banned => Ok(next.run(request).await),
        Some(user) if user.is_banned => Err(forbidden(AccessDenial::Banned)),
        _ => Err(forbidden(AccessDenial::NotAdmin)),
    }
}

/// Route guards answer 403 for every refusal; only admin login uses 401 for non-admins.
fn forbidden(denial: AccessDenial) -> ApiError {
    let (_, body) = service_error_to_http(ServiceError::Authorization(denial));
    (StatusCode::FORBIDDEN, body)
}
