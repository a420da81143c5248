//! Handler functions for authentication-related API endpoints.
//!
//! These functions parse request data, call `auth::service` for the core
//! logic, and translate the result into a JSON body plus the refresh cookie.

use crate::api::common::{ApiError, ApiResponse, json_body, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::state::AppState;
use crate::utils::cookie::RefreshCookie;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    http::{HeaderMap, header::SET_COOKIE},
};

const MISSING_CREDENTIALS: &str = "Email or password is missing";

type SessionResponse = ([(axum::http::HeaderName, String); 1], Json<ApiResponse<LoginData>>);

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<SessionResponse, ApiError> {
    let payload = json_body(payload, MISSING_CREDENTIALS)?;
    start_session(&state, payload, LoginMode::User).await
}

/// Handle admin login request
#[axum::debug_handler]
pub async fn admin_login(
    Extension(state): Extension<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<SessionResponse, ApiError> {
    let payload = json_body(payload, MISSING_CREDENTIALS)?;
    start_session(&state, payload, LoginMode::Admin).await
}

async fn start_session(
    state: &AppState,
    payload: LoginRequest,
    mode: LoginMode,
) -> Result<SessionResponse, ApiError> {
    let grant = AuthService::new(state)
        .login(payload, mode)
        .await
        .map_err(service_error_to_http)?;

    let cookie = state.cookie.set(&grant.refresh_token);
    let body = ApiResponse::success(LoginData { user: grant.user }, mode.success_message());

    Ok(([(SET_COOKIE, cookie)], Json(body)))
}

/// Handle token refresh request
#[axum::debug_handler]
pub async fn refresh_token(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<RefreshTokenResponse>>, ApiError> {
    let cookie = RefreshCookie::extract(&headers);

    match AuthService::new(&state).refresh_token(cookie.as_deref()).await {
        Ok(response) => Ok(Json(ApiResponse::success(response, "Access token refreshed"))),
        Err(error) => Err(service_error_to_http(error)),
    }
}

/// Handle logout request
///
/// Tokens are stateless, so logout only asks the browser to drop the
/// refresh cookie. The refresh token stays valid until it expires.
#[axum::debug_handler]
pub async fn logout(
    Extension(state): Extension<AppState>,
) -> ([(axum::http::HeaderName, String); 1], Json<ApiResponse<()>>) {
    (
        [(SET_COOKIE, state.cookie.clear())],
        Json(ApiResponse::message("Logout successful")),
    )
}
