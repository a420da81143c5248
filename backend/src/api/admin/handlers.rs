//! Handler functions for the admin dashboard endpoints.
//!
//! Registration is open; every dashboard handler sits behind `jwt_auth` and
//! `admin_auth`.

use crate::api::common::{
    ApiError, ApiResponse, PaginationFilter, PaginationMeta, json_body, service_error_to_http,
};
use crate::database::models::{CreateNewUser, UpdateUser, UserProfile};
use crate::errors::ServiceError;
use crate::services::user_service::UserService;
use crate::state::AppState;
use crate::utils::jwt::AccessClaims;
use axum::{
    extract::{Extension, Json, Path, Query, rejection::JsonRejection},
    http::{StatusCode, header::CONTENT_DISPOSITION},
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

const INVALID_BODY: &str = "Request body must be a valid JSON object";

#[axum::debug_handler]
pub async fn register_user(
    Extension(state): Extension<AppState>,
    payload: Result<Json<CreateNewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserProfile>>), ApiError> {
    let payload = json_body(payload, INVALID_BODY)?;

    let profile = UserService::new(&state)
        .register_user(payload)
        .await
        .map_err(service_error_to_http)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(profile, "User registered successfully")),
    ))
}

/// Lists users one page at a time.
#[axum::debug_handler]
pub async fn list_users(
    Extension(state): Extension<AppState>,
    Query(filter): Query<PaginationFilter>,
) -> Result<Json<ApiResponse<Vec<UserProfile>>>, ApiError> {
    filter
        .validate()
        .map_err(|e| service_error_to_http(ServiceError::from_validation_errors(e)))?;

    let (users, total) = UserService::new(&state)
        .list_users(filter.offset(), filter.limit())
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::paginated(
        users,
        PaginationMeta::from_filter(&filter, total),
        "Users retrieved successfully",
    )))
}

#[axum::debug_handler]
pub async fn update_user(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUser>, JsonRejection>,
) -> Result<Json<ApiResponse<UserProfile>>, ApiError> {
    let payload = json_body(payload, INVALID_BODY)?;
    tracing::info!("Admin {} updating user {}", claims.sub, id);

    let profile = UserService::new(&state)
        .update_user(&id, payload)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::success(profile, "User updated successfully")))
}

#[axum::debug_handler]
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    Extension(claims): Extension<AccessClaims>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    tracing::info!("Admin {} deleting user {}", claims.sub, id);

    UserService::new(&state)
        .delete_user(&id)
        .await
        .map_err(service_error_to_http)?;

    Ok(Json(ApiResponse::message("User deleted successfully")))
}

/// Downloads every user profile as a JSON attachment.
#[axum::debug_handler]
pub async fn export_users(
    Extension(state): Extension<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let users = UserService::new(&state)
        .export_users()
        .await
        .map_err(service_error_to_http)?;

    Ok((
        [(CONTENT_DISPOSITION, "attachment; filename=\"users.json\"")],
        Json(users),
    ))
}

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "404 not found" })))
}
