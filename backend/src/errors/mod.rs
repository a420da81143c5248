//! Global application error types.
//!
//! This module defines the closed set of errors used across the backend.
//! They are mapped to HTTP responses in exactly one place,
//! `api::common::service_error_to_http`.

use thiserror::Error;

/// Why a caller could not be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    /// Password did not match the stored hash.
    CredentialsMismatch,
    /// No refresh cookie accompanied a refresh request.
    MissingRefreshToken,
    /// Refresh cookie failed signature or expiry checks.
    InvalidRefreshToken,
    /// Bearer access token missing, malformed or expired.
    InvalidAccessToken,
}

/// Why an authenticated caller was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenial {
    Banned,
    NotAdmin,
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFailure::CredentialsMismatch => write!(f, "Email/password does not match"),
            AuthFailure::MissingRefreshToken => write!(f, "Refresh token is missing"),
            AuthFailure::InvalidRefreshToken => write!(f, "Unauthorized"),
            AuthFailure::InvalidAccessToken => write!(f, "Invalid or expired access token"),
        }
    }
}

impl std::fmt::Display for AccessDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessDenial::Banned => write!(f, "This account is banned, please contact an admin"),
            AccessDenial::NotAdmin => write!(f, "User is not an admin"),
        }
    }
}

/// Generic service error that can be used across all entities
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<(String, String)>,
    },

    #[error("{entity} not found: {identifier}")]
    NotFound { entity: String, identifier: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    #[error("Authentication failed: {0}")]
    Authentication(AuthFailure),

    #[error("Access denied: {0}")]
    Authorization(AccessDenial),

    #[error("Database error: {source}")]
    Database {
        #[from]
        source: anyhow::Error,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Builds a validation error from `validator` output, keeping one entry per field failure.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    (
                        field.to_string(),
                        error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string()),
                    )
                })
            })
            .collect();
        details.sort();

        let message = details
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");

        Self::Validation { message, details }
    }

    pub fn not_found(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}
