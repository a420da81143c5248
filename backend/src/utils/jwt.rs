//! JWT token utilities for session management.
//!
//! Access and refresh tokens are signed with separate HS256 secrets taken
//! from `SessionConfig`. Access tokens identify the user; refresh tokens carry
//! only the email and are never accepted where an access token is expected.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::errors::{AuthFailure, ServiceError, ServiceResult};

/// Claims carried by the short-lived access token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AccessClaims {
    /// User ID
    pub sub: String,
    pub email: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Claims carried by the refresh cookie.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RefreshClaims {
    pub email: String,
    pub exp: usize,
    pub iat: usize,
}

/// Both halves of a freshly issued session.
#[derive(Debug, Clone)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

/// JWT token utility for creating and validating tokens
#[derive(Clone)]
pub struct JwtUtils {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtUtils {
    pub fn new(config: &SessionConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            access_encoding: EncodingKey::from_secret(config.access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(config.access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(config.refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(config.refresh_secret.as_bytes()),
            validation,
            access_ttl: Duration::seconds(config.access_ttl_seconds as i64),
            refresh_ttl: Duration::seconds(config.refresh_ttl_seconds as i64),
        }
    }

    /// Issues an access/refresh pair sharing the same issue time.
    pub fn issue_session(&self, user_id: &str, email: &str) -> ServiceResult<SessionTokens> {
        let now = Utc::now();
        Ok(SessionTokens {
            access_token: self.access_token_issued_at(user_id, email, now)?,
            refresh_token: self.refresh_token_issued_at(email, now)?,
        })
    }

    pub fn generate_access_token(&self, user_id: &str, email: &str) -> ServiceResult<String> {
        self.access_token_issued_at(user_id, email, Utc::now())
    }

    pub(crate) fn access_token_issued_at(
        &self,
        user_id: &str,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let claims = AccessClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: (issued_at + self.access_ttl).timestamp() as usize,
            iat: issued_at.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.access_encoding).map_err(|e| {
            ServiceError::internal_error(format!("Access token generation failed: {}", e))
        })
    }

    pub(crate) fn refresh_token_issued_at(
        &self,
        email: &str,
        issued_at: DateTime<Utc>,
    ) -> ServiceResult<String> {
        let claims = RefreshClaims {
            email: email.to_string(),
            exp: (issued_at + self.refresh_ttl).timestamp() as usize,
            iat: issued_at.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.refresh_encoding).map_err(|e| {
            ServiceError::internal_error(format!("Refresh token generation failed: {}", e))
        })
    }

    /// Validate and decode an access token
    pub fn validate_access_token(&self, token: &str) -> ServiceResult<AccessClaims> {
        decode::<AccessClaims>(token, &self.access_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Access token rejected: {}", e);
                ServiceError::Authentication(AuthFailure::InvalidAccessToken)
            })
    }

    /// Validate and decode a refresh token
    pub fn validate_refresh_token(&self, token: &str) -> ServiceResult<RefreshClaims> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| {
                tracing::debug!("Refresh token rejected: {}", e);
                ServiceError::Authentication(AuthFailure::InvalidRefreshToken)
            })
    }
}

#[cfg(test)]
pub(crate) fn test_session_config() -> SessionConfig {
    SessionConfig {
        access_secret: "access-secret-for-tests".to_string(),
        refresh_secret: "refresh-secret-for-tests".to_string(),
        access_ttl_seconds: 600,
        refresh_ttl_seconds: 86400,
        cookie_secure: false,
    }
}
