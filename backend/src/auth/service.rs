//! Core business logic for the authentication system.
//!
//! Login checks run in a fixed order: input shape, user lookup, password,
//! then account flags. The store is never queried for malformed input.

use crate::auth::models::*;
use crate::database::models::User;
use crate::errors::{AccessDenial, AuthFailure, ServiceError, ServiceResult};
use crate::repositories::user_repository::UserStore;
use crate::state::AppState;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service for handling login and token refresh
pub struct AuthService<'a> {
    users: &'a dyn UserStore,
    jwt: &'a JwtUtils,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(state: &'a AppState) -> Self {
        AuthService {
            users: state.users.as_ref(),
            jwt: state.jwt.as_ref(),
        }
    }

    /// Authenticate a user and issue an access token plus a refresh token.
    pub async fn login(&self, request: LoginRequest, mode: LoginMode) -> ServiceResult<SessionGrant> {
        let (email, password) = Self::validate_login(request)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", &email))?;

        if !verify_password(&password, &user.password_hash)? {
            tracing::info!("Password mismatch for {}", email);
            return Err(ServiceError::Authentication(AuthFailure::CredentialsMismatch));
        }

        if mode == LoginMode::Admin && !user.is_admin {
            tracing::warn!("Non-admin {} attempted admin login", email);
            return Err(ServiceError::Authorization(AccessDenial::NotAdmin));
        }

        if user.is_banned {
            tracing::warn!("Banned user {} attempted login", email);
            return Err(ServiceError::Authorization(AccessDenial::Banned));
        }

        let tokens = self.jwt.issue_session(&user.id, &user.email)?;
        tracing::info!("Issued session for user {} ({:?})", user.id, mode);

        Ok(SessionGrant {
            user: session_user(user, tokens.access_token),
            refresh_token: tokens.refresh_token,
        })
    }

    /// Mint a new access token from a verified refresh token.
    ///
    /// The new token is derived only from the refresh claims; the user is
    /// re-read so that deleted or banned accounts stop refreshing.
    pub async fn refresh_token(&self, refresh_token: Option<&str>) -> ServiceResult<RefreshTokenResponse> {
        let refresh_token =
            refresh_token.ok_or(ServiceError::Authentication(AuthFailure::MissingRefreshToken))?;

        let claims = self.jwt.validate_refresh_token(refresh_token)?;

        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or(ServiceError::Authentication(AuthFailure::InvalidRefreshToken))?;

        if user.is_banned {
            return Err(ServiceError::Authorization(AccessDenial::Banned));
        }

        let access_token = self.jwt.generate_access_token(&user.id, &user.email)?;

        Ok(RefreshTokenResponse { access_token })
    }

    fn validate_login(request: LoginRequest) -> ServiceResult<(String, String)> {
        let email = request
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        let password = request.password.filter(|p| !p.is_empty());

        let (Some(email), Some(password)) = (email, password) else {
            return Err(ServiceError::validation("Email or password is missing"));
        };

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(format!(
                "Minimum length for password is {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        Ok((email, password))
    }
}

fn session_user(user: User, access_token: String) -> SessionUser {
    SessionUser {
        id: user.id,
        name: user.name,
        email: user.email,
        phone: user.phone,
        image: user.image,
        access_token,
    }
}
