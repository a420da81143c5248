//! Data structures for authentication requests and responses.

use serde::{Deserialize, Serialize};

/// Login request payload.
///
/// Both fields are optional at the serde level so that a missing field is
/// reported through the service's own validation rather than a JSON rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Which login endpoint is being served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginMode {
    User,
    Admin,
}

impl LoginMode {
    pub fn success_message(self) -> &'static str {
        match self {
            LoginMode::User => "Login successful",
            LoginMode::Admin => "Login successful as an admin",
        }
    }
}

/// Profile returned on login, with the access token attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image: Option<String>,
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginData {
    pub user: SessionUser,
}

/// Outcome of a successful login: the body part and the cookie part.
#[derive(Debug)]
pub struct SessionGrant {
    pub user: SessionUser,
    pub refresh_token: String,
}

/// Token refresh response
#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}
