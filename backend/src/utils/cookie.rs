//! The refresh-token cookie.
//!
//! Browsers only drop a cookie when the clearing header repeats the
//! attributes it was set with, so both headers are rendered from one
//! `RefreshCookie` value.

use axum::http::{HeaderMap, header::COOKIE};

use crate::config::SessionConfig;

pub const REFRESH_COOKIE_NAME: &str = "jwt";

#[derive(Debug, Clone)]
pub struct RefreshCookie {
    max_age_seconds: u64,
    secure: bool,
}

impl RefreshCookie {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            max_age_seconds: config.refresh_ttl_seconds,
            secure: config.cookie_secure,
        }
    }

    fn attributes(&self) -> String {
        let mut attributes = String::from("Path=/; HttpOnly; SameSite=None");
        if self.secure {
            attributes.push_str("; Secure");
        }
        attributes
    }

    /// `Set-Cookie` value that stores the refresh token.
    pub fn set(&self, refresh_token: &str) -> String {
        format!(
            "{}={}; Max-Age={}; {}",
            REFRESH_COOKIE_NAME,
            refresh_token,
            self.max_age_seconds,
            self.attributes()
        )
    }

    /// `Set-Cookie` value that removes the refresh token.
    pub fn clear(&self) -> String {
        format!(
            "{}=; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT; {}",
            REFRESH_COOKIE_NAME,
            self.attributes()
        )
    }

    /// Reads the refresh token from the request's `Cookie` headers.
    pub fn extract(headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == REFRESH_COOKIE_NAME)
            .map(|(_, token)| token.to_string())
            .filter(|token| !token.is_empty())
    }
}
