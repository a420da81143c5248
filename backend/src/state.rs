//! Shared per-process state injected into every handler as an `Extension`.

use std::sync::Arc;

use crate::config::SessionConfig;
use crate::repositories::user_repository::UserStore;
use crate::utils::cookie::RefreshCookie;
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub jwt: Arc<JwtUtils>,
    pub cookie: RefreshCookie,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(users: Arc<dyn UserStore>, session: &SessionConfig, bcrypt_cost: u32) -> Self {
        Self {
            users,
            jwt: Arc::new(JwtUtils::new(session)),
            cookie: RefreshCookie::new(session),
            bcrypt_cost,
        }
    }
}
