//! Authentication module for user sessions and access control.
//!
//! This module provides login, logout, token refresh and the middleware that
//! guards the admin dashboard.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod service;
