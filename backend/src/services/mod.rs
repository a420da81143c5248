//! Business logic that sits between the API handlers and the repositories.

pub mod user_service;
