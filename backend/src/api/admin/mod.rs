//! Admin dashboard: registration and user management.

pub mod handlers;
pub mod routes;
