//! Central module for organizing the application's API endpoints outside
//! the core session routes, which live in `auth`.

pub mod admin;
pub mod common;
