//! Persistence layer for the backend.

pub mod user_repository;

#[cfg(test)]
pub mod memory;
