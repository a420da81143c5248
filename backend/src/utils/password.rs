//! Password hashing and verification backed by bcrypt.

use bcrypt::{hash, verify};

use crate::errors::{ServiceError, ServiceResult};

/// Function to hash a password before storing in database
///
/// # Errors
/// Returns `ServiceError` if hashing fails
pub fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    hash(password, cost)
        .map_err(|e| ServiceError::internal_error(format!("Password hashing failed: {}", e)))
}

/// Function to verify a password against the stored hash
///
/// # Returns
/// `true` if password matches hash, `false` otherwise
///
/// # Errors
/// Returns `ServiceError` if the stored hash cannot be parsed
pub fn verify_password(password: &str, hash: &str) -> ServiceResult<bool> {
    verify(password, hash)
        .map_err(|e| ServiceError::internal_error(format!("Password verification failed: {}", e)))
}
