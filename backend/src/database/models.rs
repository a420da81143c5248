//! Rust structs that represent database table mappings.
//!
//! These models define the structure of data as it is stored in and retrieved
//! from the database. `UserProfile` is the public projection handed to API
//! clients; the password hash never leaves this layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub image: Option<String>,
    pub is_admin: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User fields safe to expose to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub image: Option<String>,
    pub is_admin: bool,
    pub is_banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            image: user.image,
            is_admin: user.is_admin,
            is_banned: user.is_banned,
            created_at: user.created_at,
        }
    }
}

/// Registration payload as received from the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNewUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1-255 characters"
    ))]
    pub name: String,

    #[validate(
        email(message = "Must be a valid email"),
        length(max = 255, message = "Email too long")
    )]
    pub email: String,

    #[validate(length(min = 6, message = "Minimum length for password is 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 32, message = "Phone must be between 1-32 characters"))]
    pub phone: String,

    #[validate(length(max = 2048, message = "Image reference too long"))]
    pub image: Option<String>,
}

/// Row data for inserting a user, password already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub image: Option<String>,
    pub is_admin: bool,
}

/// Partial update applied by an administrator.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUser {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1-255 characters"
    ))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 32, message = "Phone must be between 1-32 characters"))]
    pub phone: Option<String>,

    #[validate(length(max = 2048, message = "Image reference too long"))]
    pub image: Option<String>,

    pub is_banned: Option<bool>,
}

impl UpdateUser {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.image.is_none() && self.is_banned.is_none()
    }
}
