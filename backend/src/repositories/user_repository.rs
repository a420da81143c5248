//! Database repository for user management operations.
//!
//! `UserStore` is the seam the session and dashboard services talk to;
//! `SqliteUserRepository` is the production implementation.

use crate::database::models::{CreateUser, UpdateUser, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Raised by `UserStore::create` when the email is already taken, including
/// when a concurrent insert wins the race past an earlier lookup.
#[derive(Debug, thiserror::Error)]
#[error("email already registered: {0}")]
pub struct DuplicateEmail(pub String);

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, image, is_admin, is_banned, created_at, updated_at";

/// Persistence operations on user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<User>>;

    /// Fails with a `DuplicateEmail` error when the email is taken.
    async fn create(&self, user: CreateUser) -> Result<User>;

    /// Applies the non-empty fields of `changes`; `None` if the user does not exist.
    async fn update(&self, id: &str, changes: UpdateUser) -> Result<Option<User>>;

    /// Sets the admin flag; `None` if the user does not exist.
    async fn promote_to_admin(&self, id: &str) -> Result<Option<User>>;

    /// Returns `false` if no user had this id.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Users ordered by creation time, oldest first.
    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>>;

    async fn count(&self) -> Result<u64>;

    async fn all(&self) -> Result<Vec<User>>;
}

/// Repository for user database operations.
#[derive(Clone)]
pub struct SqliteUserRepository {
    /// Shared SQLite connection pool
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Creates a new SqliteUserRepository instance.
    ///
    /// # Arguments
    /// * `pool` - SQLite connection pool (cheap to clone)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE email = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        let query = format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        let now = Utc::now();
        let query = format!(
            r#"
            INSERT INTO users (id, name, email, password_hash, phone, image, is_admin, is_banned, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let email = user.email.clone();
        let user = sqlx::query_as::<_, User>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(user.name)
            .bind(user.email)
            .bind(user.password_hash)
            .bind(user.phone)
            .bind(user.image)
            .bind(user.is_admin)
            .bind(now)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    anyhow::Error::new(DuplicateEmail(email))
                }
                other => anyhow::Error::new(other),
            })?;

        Ok(user)
    }

    async fn update(&self, id: &str, changes: UpdateUser) -> Result<Option<User>> {
        let query = format!(
            r#"
            UPDATE users SET
                name = COALESCE(?, name),
                phone = COALESCE(?, phone),
                image = COALESCE(?, image),
                is_banned = COALESCE(?, is_banned),
                updated_at = ?
            WHERE id = ?
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(changes.name)
            .bind(changes.phone)
            .bind(changes.image)
            .bind(changes.is_banned)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn promote_to_admin(&self, id: &str) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET is_admin = 1, updated_at = ? WHERE id = ? RETURNING {}",
            USER_COLUMNS
        );
        let user = sqlx::query_as::<_, User>(&query)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(limit as i64)
            .bind(offset as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn all(&self) -> Result<Vec<User>> {
        let query = format!(
            "SELECT {} FROM users ORDER BY created_at ASC, id ASC",
            USER_COLUMNS
        );
        let users = sqlx::query_as::<_, User>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }
}
