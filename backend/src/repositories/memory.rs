//! In-memory `UserStore` used by service and handler tests.
//!
//! Counts every lookup so tests can assert that validation short-circuits
//! before the store is touched.

use crate::database::models::{CreateUser, UpdateUser, User};
use crate::repositories::user_repository::{DuplicateEmail, UserStore};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
    lookups: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `find_by_*` calls served so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    /// Inserts a user with a bcrypt hash of `password` at the minimum cost.
    pub fn seed(&self, email: &str, password: &str, is_admin: bool, is_banned: bool) -> User {
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7().to_string(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            phone: "555-0100".to_string(),
            image: Some("avatar.png".to_string()),
            is_admin,
            is_banned,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: CreateUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DuplicateEmail(user.email).into());
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::now_v7().to_string(),
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            image: user.image,
            is_admin: user.is_admin,
            is_banned: false,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, changes: UpdateUser) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(phone) = changes.phone {
            user.phone = phone;
        }
        if let Some(image) = changes.image {
            user.image = Some(image);
        }
        if let Some(is_banned) = changes.is_banned {
            user.is_banned = is_banned;
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn promote_to_admin(&self, id: &str) -> Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.is_admin = true;
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn list(&self, offset: u64, limit: u64) -> Result<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }

    async fn all(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }
}
