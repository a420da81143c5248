//! User business logic service.
//!
//! Handles registration and the admin dashboard operations.

use crate::auth::service::MIN_PASSWORD_LENGTH;
use crate::config::AdminBootstrap;
use crate::database::models::{CreateNewUser, CreateUser, UpdateUser, User, UserProfile};
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::user_repository::{DuplicateEmail, UserStore};
use crate::state::AppState;
use crate::utils::password::hash_password;
use validator::Validate;

pub struct UserService<'a> {
    users: &'a dyn UserStore,
    bcrypt_cost: u32,
}

impl<'a> UserService<'a> {
    /// Creates a new UserService instance.
    pub fn new(state: &'a AppState) -> Self {
        Self {
            users: state.users.as_ref(),
            bcrypt_cost: state.bcrypt_cost,
        }
    }

    /// Registers a new, non-admin user.
    ///
    /// # Errors
    /// Returns `ServiceError` for:
    /// - Validation failures
    /// - An email that is already registered
    pub async fn register_user(&self, new_user: CreateNewUser) -> ServiceResult<UserProfile> {
        new_user
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        let email = new_user.email.trim().to_lowercase();
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::already_exists("User", email));
        }

        let password_hash = hash_password(&new_user.password, self.bcrypt_cost)?;

        let user = self
            .create(CreateUser {
                name: new_user.name,
                email,
                password_hash,
                phone: new_user.phone,
                image: new_user.image,
                is_admin: false,
            })
            .await?;

        tracing::info!("Registered user {}", user.id);
        Ok(user.into())
    }

    /// Makes sure the configured admin account exists and carries the admin
    /// flag. An existing account keeps its password and is only promoted.
    pub async fn ensure_admin(&self, admin: &AdminBootstrap) -> ServiceResult<UserProfile> {
        let email = admin.email.trim().to_lowercase();

        if let Some(existing) = self.users.find_by_email(&email).await? {
            if existing.is_admin {
                return Ok(existing.into());
            }
            let promoted = self
                .users
                .promote_to_admin(&existing.id)
                .await?
                .ok_or_else(|| ServiceError::not_found("User", &email))?;
            tracing::info!("Promoted {} to admin", promoted.id);
            return Ok(promoted.into());
        }

        if admin.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(format!(
                "Minimum length for password is {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let password_hash = hash_password(&admin.password, self.bcrypt_cost)?;
        let user = self
            .create(CreateUser {
                name: admin.name.clone(),
                email,
                password_hash,
                phone: String::new(),
                image: None,
                is_admin: true,
            })
            .await?;

        tracing::info!("Created admin {}", user.id);
        Ok(user.into())
    }

    /// Inserts through the store, reporting a taken email as a conflict.
    async fn create(&self, user: CreateUser) -> ServiceResult<User> {
        self.users.create(user).await.map_err(|e| match e.downcast::<DuplicateEmail>() {
            Ok(DuplicateEmail(email)) => ServiceError::already_exists("User", email),
            Err(other) => ServiceError::from(other),
        })
    }

    /// Returns one page of users together with the total count.
    pub async fn list_users(&self, offset: u64, limit: u64) -> ServiceResult<(Vec<UserProfile>, u64)> {
        let total = self.users.count().await?;
        let users = self.users.list(offset, limit).await?;
        Ok((users.into_iter().map(UserProfile::from).collect(), total))
    }

    pub async fn update_user(&self, id: &str, changes: UpdateUser) -> ServiceResult<UserProfile> {
        changes
            .validate()
            .map_err(ServiceError::from_validation_errors)?;

        if changes.is_empty() {
            return Err(ServiceError::validation("No fields to update"));
        }

        let user = self
            .users
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id))?;

        tracing::info!("Updated user {}", user.id);
        Ok(user.into())
    }

    pub async fn delete_user(&self, id: &str) -> ServiceResult<()> {
        if !self.users.delete(id).await? {
            return Err(ServiceError::not_found("User", id));
        }
        tracing::info!("Deleted user {}", id);
        Ok(())
    }

    /// All users, for the dashboard export.
    pub async fn export_users(&self) -> ServiceResult<Vec<UserProfile>> {
        let users = self.users.all().await?;
        Ok(users.into_iter().map(UserProfile::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database;
    use crate::repositories::memory::MemoryUserStore;
    use crate::repositories::user_repository::SqliteUserRepository;
    use crate::utils::jwt::test_session_config;
    use crate::utils::password::verify_password;
    use std::sync::Arc;

    fn setup() -> (Arc<MemoryUserStore>, AppState) {
        let store = Arc::new(MemoryUserStore::new());
        let state = AppState::new(store.clone(), &test_session_config(), 4);
        (store, state)
    }

    fn new_user(email: &str) -> CreateNewUser {
        CreateNewUser {
            name: "Grace".to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            phone: "555-0199".to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let (store, state) = setup();
        let service = UserService::new(&state);

        let profile = service.register_user(new_user("Grace@Example.com")).await.unwrap();
        assert_eq!(profile.email, "grace@example.com");
        assert!(!profile.is_admin);

        let stored = store.find_by_email("grace@example.com").await.unwrap().unwrap();
        assert!(verify_password("secret1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_duplicate_and_invalid() {
        let (_store, state) = setup();
        let service = UserService::new(&state);
        service.register_user(new_user("grace@example.com")).await.unwrap();

        let err = service.register_user(new_user("grace@example.com")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists { .. }));

        let mut invalid = new_user("not-an-email");
        invalid.password = "123".to_string();
        let err = service.register_user(invalid).await.unwrap_err();
        match err {
            ServiceError::Validation { details, .. } => {
                let fields: Vec<&str> = details.iter().map(|(f, _)| f.as_str()).collect();
                assert_eq!(fields, vec!["email", "password"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_racing_insert_reported_as_conflict() {
        let (store, state) = setup();
        let service = UserService::new(&state);

        // Another writer took the email between the lookup and the insert.
        let lost_race = service.create(CreateUser {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            phone: "555-0199".to_string(),
            image: None,
            is_admin: false,
        });
        store.seed("grace@example.com", "secret1", false, false);

        let err = lost_race.await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::AlreadyExists { ref identifier, .. } if identifier == "grace@example.com"
        ));
    }

    fn bootstrap(email: &str) -> AdminBootstrap {
        AdminBootstrap {
            email: email.to_string(),
            password: "admin-secret".to_string(),
            name: "Root".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ensure_admin_creates_account_once() {
        let db = database::in_memory().await;
        let repo = Arc::new(SqliteUserRepository::new(db.pool().clone()));
        let state = AppState::new(repo.clone(), &test_session_config(), 4);
        let service = UserService::new(&state);

        let first = service.ensure_admin(&bootstrap("Root@Example.com")).await.unwrap();
        assert!(first.is_admin);
        assert_eq!(first.email, "root@example.com");

        let second = service.ensure_admin(&bootstrap("root@example.com")).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(repo.count().await.unwrap(), 1);

        let stored = repo.find_by_email("root@example.com").await.unwrap().unwrap();
        assert!(verify_password("admin-secret", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_ensure_admin_promotes_existing_user() {
        let db = database::in_memory().await;
        let repo = Arc::new(SqliteUserRepository::new(db.pool().clone()));
        let state = AppState::new(repo.clone(), &test_session_config(), 4);
        let service = UserService::new(&state);
        let registered = service.register_user(new_user("grace@example.com")).await.unwrap();

        let promoted = service.ensure_admin(&bootstrap("grace@example.com")).await.unwrap();
        assert_eq!(promoted.id, registered.id);
        assert!(promoted.is_admin);

        let stored = repo.find_by_id(&registered.id).await.unwrap().unwrap();
        assert!(verify_password("secret1", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (_store, state) = setup();
        let service = UserService::new(&state);
        let profile = service.register_user(new_user("grace@example.com")).await.unwrap();

        let changes = UpdateUser {
            is_banned: Some(true),
            ..Default::default()
        };
        let updated = service.update_user(&profile.id, changes).await.unwrap();
        assert!(updated.is_banned);

        let err = service.update_user(&profile.id, UpdateUser::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { .. }));

        service.delete_user(&profile.id).await.unwrap();
        let err = service.delete_user(&profile.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_and_export() {
        let (_store, state) = setup();
        let service = UserService::new(&state);
        for email in ["a@example.com", "b@example.com", "c@example.com"] {
            service.register_user(new_user(email)).await.unwrap();
        }

        let (page, total) = service.list_users(2, 2).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].email, "c@example.com");

        assert_eq!(service.export_users().await.unwrap().len(), 3);
    }
}
