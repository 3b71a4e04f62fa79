//! User service - Handles user-related business logic.
//!
//! Enforces the email-uniqueness and existence invariants and converts
//! persisted entities into the externally visible `UserView` projection.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{UserId, UserInput, UserView};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// List all users in the store's natural order
    async fn list_users(&self) -> AppResult<Vec<UserView>>;

    /// Get user by ID
    async fn get_user(&self, id: UserId) -> AppResult<UserView>;

    /// Create a new user; the store assigns the id
    async fn create_user(&self, input: UserInput) -> AppResult<UserView>;

    /// Update name, email, and password of an existing user
    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<UserView>;

    /// Delete user by ID
    async fn delete_user(&self, id: UserId) -> AppResult<()>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn list_users(&self) -> AppResult<Vec<UserView>> {
        let users = self.repo.find_all().await?;
        Ok(users.iter().map(UserView::from).collect())
    }

    async fn get_user(&self, id: UserId) -> AppResult<UserView> {
        let user = self.repo.find_by_id(id).await?.ok_or_not_found()?;
        Ok(UserView::from(&user))
    }

    async fn create_user(&self, input: UserInput) -> AppResult<UserView> {
        // Check if email already exists (exact match, independent of id)
        if self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::EmailConflict);
        }

        let user = self.repo.insert(input).await?;
        Ok(UserView::from(&user))
    }

    async fn update_user(&self, id: UserId, input: UserInput) -> AppResult<UserView> {
        let mut user = self.repo.find_by_id(id).await?.ok_or_not_found()?;

        // Uniqueness is re-checked only when the email actually changes; an
        // unchanged email can only match the record being updated.
        if user.email != input.email && self.repo.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::EmailConflict);
        }

        user.apply(input);
        let user = self.repo.save(&user).await?;
        Ok(UserView::from(&user))
    }

    async fn delete_user(&self, id: UserId) -> AppResult<()> {
        if !self.repo.exists_by_id(id).await? {
            return Err(AppError::NotFound);
        }

        self.repo.delete_by_id(id).await
    }
}
