use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, User, UserPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("compile email regex"));

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_name_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_name_length: 100,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: i32) -> Result<Option<User>, DomainError> {
        debug!("Getting user by id");
        let user = self.repo.find_by_id(id).await?;
        debug!(found = user.is_some(), "User lookup finished");
        Ok(user)
    }

    #[instrument(name = "users.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        let users = self.repo.list_all().await?;
        debug!("Listed {} users", users.len());
        Ok(users)
    }

    #[instrument(
        name = "users.service.create_user",
        skip(self),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        self.validate_email(&new_user.email)?;
        self.validate_name(&new_user.name)?;

        if self.repo.email_exists(&new_user.email).await? {
            return Err(DomainError::email_already_exists(new_user.email));
        }

        let email = new_user.email.clone();
        let user = self
            .repo
            .insert(new_user, Utc::now())
            .await
            .map_err(|e| DomainError::from_storage(e, &email))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "users.service.update_user", skip(self), fields(user_id = %id))]
    pub async fn update_user(
        &self,
        id: i32,
        patch: UserPatch,
    ) -> Result<Option<User>, DomainError> {
        info!("Updating user");

        let Some(current) = self.repo.find_by_id(id).await? else {
            debug!("User not found; nothing to update");
            return Ok(None);
        };

        if let Some(ref email) = patch.email {
            self.validate_email(email)?;
            if email != &current.email && self.repo.email_exists(email).await? {
                return Err(DomainError::email_already_exists(email.clone()));
            }
        }
        if let Some(ref name) = patch.name {
            self.validate_name(name)?;
        }

        let email = patch.email.clone().unwrap_or(current.email);
        let updated = self
            .repo
            .update(id, patch, Utc::now())
            .await
            .map_err(|e| DomainError::from_storage(e, &email))?;

        if updated.is_some() {
            info!("Successfully updated user");
        }
        Ok(updated)
    }

    #[instrument(name = "users.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: i32) -> Result<bool, DomainError> {
        info!("Deleting user");
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "Delete finished");
        Ok(deleted)
    }

    // --- validation helpers ---

    fn validate_email(&self, email: &str) -> Result<(), DomainError> {
        if !EMAIL_REGEX.is_match(email) {
            return Err(DomainError::invalid_email(email.to_string()));
        }
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::empty_name());
        }
        let len = name.chars().count();
        if len > self.config.max_name_length {
            return Err(DomainError::name_too_long(len, self.config.max_name_length));
        }
        Ok(())
    }
}
