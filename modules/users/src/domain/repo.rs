use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbkit::StorageError;

use crate::contract::model::{NewUser, User, UserPatch};

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StorageError>;
    /// All users ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, StorageError>;
    /// Check uniqueness by email.
    async fn email_exists(&self, email: &str) -> Result<bool, StorageError>;
    /// Persist a validated user stamped with `at`; storage assigns the id.
    async fn insert(&self, new_user: NewUser, at: DateTime<Utc>) -> Result<User, StorageError>;
    /// Write the fields present in `patch` and stamp `updated_at`; other
    /// columns are left as stored. `None` when the row is gone.
    async fn update(
        &self,
        id: i32,
        patch: UserPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, StorageError>;
}
