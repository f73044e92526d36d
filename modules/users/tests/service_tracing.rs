//! Service-level tests against an in-memory mock repository, with tracing captured.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbkit::StorageError;
use tracing_test::traced_test;

use users::contract::model::{NewUser, User, UserPatch};
use users::domain::error::DomainError;
use users::domain::repo::UsersRepository;
use users::domain::service::{Service, ServiceConfig};

/// Vec-backed repository that counts inserts.
#[derive(Default)]
struct MockUsersRepository {
    rows: Mutex<Vec<User>>,
    inserts: AtomicUsize,
}

#[async_trait]
impl UsersRepository for MockUsersRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, StorageError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, StorageError> {
        Ok(self.rows.lock().unwrap().iter().any(|u| u.email == email))
    }

    async fn insert(&self, new_user: NewUser, at: DateTime<Utc>) -> Result<User, StorageError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let user = User {
            id: rows.len() as i32 + 1,
            email: new_user.email,
            name: new_user.name,
            created_at: at,
            updated_at: at,
        };
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(
        &self,
        id: i32,
        patch: UserPatch,
        at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email {
            row.email = email;
        }
        if let Some(name) = patch.name {
            row.name = name;
        }
        row.updated_at = at;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StorageError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        Ok(rows.len() != before)
    }
}

/// Repository whose every call fails like a broken connection.
struct FailingRepository;

#[async_trait]
impl UsersRepository for FailingRepository {
    async fn find_by_id(&self, _id: i32) -> Result<Option<User>, StorageError> {
        Err(StorageError::other("connection reset"))
    }

    async fn list_all(&self) -> Result<Vec<User>, StorageError> {
        Err(StorageError::other("connection reset"))
    }

    async fn email_exists(&self, _email: &str) -> Result<bool, StorageError> {
        Err(StorageError::other("connection reset"))
    }

    async fn insert(&self, _new_user: NewUser, _at: DateTime<Utc>) -> Result<User, StorageError> {
        Err(StorageError::other("connection reset"))
    }

    async fn update(
        &self,
        _id: i32,
        _patch: UserPatch,
        _at: DateTime<Utc>,
    ) -> Result<Option<User>, StorageError> {
        Err(StorageError::other("connection reset"))
    }

    async fn delete(&self, _id: i32) -> Result<bool, StorageError> {
        Err(StorageError::other("connection reset"))
    }
}

fn service_with(repo: Arc<MockUsersRepository>) -> Service {
    Service::new(repo, ServiceConfig::default())
}

#[traced_test]
#[tokio::test]
async fn create_user_emits_spans() {
    let repo = Arc::new(MockUsersRepository::default());
    let service = service_with(repo.clone());

    let result = service
        .create_user(NewUser {
            email: "new@example.com".into(),
            name: "New User".into(),
        })
        .await;

    assert!(result.is_ok());
    assert_eq!(repo.inserts.load(Ordering::SeqCst), 1);
    assert!(logs_contain("Creating new user"));
    assert!(logs_contain("Successfully created user with id=1"));
}

#[traced_test]
#[tokio::test]
async fn invalid_input_never_reaches_storage() {
    let repo = Arc::new(MockUsersRepository::default());
    let service = service_with(repo.clone());

    let bad_email = service
        .create_user(NewUser {
            email: "nope".into(),
            name: "Name".into(),
        })
        .await;
    assert!(matches!(bad_email, Err(DomainError::InvalidEmail { .. })));

    let blank_name = service
        .create_user(NewUser {
            email: "ok@example.com".into(),
            name: "".into(),
        })
        .await;
    assert!(matches!(blank_name, Err(DomainError::EmptyName)));

    assert_eq!(repo.inserts.load(Ordering::SeqCst), 0);
}

#[traced_test]
#[tokio::test]
async fn update_and_delete_emit_spans() {
    let repo = Arc::new(MockUsersRepository::default());
    let service = service_with(repo);

    let user = service
        .create_user(NewUser {
            email: "a@example.com".into(),
            name: "A".into(),
        })
        .await
        .unwrap();

    let updated = service
        .update_user(
            user.id,
            UserPatch {
                email: Some("b@example.com".into()),
                name: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.map(|u| u.email).as_deref(), Some("b@example.com"));
    assert!(logs_contain("Successfully updated user"));

    assert!(service.delete_user(user.id).await.unwrap());
    assert!(logs_contain("Deleting user"));
}

#[traced_test]
#[tokio::test]
async fn missing_user_is_logged_not_failed() {
    let service = service_with(Arc::new(MockUsersRepository::default()));

    let result = service.update_user(7, UserPatch::default()).await;
    assert!(matches!(result, Ok(None)));
    assert!(logs_contain("User not found; nothing to update"));

    // A missing id wins over an invalid patch.
    let result = service
        .update_user(
            999,
            UserPatch {
                email: Some("bad".into()),
                name: Some("   ".into()),
            },
        )
        .await;
    assert!(matches!(result, Ok(None)));
}

#[tokio::test]
async fn storage_failures_become_database_errors() {
    let service = Service::new(Arc::new(FailingRepository), ServiceConfig::default());

    assert!(matches!(
        service.get_user(1).await,
        Err(DomainError::Database { .. })
    ));
    assert!(matches!(
        service.list_users().await,
        Err(DomainError::Database { .. })
    ));
    assert!(matches!(
        service.delete_user(1).await,
        Err(DomainError::Database { .. })
    ));
}
