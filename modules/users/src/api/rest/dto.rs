use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::{NewUser, User, UserPatch};

/// REST DTO for user representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user. Unknown fields (including `id`) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserReq {
    pub email: String,
    pub name: String,
}

/// REST DTO for updating a user (partial)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUserReq {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            email: req.email,
            name: req.name,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            email: req.email,
            name: req.name,
        }
    }
}
