use std::sync::Arc;

use axum::{http::Uri, response::IntoResponse, Extension, Json};
use restkit::{created_json, deleted, JsonBody, PathId, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{CreateUserReq, UpdateUserReq, UserDto};
use crate::api::rest::error::{map_domain_error, not_found};
use crate::domain::service::Service;

pub async fn list_users(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<Vec<UserDto>>, ProblemResponse> {
    info!("Listing users");

    match svc.list_users().await {
        Ok(users) => Ok(Json(users.into_iter().map(UserDto::from).collect())),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Get a specific user by ID
pub async fn get_user(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Getting user with id: {}", id);

    match svc.get_user(id).await {
        Ok(Some(user)) => Ok(Json(UserDto::from(user))),
        Ok(None) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to get user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Create a new user
pub async fn create_user(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req_body): JsonBody<CreateUserReq>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating user: {:?}", req_body);

    match svc.create_user(req_body.into()).await {
        Ok(user) => Ok(created_json(UserDto::from(user))),
        Err(e) => {
            error!("Failed to create user: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Update an existing user
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
    JsonBody(req_body): JsonBody<UpdateUserReq>,
) -> Result<Json<UserDto>, ProblemResponse> {
    info!("Updating user {} with: {:?}", id, req_body);

    match svc.update_user(id, req_body.into()).await {
        Ok(Some(user)) => Ok(Json(UserDto::from(user))),
        Ok(None) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to update user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

/// Delete a user by ID
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Deleting user: {}", id);

    match svc.delete_user(id).await {
        Ok(true) => Ok(deleted("User")),
        Ok(false) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to delete user {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
