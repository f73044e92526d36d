use std::sync::Arc;

use axum::{http::Uri, response::IntoResponse, Extension, Json};
use restkit::{created_json, deleted, JsonBody, PathId, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{CreatePropertyReq, PropertyDto, UpdatePropertyReq};
use crate::api::rest::error::{map_domain_error, not_found};
use crate::domain::service::Service;

pub async fn list_properties(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<Vec<PropertyDto>>, ProblemResponse> {
    info!("Listing properties");

    svc.list_properties()
        .await
        .map(|ps| Json(ps.into_iter().map(PropertyDto::from).collect()))
        .map_err(|e| {
            error!("Failed to list properties: {}", e);
            map_domain_error(&e, uri.path())
        })
}

pub async fn get_property(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<Json<PropertyDto>, ProblemResponse> {
    info!("Getting property with id: {}", id);

    match svc.get_property(id).await {
        Ok(Some(p)) => Ok(Json(PropertyDto::from(p))),
        Ok(None) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to get property {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_property(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req_body): JsonBody<CreatePropertyReq>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating property: {:?}", req_body);

    match svc.create_property(req_body.into()).await {
        Ok(p) => Ok(created_json(PropertyDto::from(p))),
        Err(e) => {
            error!("Failed to create property: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_property(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
    JsonBody(req_body): JsonBody<UpdatePropertyReq>,
) -> Result<Json<PropertyDto>, ProblemResponse> {
    info!("Updating property {} with: {:?}", id, req_body);

    match svc.update_property(id, req_body.into()).await {
        Ok(Some(p)) => Ok(Json(PropertyDto::from(p))),
        Ok(None) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to update property {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn delete_property(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Deleting property: {}", id);

    match svc.delete_property(id).await {
        Ok(true) => Ok(deleted("Property")),
        Ok(false) => Err(not_found(id, uri.path())),
        Err(e) => {
            error!("Failed to delete property {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}
