use std::sync::Arc;

use axum::{http::Uri, response::IntoResponse, Extension, Json};
use restkit::{created_json, deleted, JsonBody, PathId, ProblemResponse};
use tracing::{error, info};

use crate::api::rest::dto::{AppointmentDto, CreateAppointmentReq, UpdateAppointmentReq};
use crate::api::rest::error::map_domain_error;
use crate::domain::{error::DomainError, service::Service};

pub async fn list_appointments(
    Extension(svc): Extension<Arc<Service>>,
    uri: Uri,
) -> Result<Json<Vec<AppointmentDto>>, ProblemResponse> {
    info!("Listing appointments");

    match svc.list().await {
        Ok(all) => Ok(Json(all.into_iter().map(AppointmentDto::from).collect())),
        Err(e) => {
            error!("Failed to list appointments: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn get_appointment(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    info!("Getting appointment with id: {}", id);

    match svc.get(id).await {
        Ok(Some(a)) => Ok(Json(AppointmentDto::from(a))),
        Ok(None) => Err(map_domain_error(&DomainError::not_found(id), uri.path())),
        Err(e) => {
            error!("Failed to get appointment {}: {}", id, e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn create_appointment(
    uri: Uri,
    Extension(svc): Extension<Arc<Service>>,
    JsonBody(req_body): JsonBody<CreateAppointmentReq>,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Creating appointment: {:?}", req_body);

    match svc.create(req_body.into()).await {
        Ok(a) => Ok(created_json(AppointmentDto::from(a))),
        Err(e) => {
            info!("Appointment rejected: {}", e);
            Err(map_domain_error(&e, uri.path()))
        }
    }
}

pub async fn update_appointment(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
    JsonBody(req_body): JsonBody<UpdateAppointmentReq>,
) -> Result<Json<AppointmentDto>, ProblemResponse> {
    info!("Updating appointment {} with: {:?}", id, req_body);

    svc.update(id, req_body.into())
        .await
        .map(|a| Json(AppointmentDto::from(a)))
        .map_err(|e| {
            info!("Appointment {} update rejected: {}", id, e);
            map_domain_error(&e, uri.path())
        })
}

pub async fn delete_appointment(
    Extension(svc): Extension<Arc<Service>>,
    PathId(id): PathId,
    uri: Uri,
) -> Result<impl IntoResponse, ProblemResponse> {
    info!("Deleting appointment: {}", id);

    match svc.delete(id).await {
        Ok(()) => Ok(deleted("Appointment")),
        Err(e) => Err(map_domain_error(&e, uri.path())),
    }
}
