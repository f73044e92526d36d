use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let appointments = Router::new()
        .route(
            "/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )
        .route(
            "/appointments/{id}",
            get(handlers::get_appointment)
                .put(handlers::update_appointment)
                .delete(handlers::delete_appointment),
        )
        .layer(Extension(service));

    router.merge(appointments)
}
