use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use crate::api::rest::handlers;
use crate::domain::service::Service;

pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    let properties = Router::new()
        .route(
            "/properties",
            get(handlers::list_properties).post(handlers::create_property),
        )
        .route(
            "/properties/{id}",
            get(handlers::get_property)
                .put(handlers::update_property)
                .delete(handlers::delete_property),
        )
        .layer(Extension(service));

    router.merge(properties)
}
