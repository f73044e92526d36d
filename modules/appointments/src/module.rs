use std::sync::Arc;

use axum::Router;
use properties::contract::PropertiesApi;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use users::contract::UsersApi;

use crate::api::rest::routes;
use crate::config::AppointmentsConfig;
use crate::contract::client::AppointmentsApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::AppointmentsLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmAppointmentsRepository};

/// Appointments module. Reference checks go through the users and properties clients.
#[derive(Clone)]
pub struct AppointmentsModule {
    service: Arc<Service>,
}

impl AppointmentsModule {
    pub fn new(
        conn: DatabaseConnection,
        cfg: AppointmentsConfig,
        users: Arc<dyn UsersApi>,
        properties: Arc<dyn PropertiesApi>,
    ) -> Self {
        info!(
            enforce_date_order = cfg.enforce_date_order,
            check_references_on_update = cfg.check_references_on_update,
            "Initializing appointments module"
        );
        let repo = Arc::new(SeaOrmAppointmentsRepository::new(conn));
        let service = Service::new(
            repo,
            users,
            properties,
            ServiceConfig {
                enforce_date_order: cfg.enforce_date_order,
                check_references_on_update: cfg.check_references_on_update,
                max_title_length: cfg.max_title_length,
            },
        );
        Self {
            service: Arc::new(service),
        }
    }

    /// Run after the users and properties migrations.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running appointments database migrations");
        Migrator::up(conn, None).await?;
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn AppointmentsApi> {
        Arc::new(AppointmentsLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering appointments REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
