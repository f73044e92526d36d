use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes;
use crate::config::PropertiesConfig;
use crate::contract::client::PropertiesApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::PropertiesLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmPropertiesRepository};

#[derive(Clone)]
pub struct PropertiesModule {
    service: Arc<Service>,
}

impl PropertiesModule {
    pub fn new(conn: DatabaseConnection, cfg: PropertiesConfig) -> Self {
        info!(
            min_area = cfg.min_area,
            max_address_length = cfg.max_address_length,
            "Initializing properties module"
        );
        let repo = Arc::new(SeaOrmPropertiesRepository::new(conn));
        let service = Service::new(
            repo,
            ServiceConfig {
                min_area: cfg.min_area,
                max_address_length: cfg.max_address_length,
            },
        );
        Self {
            service: Arc::new(service),
        }
    }

    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running properties database migrations");
        Migrator::up(conn, None).await?;
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    pub fn client(&self) -> Arc<dyn PropertiesApi> {
        Arc::new(PropertiesLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering properties REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
