use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::api::rest::routes;
use crate::config::UsersConfig;
use crate::contract::client::UsersApi;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::UsersLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmUsersRepository};

/// Users module: one service instance shared by the REST layer and the local client.
#[derive(Clone)]
pub struct UsersModule {
    service: Arc<Service>,
}

impl UsersModule {
    pub fn new(conn: DatabaseConnection, cfg: UsersConfig) -> Self {
        info!(
            max_name_length = cfg.max_name_length,
            "Initializing users module"
        );
        let repo = Arc::new(SeaOrmUsersRepository::new(conn));
        let service = Service::new(
            repo,
            ServiceConfig {
                max_name_length: cfg.max_name_length,
            },
        );
        Self {
            service: Arc::new(service),
        }
    }

    /// Apply pending schema migrations.
    pub async fn migrate(conn: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running users database migrations");
        Migrator::up(conn, None).await?;
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn UsersApi> {
        Arc::new(UsersLocalClient::new(self.service.clone()))
    }

    pub fn register_rest(&self, router: Router) -> Router {
        info!("Registering users REST routes");
        routes::register_routes(router, self.service.clone())
    }
}
