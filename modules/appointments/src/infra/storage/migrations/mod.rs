use sea_orm_migration::prelude::*;

mod m20240101_000001_create_appointments;

/// Needs the `users` and `properties` tables to exist first.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migration_table_name() -> DynIden {
        Alias::new("seaql_migrations_appointments").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_appointments::Migration)]
    }
}
