use anyhow::{Context, Result};
use api_ingress::{ApiIngress, ApiIngressConfig};
use appointments::{config::AppointmentsConfig, AppointmentsModule};
use axum::Router;
use clap::{Parser, Subcommand};
use dbkit::DbHandle;
use mimalloc::MiMalloc;
use properties::{config::PropertiesConfig, PropertiesModule};
use runtime::{AppConfig, CliOverrides};
use sea_orm::DatabaseConnection;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use users::{config::UsersConfig, UsersModule};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Rental Server - users, properties and appointments over REST
#[derive(Parser)]
#[command(name = "rental-server")]
#[command(about = "Rental Server - users, properties and appointments over REST")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
    /// Apply database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_cli_overrides(CliOverrides {
        port: cli.port,
        verbose: cli.verbose,
        mock: cli.mock,
    });

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Rental server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(&config),
        Commands::Migrate => migrate_only(&config).await,
    }
}

/// Typed module sections, parsed up front so bad config fails before anything starts.
struct ModuleConfigs {
    api_ingress: ApiIngressConfig,
    users: UsersConfig,
    properties: PropertiesConfig,
    appointments: AppointmentsConfig,
}

impl ModuleConfigs {
    fn from_app(config: &AppConfig) -> Result<Self> {
        let mut api_ingress: ApiIngressConfig = config.module_config("api_ingress")?;
        if config.server.timeout_sec > 0 {
            api_ingress.request_timeout_sec = config.server.timeout_sec;
        }
        Ok(Self {
            api_ingress,
            users: config.module_config("users")?,
            properties: config.module_config("properties")?,
            appointments: config.module_config("appointments")?,
        })
    }
}

async fn connect_db(config: &AppConfig) -> Result<DbHandle> {
    let url = config
        .database_url()?
        .context("Database URL not configured")?;

    let connect_opts = config
        .database
        .as_ref()
        .map(|db| db.connect_opts())
        .unwrap_or_default();

    let db = DbHandle::connect(&url, connect_opts)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected DB backend: {:?}", db.engine());
    Ok(db)
}

/// Appointments reference users and properties, so they migrate last.
async fn migrate_all(conn: &DatabaseConnection) -> Result<()> {
    UsersModule::migrate(conn).await?;
    PropertiesModule::migrate(conn).await?;
    AppointmentsModule::migrate(conn).await?;
    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    let modules = ModuleConfigs::from_app(&config)?;

    let db = connect_db(&config).await?;
    let conn = db.sea();
    migrate_all(&conn).await?;

    tracing::info!("Initializing modules...");
    let users = UsersModule::new(conn.clone(), modules.users);
    let properties = PropertiesModule::new(conn.clone(), modules.properties);
    let appointments = AppointmentsModule::new(
        conn,
        modules.appointments,
        users.client(),
        properties.client(),
    );

    let ingress = ApiIngress::new(modules.api_ingress);
    let addr = ingress.bind_addr(&format!("{}:{}", config.server.host, config.server.port))?;

    let routes = users.register_rest(Router::new());
    let routes = properties.register_rest(routes);
    let routes = appointments.register_rest(routes);
    let router = ingress.build_router(routes)?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = restkit::wait_for_shutdown().await {
            tracing::error!(error = %e, "Signal handler failed; shutting down");
        }
        on_signal.cancel();
    });

    let result = ingress.serve(router, addr, cancel).await;

    db.close().await;
    tracing::info!("Rental server stopped");
    result
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    let modules = ModuleConfigs::from_app(config)?;
    config.database_url()?.context("Database URL not configured")?;
    let ingress = ApiIngress::new(modules.api_ingress);
    ingress.bind_addr(&format!("{}:{}", config.server.host, config.server.port))?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

async fn migrate_only(config: &AppConfig) -> Result<()> {
    let db = connect_db(config).await?;
    migrate_all(&db.sea()).await?;
    db.close().await;
    println!("Migrations applied");
    Ok(())
}
