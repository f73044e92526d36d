//! Process runtime support: layered configuration and logging.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, CliOverrides, DatabaseConfig, ServerConfig};
pub use logging::{init_logging_from_config, LogSection, LoggingConfig};
