// === PUBLIC CONTRACT ===
// Other modules depend on `contract` only.
pub mod contract;

pub use contract::{client, error, model};

// === MODULE WIRING ===
pub mod module;
pub use module::PropertiesModule;

// === INTERNAL MODULES ===
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
