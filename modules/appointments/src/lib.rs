//! Appointments: visits of a user to a property. Creation and reference
//! changes are checked against the users and properties modules through
//! their contract clients.

// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{client, error, model};

// === MODULE WIRING ===
pub mod module;
pub use module::AppointmentsModule;

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
