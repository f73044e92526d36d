pub mod client;
pub mod error;
pub mod model;

pub use client::AppointmentsApi;
pub use error::AppointmentsError;
pub use model::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
