pub mod client;
pub mod error;
pub mod model;

pub use client::PropertiesApi;
pub use error::PropertiesError;
pub use model::{NewProperty, Property, PropertyPatch};
