//! REST plumbing shared by the entity modules: RFC 9457 problem responses,
//! strict extractors, JSON response helpers and the shutdown signal.

pub mod error_layer;
pub mod extract;
pub mod problem;
pub mod response;
pub mod shutdown;

pub use extract::{JsonBody, PathId};
pub use problem::{Problem, ProblemResponse, APPLICATION_PROBLEM_JSON};
pub use response::{created_json, deleted, ok_json, MessageResponse};
pub use shutdown::wait_for_shutdown;
