//! HTTP Adapter (Driver Side)
//!
//! REST API surface: router, handlers, and the error-to-response mapping.

mod controller;
mod response;

pub use controller::{AppState, create_router};
pub use response::ApiError;
