//! Orders, read-only and keyed by an opaque order id.
//!
//! Order creation, payment and status transitions live outside this service.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::OrderService;
