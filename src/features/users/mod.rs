//! Storefront users.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/users` | No | Register user (validated name + email) |
//! | GET | `/api/admin/users` | Basic | List users (paginated) |
//! | GET | `/api/admin/users/{id}` | Basic | Get user |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::UserService;
