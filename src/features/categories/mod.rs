//! Catalog categories.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/categories` | No | Flat list, or tree with `?tree=true` |
//! | GET | `/api/categories/{slug}` | No | Category with parent/children summaries |
//! | GET | `/api/categories/id/{id}` | No | Lookup by id across the whole tree |
//! | POST | `/api/admin/categories` | Basic | Create category |
//! | PUT | `/api/admin/categories/{id}` | Basic | Replace category |
//! | DELETE | `/api/admin/categories/{id}` | Basic | Delete childless category |

pub mod dtos;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
