//! Lumen HTTP API
//!
//! Axum routes over the persistence layer, the data source registry, and
//! the generation service. The dynamic content endpoints (`/dynamic/*`)
//! implement conditional-GET semantics so resource-constrained devices can
//! poll cheaply.

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::{create_server, run_server};
pub use state::{ApiConfig, AppState};
