//! Lumen Database Layer
//!
//! SurrealDB-backed persistence for boards, manifests, firmware records, and
//! the dynamic content subsystem (configs + cached text).
//!
//! Repositories issue explicit queries against a shared [`Datastore`]
//! handle. Multi-statement writes that must be atomic (deactivate-then-insert
//! manifest, config upserts) run inside a single transaction query.

pub mod datastore;
pub mod entities;
pub mod error;
pub mod repos;
pub mod schema;

pub use datastore::Datastore;
pub use entities::*;
pub use error::{DbError, DbResult};
pub use repos::{
    BoardRepo, BoardSummary, CachedContent, Database, DynamicRepo, FirmwareRepo, ManifestRepo,
};
pub use schema::LUMEN_SCHEMA;
