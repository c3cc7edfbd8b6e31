//! Persisted entity definitions

mod board;
mod dynamic;
mod firmware;
mod manifest;

pub use board::BoardEntity;
pub use dynamic::{DynamicConfigEntity, DynamicContentEntity};
pub use firmware::FirmwareEntity;
pub use manifest::ManifestEntity;
