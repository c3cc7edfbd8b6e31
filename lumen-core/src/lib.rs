//! Lumen Core
//!
//! Core domain logic for the Lumen UI content server:
//! - Content key derivation (the cross-system keying contract)
//! - Manifest tree walking, validation, and key injection
//! - The component property schema served to the editor
//! - Device-font text sanitization
//!
//! Everything in this crate is pure: no I/O, no clocks beyond what callers
//! pass in. Persistence lives in `lumen-db`, outbound resolution in
//! `lumen-sources`.

pub mod constants;
pub mod key;
pub mod sanitize;
pub mod schema;
pub mod types;
pub mod validate;
pub mod walker;

pub use constants::*;
pub use key::{compute_content_key, compute_etag};
pub use sanitize::sanitize_for_device;
pub use types::{DynamicConfig, DynamicKind};
pub use validate::validate_manifest;
pub use walker::extract_dynamic_configs;
