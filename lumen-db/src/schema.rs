//! SurrealDB schema definitions for Lumen.
//!
//! Timestamps are stored as RFC 3339 strings and compared in Rust with
//! chrono, so every expiry comparison happens in one timezone-normalized
//! representation.

/// Complete Lumen schema.
pub const LUMEN_SCHEMA: &str = r#"
-- ============================================
-- Boards
-- ============================================
DEFINE TABLE board SCHEMAFULL;
DEFINE FIELD name ON board TYPE string;
DEFINE FIELD created_at ON board TYPE string;
DEFINE INDEX idx_board_name ON board FIELDS name UNIQUE;

-- ============================================
-- Manifests (append-only history, one active per board)
-- ============================================
DEFINE TABLE manifest SCHEMAFULL;
DEFINE FIELD board ON manifest TYPE string;
DEFINE FIELD manifest ON manifest FLEXIBLE TYPE object;
DEFINE FIELD version ON manifest TYPE int;
DEFINE FIELD is_active ON manifest TYPE bool;
DEFINE FIELD created_at ON manifest TYPE string;
DEFINE INDEX idx_manifest_board ON manifest FIELDS board;

-- ============================================
-- Firmware records
-- ============================================
DEFINE TABLE firmware SCHEMAFULL;
DEFINE FIELD board ON firmware TYPE string;
DEFINE FIELD version ON firmware TYPE string;
DEFINE FIELD filename ON firmware TYPE string;
DEFINE FIELD size ON firmware TYPE int;
DEFINE FIELD hmac ON firmware TYPE string;
DEFINE FIELD created_at ON firmware TYPE string;
DEFINE INDEX idx_firmware_board ON firmware FIELDS board;

-- ============================================
-- Dynamic node configs (flattened, keyed by content key)
-- ============================================
DEFINE TABLE dynamic_config SCHEMAFULL;
DEFINE FIELD content_key ON dynamic_config TYPE string;
DEFINE FIELD component_type ON dynamic_config TYPE string ASSERT $value IN ['DynamicText', 'LLMText'];
DEFINE FIELD template ON dynamic_config TYPE string;
DEFINE FIELD entities ON dynamic_config TYPE string;
DEFINE FIELD model ON dynamic_config TYPE string;
DEFINE FIELD ttl_seconds ON dynamic_config TYPE int;
DEFINE INDEX idx_dynamic_config_key ON dynamic_config FIELDS content_key UNIQUE;

-- ============================================
-- Cached dynamic content
-- ============================================
DEFINE TABLE dynamic_content SCHEMAFULL;
DEFINE FIELD content_key ON dynamic_content TYPE string;
DEFINE FIELD rendered_text ON dynamic_content TYPE string;
DEFINE FIELD etag ON dynamic_content TYPE string;
DEFINE FIELD expires_at ON dynamic_content TYPE string;
DEFINE FIELD created_at ON dynamic_content TYPE string;
DEFINE INDEX idx_dynamic_content_key ON dynamic_content FIELDS content_key UNIQUE;
"#;
