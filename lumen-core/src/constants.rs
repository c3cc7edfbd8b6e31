//! Centralized constants for the Lumen server.
//!
//! Magic numbers and protocol-defined defaults live here.

/// Hex characters kept from the SHA-256 digest when deriving a content key.
/// Part of the cross-system keying contract; changing it orphans every
/// persisted config and cache entry.
pub const CONTENT_KEY_HEX_LEN: usize = 16;

/// Hex characters of the SHA-256 text digest used as a revalidation tag.
pub const ETAG_HEX_LEN: usize = 16;

/// Default refresh interval for plain dynamic text (seconds).
pub const DEFAULT_TEXT_TTL_SECS: i64 = 60;

/// Default cache lifetime for generated text (seconds).
pub const DEFAULT_LLM_TTL_SECS: i64 = 300;

/// Model key used when a generative node does not name one.
pub const DEFAULT_LLM_MODEL: &str = "qwen3-8b";

/// Token budget for a single generation call.
pub const LLM_MAX_TOKENS: u32 = 200;

/// Sampling temperature for generation calls.
pub const LLM_TEMPERATURE: f64 = 0.7;

/// Timeout for home-automation state queries (seconds).
pub const STATE_QUERY_TIMEOUT_SECS: u64 = 10;

/// Timeout for generation calls (seconds).
pub const GENERATION_TIMEOUT_SECS: u64 = 60;

/// Default HTTP port
pub const DEFAULT_HTTP_PORT: u16 = 8080;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_and_etag_widths_match_wire_format() {
        assert_eq!(CONTENT_KEY_HEX_LEN, 16);
        assert_eq!(ETAG_HEX_LEN, 16);
    }

    #[test]
    fn test_generation_timeout_exceeds_state_timeout() {
        assert!(GENERATION_TIMEOUT_SECS > STATE_QUERY_TIMEOUT_SECS);
    }
}
