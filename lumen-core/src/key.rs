//! Content key derivation.
//!
//! A content key identifies the resolved-content identity of a dynamic node:
//! same declaration, same key, on every save and on every system that
//! derives it. The canonical encoding is a JSON object with its keys in
//! lexicographic order and no whitespace, hashed with SHA-256 and truncated
//! to the first 16 hex characters:
//!
//! ```text
//! {"entities":"<sorted,deduplicated,trimmed refs>","model":"<id or empty>","template":"<raw text>"}
//! ```
//!
//! This is a bit-exact cross-system contract. Reimplementations (device
//! firmware included) must reproduce it or keys silently diverge.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::constants::{CONTENT_KEY_HEX_LEN, ETAG_HEX_LEN};

/// Canonical keying object. Field order is the lexicographic key order of
/// the wire contract; serde emits fields in declaration order.
#[derive(Serialize)]
struct CanonicalKey<'a> {
    entities: String,
    model: &'a str,
    template: &'a str,
}

/// Normalize a raw comma-separated entity list: split, trim, drop empties,
/// deduplicate, sort lexicographically, rejoin.
fn canonical_entities(raw: &str) -> String {
    let mut refs: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .collect();
    refs.sort_unstable();
    refs.dedup();
    refs.join(",")
}

/// Derive the content key for a dynamic node declaration.
///
/// `model` is empty for plain nodes. Pure and infallible: the canonical
/// struct contains only strings, so serialization cannot fail.
pub fn compute_content_key(template: &str, entities: &str, model: &str) -> String {
    let canonical = CanonicalKey {
        entities: canonical_entities(entities),
        model,
        template,
    };
    let encoded = serde_json::to_string(&canonical).expect("string-only struct serializes");
    let digest = Sha256::digest(encoded.as_bytes());
    hex::encode(digest)[..CONTENT_KEY_HEX_LEN].to_string()
}

/// Revalidation tag for a piece of resolved text: SHA-256 of the text,
/// truncated like a content key. Identical text always revalidates.
pub fn compute_etag(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    hex::encode(digest)[..ETAG_HEX_LEN].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_etag_is_stable_and_text_sensitive() {
        assert_eq!(compute_etag("abc"), compute_etag("abc"));
        assert_ne!(compute_etag("abc"), compute_etag("abd"));
        assert_eq!(compute_etag("abc").len(), ETAG_HEX_LEN);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let a = compute_content_key("Hello {{time:now}}", "sensor.a,sensor.b", "qwen3-8b");
        let b = compute_content_key("Hello {{time:now}}", "sensor.a,sensor.b", "qwen3-8b");
        assert_eq!(a, b);
        assert_eq!(a.len(), CONTENT_KEY_HEX_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_entity_order_whitespace_and_duplicates_do_not_matter() {
        let a = compute_content_key("T", " b, a ,a", "");
        let b = compute_content_key("T", "a,b", "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_each_field_contributes_to_the_key() {
        let base = compute_content_key("T", "a,b", "m");
        assert_ne!(base, compute_content_key("T2", "a,b", "m"));
        assert_ne!(base, compute_content_key("T", "a,c", "m"));
        assert_ne!(base, compute_content_key("T", "a,b", "m2"));
    }

    #[test]
    fn test_empty_entity_list_variants_collapse() {
        let a = compute_content_key("T", "", "");
        let b = compute_content_key("T", " , ,", "");
        assert_eq!(a, b);
    }

    #[test]
    fn test_canonical_encoding_is_compact_and_sorted() {
        // Pin the exact canonical bytes: independent implementations hash
        // this string, not our struct.
        let canonical = CanonicalKey {
            entities: canonical_entities(" b, a ,a"),
            model: "",
            template: "T",
        };
        let encoded = serde_json::to_string(&canonical).unwrap();
        assert_eq!(encoded, r#"{"entities":"a,b","model":"","template":"T"}"#);
    }
}
