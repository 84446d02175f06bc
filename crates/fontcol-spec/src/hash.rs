//! Canonical hashing.
//!
//! - Manifest canonicalization: sorted keys, no whitespace
//! - BLAKE3 over the canonical text for manifest hashes
//! - BLAKE3 over raw bytes for descriptor and output hashes

use crate::error::SpecError;
use crate::manifest::FontManifest;

/// Computes the canonical BLAKE3 hash of a manifest.
///
/// ```text
/// manifest_hash = hex(BLAKE3(canonical(manifest_json)))
/// ```
///
/// # Example
/// ```
/// use fontcol_spec::{FontManifest, GlyphFormat};
/// use fontcol_spec::hash::canonical_manifest_hash;
///
/// let manifest = FontManifest::builder("font_16x8", GlyphFormat::RowMajor)
///     .source("font.mem")
///     .build();
///
/// let hash = canonical_manifest_hash(&manifest).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn canonical_manifest_hash(manifest: &FontManifest) -> Result<String, SpecError> {
    let value = manifest.to_value()?;
    Ok(content_hash(canonicalize_json(&value).as_bytes()))
}

/// Hex BLAKE3 hash of raw bytes.
pub fn content_hash(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// Canonical JSON text: object keys sorted, no insignificant whitespace,
/// minimal string escaping.
pub fn canonicalize_json(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "null".to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => format_string(s),
        serde_json::Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(canonicalize_json).collect();
            format!("[{}]", items.join(","))
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            let pairs: Vec<String> = entries
                .into_iter()
                .map(|(k, v)| format!("{}:{}", format_string(k), canonicalize_json(v)))
                .collect();
            format!("{{{}}}", pairs.join(","))
        }
    }
}

fn format_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 2);
    result.push('"');
    for c in s.chars() {
        match c {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            c if c < '\x20' => {
                result.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => result.push(c),
        }
    }
    result.push('"');
    result
}
