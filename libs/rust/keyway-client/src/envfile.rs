//! Line-oriented `.env` content parser.
//!
//! Best-effort extraction: malformed lines are skipped, never errored.
//! Processing is strictly line-by-line, so a quoted value containing a
//! literal newline is split by the line split before parsing and will not
//! be reconstructed.

use crate::types::SecretsMap;

/// Parse `.env`-format content into a key/value mapping.
///
/// Rules, applied per line:
/// - leading/trailing whitespace is trimmed; empty and `#`-comment lines
///   are skipped;
/// - the first `=` splits key from value; lines without `=` are skipped;
/// - the key is trimmed and must be non-empty;
/// - the value keeps everything after the first `=` verbatim, except that
///   one matching outer pair of `"` or `'` quotes is stripped (single
///   pass, no escape interpretation);
/// - a later assignment to the same key overwrites the earlier one.
#[must_use]
pub fn parse(content: &str) -> SecretsMap {
    let mut result = SecretsMap::new();

    for line in content.split('\n') {
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some(eq_index) = trimmed.find('=') else {
            continue;
        };

        let key = trimmed[..eq_index].trim();
        if key.is_empty() {
            continue;
        }

        let value = strip_outer_quotes(&trimmed[eq_index + 1..]);
        result.insert(key.to_string(), value.to_string());
    }

    result
}

/// Strip exactly one matching pair of outer quotes, if present.
fn strip_outer_quotes(value: &str) -> &str {
    if value.len() >= 2 {
        let bytes = value.as_bytes();
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Serialize a mapping to `key=value` lines, keys sorted for deterministic
/// output. Values are written verbatim; quote-free single-line values
/// round-trip through [`parse`].
#[must_use]
pub fn serialize(secrets: &SecretsMap) -> String {
    let mut keys: Vec<&String> = secrets.keys().collect();
    keys.sort();

    let mut out = String::new();
    for key in keys {
        if let Some(value) = secrets.get(key) {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
    }
    out
}
