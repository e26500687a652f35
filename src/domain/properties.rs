// SPDX-License-Identifier: MIT OR Apache-2.0

//! Codec for `.properties`-style sidecar resources.
//!
//! Object resolvers describe how a content key's payload is to be
//! interpreted through a companion resource at `key + ".properties"`. The
//! format is line-based `key=value` pairs: `#` and `!` start comment lines,
//! `=` and `:` both separate key from value, surrounding whitespace is
//! trimmed, and blank lines are ignored.

use crate::domain::errors::{Result, SettingsError};
use std::collections::HashMap;

/// Sidecar property naming the resolver implementation that produced the
/// content.
pub const PROP_OBJECT_RESOLVER_KEY: &str = "objectResolverKey";

/// Sidecar property declaring whether the resolved object should be cached.
pub const PROP_CACHED: &str = "cached";

/// Sidecar property marking the content as not writable through an object
/// resolver.
pub const PROP_READONLY: &str = "readonly";

/// Sidecar property overriding the target definition name for the
/// declarative-assembly resolver.
pub const PROP_BEAN_REF: &str = "bean-ref";

/// Parses property bytes into a key/value map.
///
/// Returns [`SettingsError::Parse`] if the bytes are not valid UTF-8.
/// Malformed lines without a separator are treated as a key with an empty
/// value, as the original format does.
pub fn parse(bytes: &[u8]) -> Result<HashMap<String, String>> {
    let text = std::str::from_utf8(bytes).map_err(|e| SettingsError::Parse {
        what: "properties",
        message: e.to_string(),
    })?;
    let mut result = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        let (key, value) = match line.find(['=', ':']) {
            Some(pos) => (&line[..pos], &line[pos + 1..]),
            None => (line, ""),
        };
        result.insert(key.trim().to_string(), value.trim().to_string());
    }
    Ok(result)
}

/// Serializes key/value pairs back into property bytes.
///
/// Pairs are written in the order given so that written sidecars are stable
/// across round trips.
pub fn to_bytes<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Vec<u8> {
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        out.push('\n');
    }
    out.into_bytes()
}

/// Returns `true` if the map holds the given property with the value
/// `"true"`, compared case-insensitively.
pub fn is_true(properties: &HashMap<String, String>, name: &str) -> bool {
    properties
        .get(name)
        .map(|v| v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
