//! Redaction and debug-page metadata.
//!
//! Anything that can reach a log line or the debug page goes through
//! `redact_credentials` first; the debug page itself only ever sees field
//! names and lengths.

use axum::http::HeaderMap;

use crate::parser::FormFields;

const SENSITIVE_KEYS: [&str; 2] = ["email", "password"];

/// Mask the value portion of any `email=...` / `password=...` occurrence.
/// A value runs until the next `&`, quote, or whitespace.
pub fn redact_credentials(input: &str) -> String {
    let mut out = input.to_string();
    for key in SENSITIVE_KEYS {
        let needle = format!("{key}=");
        let mut from = 0;
        while let Some(pos) = out[from..].find(&needle) {
            let start = from + pos + needle.len();
            let end = out[start..]
                .find(|c: char| c == '&' || c == '"' || c.is_whitespace())
                .map_or(out.len(), |i| start + i);
            out.replace_range(start..end, "***");
            from = start + "***".len();
        }
    }
    out
}

/// Name, length and nothing else.
#[derive(Debug)]
pub struct FieldMeta {
    pub name: String,
    pub len: usize,
}

pub fn field_metadata(fields: &FormFields) -> Vec<FieldMeta> {
    fields
        .iter()
        .map(|(name, value)| FieldMeta {
            name: name.to_string(),
            len: value.len(),
        })
        .collect()
}

/// Header dump for the debug page, redacted. Non-ASCII values are elided
/// rather than lossily decoded.
pub fn header_lines(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = value.to_str().unwrap_or("<non-ascii value>");
            (name.to_string(), redact_credentials(value))
        })
        .collect()
}
