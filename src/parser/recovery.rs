//! Heuristic multipart recovery.
//!
//! When an intermediary rewrites or strips the Content-Type header, the
//! structured parse sees multipart framing through the wrong lens: either the
//! urlencoded parser swallows the whole body into one garbage key, or the
//! multipart parser searches for a boundary the body never contains. This
//! module recovers the fields using the boundary the body actually starts
//! with.
//!
//! Best effort only. Nested parts, transfer encodings and boundaries inside
//! non-UTF8 content are out of scope; the harness cares about two or three
//! known text fields.

use super::FormFields;

const DISPOSITION_MARKER: &str = "Content-Disposition: form-data;";

/// True when the body carries multipart framing, whatever the Content-Type
/// header claimed.
pub fn looks_like_multipart(body: &str) -> bool {
    body.starts_with("--") && body.contains(DISPOSITION_MARKER)
}

/// True when a structured parse chewed through multipart framing as if it
/// were something else: the telltale is a disposition fragment surviving
/// inside a key or value, or no fields at all.
pub fn is_garbled(fields: &FormFields) -> bool {
    fields.is_empty()
        || fields
            .iter()
            .any(|(name, value)| name.contains(DISPOSITION_MARKER) || value.contains(DISPOSITION_MARKER))
}

/// Recover fields by splitting on the boundary taken from the body's first
/// line. Returns `None` when the framing heuristic does not hold or nothing
/// could be recovered.
pub fn try_boundary_recovery(body: &str) -> Option<FormFields> {
    if !looks_like_multipart(body) {
        return None;
    }

    let boundary = boundary_from_first_line(body)?;
    let marker = format!("--{boundary}");

    let mut fields = FormFields::default();
    for segment in body.split(marker.as_str()) {
        let trimmed = segment.trim();
        if trimmed.is_empty() || trimmed == "--" {
            continue;
        }
        let Some((headers, value)) = segment.split_once("\r\n\r\n") else {
            continue;
        };
        let Some(name) = field_name(headers) else {
            continue;
        };
        // One trailing CRLF belongs to the framing, the rest is the value.
        let value = value.strip_suffix("\r\n").unwrap_or(value);
        fields.insert(name, value);
    }

    if fields.is_empty() { None } else { Some(fields) }
}

/// First line of the body, sans trailing whitespace; `--XYZ` yields `XYZ`.
fn boundary_from_first_line(body: &str) -> Option<String> {
    let first_line = body.split('\n').next().unwrap_or("").trim_end();
    if first_line.starts_with("--") && first_line.len() > 2 {
        Some(first_line[2..].to_string())
    } else {
        None
    }
}

/// Extract the `name="..."` parameter from a part's header block.
fn field_name(headers: &str) -> Option<String> {
    let start = headers.find("name=\"")? + "name=\"".len();
    let rest = &headers[start..];
    let end = rest.find('"')?;
    Some(rest[..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_FIELD_BODY: &str = "--B\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\na@b.com\r\n--B\r\nContent-Disposition: form-data; name=\"password\"\r\n\r\nsecret\r\n--B--";

    #[test]
    fn framing_heuristic() {
        assert!(looks_like_multipart(TWO_FIELD_BODY));
        assert!(!looks_like_multipart("email=a%40b.com&password=secret"));
        // dashes alone are not enough
        assert!(!looks_like_multipart("--just some text--"));
    }

    #[test]
    fn boundary_is_taken_from_the_first_line() {
        assert_eq!(boundary_from_first_line(TWO_FIELD_BODY).as_deref(), Some("B"));
        assert_eq!(
            boundary_from_first_line("--longer-boundary-123\r\nrest").as_deref(),
            Some("longer-boundary-123")
        );
        assert_eq!(boundary_from_first_line("--\r\nno token"), None);
        assert_eq!(boundary_from_first_line("no dashes"), None);
    }

    #[test]
    fn recovers_both_fields() {
        let fields = try_boundary_recovery(TWO_FIELD_BODY).unwrap();
        assert_eq!(fields.email(), Some("a@b.com"));
        assert_eq!(fields.password(), Some("secret"));
    }

    #[test]
    fn values_keep_their_exact_bytes() {
        let body = "--B\r\nContent-Disposition: form-data; name=\"password\"\r\n\r\n  spaced out  \r\n--B--";
        let fields = try_boundary_recovery(body).unwrap();
        assert_eq!(fields.password(), Some("  spaced out  "));
    }

    #[test]
    fn fp_data_is_carried_through() {
        let body = "--B\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\na@b.com\r\n--B\r\nContent-Disposition: form-data; name=\"fp-data\"\r\n\r\nopaque-blob\r\n--B--";
        let fields = try_boundary_recovery(body).unwrap();
        assert_eq!(fields.fp_data(), Some("opaque-blob"));
    }

    #[test]
    fn segments_without_a_name_are_skipped() {
        let body = "--B\r\nContent-Disposition: form-data\r\n\r\nanonymous\r\n--B\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\na@b.com\r\n--B--";
        let fields = try_boundary_recovery(body).unwrap();
        assert_eq!(fields.email(), Some("a@b.com"));
        assert_eq!(fields.get("anonymous"), None);
    }

    #[test]
    fn urlencoded_parse_of_a_multipart_body_reads_as_garbled() {
        let mut fields = FormFields::default();
        fields.insert(
            "--B\r\nContent-Disposition: form-data; name",
            "\"email\"\r\n\r\na@b.com",
        );
        assert!(is_garbled(&fields));

        let mut clean = FormFields::default();
        clean.insert("email", "a@b.com");
        assert!(!is_garbled(&clean));
        assert!(is_garbled(&FormFields::default()));
    }
}
