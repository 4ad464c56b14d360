//! Structured form parsing using the declared content type as-is.

use bytes::Bytes;
use futures_util::stream;
use mime::Mime;

use super::FormFields;
use crate::error::{AppError, AppResult};

/// Parse the body the way the declared content type says it is framed:
/// multipart when a boundary parameter is present, urlencoded otherwise.
///
/// A multipart declaration without a usable boundary is reported as a parse
/// failure; the caller decides whether boundary recovery applies.
pub async fn try_standard_parse(declared_type: &str, body: &Bytes) -> AppResult<FormFields> {
    if declared_type
        .to_ascii_lowercase()
        .contains("multipart/form-data")
    {
        let boundary = declared_boundary(declared_type).ok_or_else(|| {
            AppError::BodyParseFailure("multipart content type without a boundary".to_string())
        })?;
        return parse_multipart(body.clone(), &boundary).await;
    }

    parse_urlencoded(body)
}

pub fn parse_urlencoded(body: &Bytes) -> AppResult<FormFields> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
        .map_err(|err| AppError::BodyParseFailure(err.to_string()))?;

    let mut fields = FormFields::default();
    for (name, value) in pairs {
        fields.insert(name, value);
    }
    Ok(fields)
}

/// Standards-compliant multipart parse. Only text fields are kept; file
/// parts have no meaning to this harness.
pub async fn parse_multipart(body: Bytes, boundary: &str) -> AppResult<FormFields> {
    let stream = stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut fields = FormFields::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BodyParseFailure(err.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|err| AppError::BodyParseFailure(err.to_string()))?;
        fields.insert(name, value);
    }
    Ok(fields)
}

fn declared_boundary(declared_type: &str) -> Option<String> {
    declared_type
        .parse::<Mime>()
        .ok()
        .and_then(|mime| mime.get_param("boundary").map(|v| v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_comes_from_the_mime_parameter() {
        assert_eq!(
            declared_boundary("multipart/form-data; boundary=XYZ").as_deref(),
            Some("XYZ")
        );
        assert_eq!(declared_boundary("multipart/form-data"), None);
        assert_eq!(declared_boundary("not a mime type"), None);
    }

    #[tokio::test]
    async fn multipart_with_declared_boundary_parses() {
        let body = Bytes::from(
            "--XYZ\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\na@b.com\r\n--XYZ--\r\n",
        );
        let fields = parse_multipart(body, "XYZ").await.unwrap();
        assert_eq!(fields.email(), Some("a@b.com"));
    }

    #[test]
    fn urlencoded_values_decode_exactly() {
        let body = Bytes::from("email=user%2Btag%40example.com&password=p%26ss%3Dword");
        let fields = parse_urlencoded(&body).unwrap();
        assert_eq!(fields.email(), Some("user+tag@example.com"));
        assert_eq!(fields.password(), Some("p&ss=word"));
    }
}
