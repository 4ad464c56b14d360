//! Request-body parsing for the submission endpoints.
//!
//! The declared Content-Type is treated as advisory only: intermediaries are
//! known to strip or rewrite it, so the form path double-checks the body's
//! actual framing and falls back to boundary recovery when the structured
//! parse comes back garbled.

use std::collections::BTreeMap;

use bytes::Bytes;

use crate::error::{AppError, AppResult};

pub mod recovery;
pub mod standard;

/// Field values recovered from one request body. Lives for a single
/// request-response cycle and is discarded with the response.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormFields(BTreeMap<String, String>);

impl FormFields {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email")
    }

    pub fn password(&self) -> Option<&str> {
        self.get("password")
    }

    /// Opaque pass-through field, logged for diagnostics and never validated.
    pub fn fp_data(&self) -> Option<&str> {
        self.get("fp-data")
    }

    pub fn debug_requested(&self) -> bool {
        self.get("debug").is_some_and(|v| v == "1")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Overlay `winners` onto `self`; same-named fields are replaced.
    pub fn merge_over(&mut self, winners: FormFields) {
        for (name, value) in winners.0 {
            self.0.insert(name, value);
        }
    }
}

/// Select a parsing strategy from the declared content type and run it.
pub async fn parse_submission(declared_type: &str, body: &Bytes) -> AppResult<FormFields> {
    let lowered = declared_type.trim().to_ascii_lowercase();

    if lowered.contains("application/json") {
        return parse_json(body);
    }

    if lowered.is_empty()
        || lowered.contains("application/x-www-form-urlencoded")
        || lowered.contains("multipart/form-data")
    {
        return parse_form(declared_type, body).await;
    }

    Err(AppError::UnsupportedContentType(declared_type.to_string()))
}

/// Parse a JSON object body, keeping every string-valued member.
pub fn parse_json(body: &Bytes) -> AppResult<FormFields> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|err| AppError::MalformedJson(err.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| AppError::MalformedJson("expected a JSON object".to_string()))?;

    let mut fields = FormFields::default();
    for (name, value) in object {
        if let Some(text) = value.as_str() {
            fields.insert(name, text);
        }
    }
    Ok(fields)
}

/// Structured form parse, then the boundary-recovery pass when the body turns
/// out to carry multipart framing the structured parse did not understand.
async fn parse_form(declared_type: &str, body: &Bytes) -> AppResult<FormFields> {
    let structured = standard::try_standard_parse(declared_type, body).await;

    let text = String::from_utf8_lossy(body);
    if recovery::looks_like_multipart(&text) {
        let garbled = match &structured {
            Ok(fields) => recovery::is_garbled(fields),
            Err(_) => true,
        };
        if garbled
            && let Some(recovered) = recovery::try_boundary_recovery(&text)
        {
            let mut fields = structured.unwrap_or_default();
            fields.merge_over(recovered);
            return Ok(fields);
        }
    }

    structured
}
