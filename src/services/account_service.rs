use crate::{
    dto::account::AccountCreated,
    error::{AppError, AppResult},
    parser::FormFields,
};

/// Validate the extracted fields and produce the acknowledgement. No account
/// is created or stored anywhere; success means the input was well-formed.
///
/// `path_segment` is the opaque namespace tag captured from the route. It is
/// echoed back untouched and carries no authorization meaning.
pub fn create_account(
    fields: &FormFields,
    path_segment: Option<&str>,
) -> AppResult<AccountCreated> {
    let email = require(fields.email(), "email")?;
    require(fields.password(), "password")?;

    if let Some(fp) = fields.fp_data() {
        tracing::debug!(fp_data_len = fp.len(), "fp-data present, passed through unused");
    }

    Ok(AccountCreated {
        message: "Account created".to_string(),
        email: email.to_string(),
        path_segment: path_segment.map(str::to_string),
    })
}

fn require<'a>(value: Option<&'a str>, name: &'static str) -> AppResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::MissingRequiredField(name)),
    }
}
