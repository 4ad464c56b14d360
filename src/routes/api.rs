//! JSON account-creation endpoints.

use axum::{Json, Router, extract::Path, routing::post};
use bytes::Bytes;

use crate::{
    dto::account::{AccountCreated, CreateAccountRequest},
    error::AppResult,
    parser,
    services::account_service,
};

pub fn router() -> Router {
    Router::new()
        .route("/api/create-account", post(create_account))
        .route("/{segment}/api/create-account", post(create_account_scoped))
}

#[utoipa::path(
    post,
    path = "/api/create-account",
    request_body = CreateAccountRequest,
    responses(
        (status = 200, description = "Input well-formed; echoes the email", body = AccountCreated),
        (status = 400, description = "Malformed JSON or missing fields")
    ),
    tag = "Accounts"
)]
pub async fn create_account(body: Bytes) -> AppResult<Json<AccountCreated>> {
    submit(None, &body)
}

#[utoipa::path(
    post,
    path = "/{segment}/api/create-account",
    request_body = CreateAccountRequest,
    params(
        ("segment" = String, Path, description = "Opaque namespace tag, echoed back as pathSegment")
    ),
    responses(
        (status = 200, description = "Input well-formed; echoes the email and segment", body = AccountCreated),
        (status = 400, description = "Malformed JSON or missing fields")
    ),
    tag = "Accounts"
)]
pub async fn create_account_scoped(
    Path(segment): Path<String>,
    body: Bytes,
) -> AppResult<Json<AccountCreated>> {
    submit(Some(&segment), &body)
}

fn submit(segment: Option<&str>, body: &Bytes) -> AppResult<Json<AccountCreated>> {
    let fields = parser::parse_json(body)?;
    let ack = account_service::create_account(&fields, segment)?;
    Ok(Json(ack))
}
