//! Form-submission endpoints: same-origin (`/__forms/...`), cross-origin
//! (`/form-api/...`), and the path-scoped variant. These accept whatever
//! framing actually arrives, whatever the Content-Type header claims.

use axum::{
    Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode, header},
    response::Html,
    routing::post,
};
use bytes::Bytes;
use serde::Deserialize;
use tower_http::cors::CorsLayer;

use crate::{diagnostics, pages, parser, services::account_service};

pub fn router() -> Router {
    // The cross-origin target deliberately accepts any origin; that is the
    // scenario the harness exists to exercise.
    let cross_origin = Router::new()
        .route("/form-api/create-account", post(cross_origin_submit))
        .layer(CorsLayer::permissive());

    Router::new()
        .route("/__forms/create-account", post(same_origin_submit))
        .route("/{segment}/__forms/create-account", post(scoped_submit))
        .merge(cross_origin)
}

#[derive(Debug, Deserialize)]
pub struct DebugQuery {
    debug: Option<String>,
}

async fn same_origin_submit(
    Query(query): Query<DebugQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Html<String>) {
    handle_form(None, query, headers, body).await
}

async fn cross_origin_submit(
    Query(query): Query<DebugQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Html<String>) {
    handle_form(None, query, headers, body).await
}

async fn scoped_submit(
    Path(segment): Path<String>,
    Query(query): Query<DebugQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Html<String>) {
    handle_form(Some(segment), query, headers, body).await
}

async fn handle_form(
    segment: Option<String>,
    query: DebugQuery,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Html<String>) {
    let declared = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Raw-byte inspection works on its own clone of the buffer so the
    // structured parse below starts from pristine input.
    let raw = body.clone();
    tracing::debug!(
        content_type = %declared,
        body_len = raw.len(),
        body = %diagnostics::redact_credentials(&String::from_utf8_lossy(&raw)),
        "form submission received"
    );

    let parsed = parser::parse_submission(&declared, &body).await;

    let debug_requested = query.debug.as_deref() == Some("1")
        || parsed
            .as_ref()
            .is_ok_and(parser::FormFields::debug_requested);

    if debug_requested {
        let fields = parsed.as_ref().ok().cloned().unwrap_or_default();
        let page = pages::debug_page(
            &declared,
            body.len(),
            &diagnostics::header_lines(&headers),
            &diagnostics::field_metadata(&fields),
        );
        return (StatusCode::OK, Html(page));
    }

    match parsed.and_then(|fields| account_service::create_account(&fields, segment.as_deref())) {
        Ok(ack) => (StatusCode::OK, Html(pages::success_page(&ack))),
        Err(err) => (err.status(), Html(pages::error_page(&err.to_string()))),
    }
}
