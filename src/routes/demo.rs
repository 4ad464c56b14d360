//! Static demonstration pages with embedded same-origin and cross-origin
//! form targets.

use axum::{Router, extract::Path, response::Html, routing::get};

use crate::pages;

pub fn router() -> Router {
    Router::new()
        .route("/form-test.html", get(form_test))
        .route("/form-test-navigate.html", get(form_test_navigate))
        .route("/{segment}/form-test.html", get(form_test_scoped))
        .route(
            "/{segment}/form-test-navigate.html",
            get(form_test_navigate_scoped),
        )
}

async fn form_test() -> Html<String> {
    Html(pages::form_test_page(None))
}

async fn form_test_navigate() -> Html<String> {
    Html(pages::form_test_navigate_page(None))
}

async fn form_test_scoped(Path(segment): Path<String>) -> Html<String> {
    Html(pages::form_test_page(Some(&segment)))
}

async fn form_test_navigate_scoped(Path(segment): Path<String>) -> Html<String> {
    Html(pages::form_test_navigate_page(Some(&segment)))
}
