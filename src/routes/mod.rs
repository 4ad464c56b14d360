use axum::Router;

pub mod api;
pub mod demo;
pub mod doc;
pub mod forms;
pub mod health;

pub fn create_router() -> Router {
    Router::new()
        .merge(api::router())
        .merge(forms::router())
        .merge(demo::router())
}
