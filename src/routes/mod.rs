pub mod admin;
pub mod api;
pub mod assets;
pub mod projects;
pub mod site;
pub mod tutorials;

use askama::Template;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

/// The full application router. `main` layers tracing on top; tests
/// drive it directly.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::index))
        .route("/resume", get(site::resume))
        .route("/contact", get(site::contact))
        .route("/projects", get(projects::list_page))
        .route("/projects/{id}", get(projects::detail_page))
        .route("/tutorials", get(tutorials::list_page))
        .route("/tutorials/{slug}", get(tutorials::detail_page))
        .route("/assets/{*path}", get(assets::serve))
        .merge(admin::router())
        .merge(api::router())
}
