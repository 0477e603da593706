use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;

/// Site stylesheets and images, compiled into the binary.
#[derive(Embed)]
#[folder = "assets/"]
struct SiteAssets;

// Embedded assets cannot change within a deployed build, so clients
// may cache them for a year.
const CACHE_POLICY: &str = "public, max-age=31536000, immutable";

pub async fn serve(Path(path): Path<String>) -> Response {
    let Some(file) = SiteAssets::get(&path) else {
        return (StatusCode::NOT_FOUND, "No such asset").into_response();
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, CACHE_POLICY.to_string()),
        ],
        file.data.to_vec(),
    )
        .into_response()
}
