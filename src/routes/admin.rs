use askama::Template;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{credentials, AdminSession};
use crate::error::AppResult;
use crate::extractors::MaybeAdmin;
use crate::routes::Html;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_home))
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/projects", get(projects_editor))
        .route("/admin/tutorials", get(tutorials_editor))
}

#[derive(Template)]
#[template(path = "pages/admin_login.html")]
struct LoginTemplate {
    error: Option<String>,
    username: String,
}

#[derive(Template)]
#[template(path = "pages/admin_dashboard.html")]
struct DashboardTemplate {
    username: String,
}

#[derive(Template)]
#[template(path = "pages/admin_projects.html")]
struct ProjectsEditorTemplate;

#[derive(Template)]
#[template(path = "pages/admin_tutorials.html")]
struct TutorialsEditorTemplate;

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login form for visitors, dashboard for a signed-in admin.
async fn admin_home(maybe_admin: MaybeAdmin) -> AppResult<Response> {
    match maybe_admin.0 {
        Some(session) => Ok(Html(DashboardTemplate {
            username: session.username,
        })
        .into_response()),
        None => Ok(Html(LoginTemplate {
            error: None,
            username: String::new(),
        })
        .into_response()),
    }
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> AppResult<Response> {
    if !credentials::verify(&state.config.admin, &form.username, &form.password) {
        tracing::warn!("Failed admin login attempt for '{}'", form.username);
        // Re-render the form with the username kept and the password
        // field cleared
        return Ok((
            StatusCode::UNAUTHORIZED,
            Html(LoginTemplate {
                error: Some("Invalid credentials. Please try again.".to_string()),
                username: form.username,
            }),
        )
            .into_response());
    }

    let session = AdminSession::new(&form.username);
    let cookie = session_cookie(
        &state.config.auth.cookie_name,
        &session,
        state.config.auth.session_hours,
    );
    tracing::info!("Admin '{}' signed in", form.username);

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/admin".to_string()),
            (header::SET_COOKIE, cookie),
        ],
        "",
    )
        .into_response())
}

async fn logout(State(state): State<AppState>) -> AppResult<Response> {
    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/".to_string()),
            (
                header::SET_COOKIE,
                clear_session_cookie(&state.config.auth.cookie_name),
            ),
        ],
        "",
    )
        .into_response())
}

async fn projects_editor(maybe_admin: MaybeAdmin) -> AppResult<Response> {
    if maybe_admin.0.is_none() {
        return Ok(Redirect::to("/admin").into_response());
    }
    Ok(Html(ProjectsEditorTemplate).into_response())
}

async fn tutorials_editor(maybe_admin: MaybeAdmin) -> AppResult<Response> {
    if maybe_admin.0.is_none() {
        return Ok(Redirect::to("/admin").into_response());
    }
    Ok(Html(TutorialsEditorTemplate).into_response())
}
