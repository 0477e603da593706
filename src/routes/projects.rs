use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::content::{ProjectStore, SqliteProjectStore};
use crate::db::models::Project;
use crate::error::AppResult;
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/projects.html")]
pub struct ProjectsTemplate {
    pub site_title: String,
    pub projects: Vec<Project>,
}

#[derive(Template)]
#[template(path = "pages/project_detail.html")]
pub struct ProjectDetailTemplate {
    pub site_title: String,
    pub project: Project,
}

#[derive(Template)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub site_title: String,
    pub message: String,
    pub back_href: String,
    pub back_label: String,
}

pub async fn list_page(State(state): State<AppState>) -> AppResult<Response> {
    let projects = SqliteProjectStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching projects: {}", e);
            Vec::new()
        });

    Ok(Html(ProjectsTemplate {
        site_title: state.config.site.title.clone(),
        projects,
    })
    .into_response())
}

pub async fn detail_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    // Content volume is small; the detail page reads the list and
    // picks its record out of it.
    let projects = SqliteProjectStore::new(state.db.clone()).list().await?;

    match projects.into_iter().find(|p| p.id == id) {
        Some(project) => Ok(Html(ProjectDetailTemplate {
            site_title: state.config.site.title.clone(),
            project,
        })
        .into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(NotFoundTemplate {
                site_title: state.config.site.title.clone(),
                message: "Project not found".to_string(),
                back_href: "/projects".to_string(),
                back_label: "Back to projects".to_string(),
            }),
        )
            .into_response()),
    }
}
