use askama::Template;
use axum::extract::State;
use axum::response::{IntoResponse, Response};

use crate::content::{ProjectStore, SqliteProjectStore, SqliteTutorialStore, TutorialStore};
use crate::db::models::{Project, Tutorial};
use crate::error::AppResult;
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub site_title: String,
    pub author: String,
    pub featured: Vec<Project>,
    pub latest_tutorials: Vec<Tutorial>,
}

#[derive(Template)]
#[template(path = "pages/resume.html")]
pub struct ResumeTemplate {
    pub site_title: String,
    pub author: String,
}

#[derive(Template)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub site_title: String,
    pub author: String,
    pub contact_email: String,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Response> {
    // Read failures degrade to empty sections rather than a 500
    let projects = SqliteProjectStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching projects: {}", e);
            Vec::new()
        });
    let featured = projects.into_iter().filter(|p| p.featured).collect();

    let mut latest_tutorials = SqliteTutorialStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching tutorials: {}", e);
            Vec::new()
        });
    latest_tutorials.truncate(3);

    Ok(Html(HomeTemplate {
        site_title: state.config.site.title.clone(),
        author: state.config.site.author.clone(),
        featured,
        latest_tutorials,
    })
    .into_response())
}

pub async fn resume(State(state): State<AppState>) -> AppResult<Response> {
    Ok(Html(ResumeTemplate {
        site_title: state.config.site.title.clone(),
        author: state.config.site.author.clone(),
    })
    .into_response())
}

pub async fn contact(State(state): State<AppState>) -> AppResult<Response> {
    Ok(Html(ContactTemplate {
        site_title: state.config.site.title.clone(),
        author: state.config.site.author.clone(),
        contact_email: state.config.site.contact_email.clone(),
    })
    .into_response())
}
