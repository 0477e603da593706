use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::content::{SqliteTutorialStore, TutorialStore};
use crate::db::models::Tutorial;
use crate::error::AppResult;
use crate::markdown;
use crate::routes::projects::NotFoundTemplate;
use crate::routes::Html;
use crate::state::AppState;

#[derive(Template)]
#[template(path = "pages/tutorials.html")]
pub struct TutorialsTemplate {
    pub site_title: String,
    pub tutorials: Vec<Tutorial>,
}

#[derive(Template)]
#[template(path = "pages/tutorial_detail.html")]
pub struct TutorialDetailTemplate {
    pub site_title: String,
    pub tutorial: Tutorial,
    pub content_html: String,
}

pub async fn list_page(State(state): State<AppState>) -> AppResult<Response> {
    let tutorials = SqliteTutorialStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching tutorials: {}", e);
            Vec::new()
        });

    Ok(Html(TutorialsTemplate {
        site_title: state.config.site.title.clone(),
        tutorials,
    })
    .into_response())
}

pub async fn detail_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Response> {
    let tutorial = SqliteTutorialStore::new(state.db.clone()).get(&slug).await?;

    match tutorial {
        Some(tutorial) => {
            let content_html = markdown::render(&tutorial.content);
            Ok(Html(TutorialDetailTemplate {
                site_title: state.config.site.title.clone(),
                tutorial,
                content_html,
            })
            .into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(NotFoundTemplate {
                site_title: state.config.site.title.clone(),
                message: "Tutorial not found".to_string(),
                back_href: "/tutorials".to_string(),
                back_label: "Back to tutorials".to_string(),
            }),
        )
            .into_response()),
    }
}
