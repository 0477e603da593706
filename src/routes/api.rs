use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::content::{ProjectStore, SqliteProjectStore, SqliteTutorialStore, TutorialStore};
use crate::db::models::{Project, Tutorial};
use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/admin/projects",
            get(list_projects).post(save_projects),
        )
        .route(
            "/api/admin/tutorials",
            get(list_tutorials)
                .post(save_tutorial)
                .delete(delete_tutorial),
        )
}

#[derive(Serialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub slug: Option<String>,
}

async fn list_projects(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Project>>> {
    // Read failures surface as an empty collection, not an error
    let projects = SqliteProjectStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching projects: {}", e);
            Vec::new()
        });
    Ok(Json(projects))
}

/// Full-collection replace: the body is the complete new set of
/// projects and the previous table contents are discarded.
async fn save_projects(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(projects): Json<Vec<Project>>,
) -> AppResult<Json<ApiMessage>> {
    SqliteProjectStore::new(state.db.clone())
        .replace_all(&projects)
        .await
        .map_err(|e| {
            tracing::error!("Error saving projects: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(ApiMessage {
        success: true,
        message: "Projects saved successfully".to_string(),
    }))
}

async fn list_tutorials(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> AppResult<Json<Vec<Tutorial>>> {
    let tutorials = SqliteTutorialStore::new(state.db.clone())
        .list()
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Error fetching tutorials: {}", e);
            Vec::new()
        });
    Ok(Json(tutorials))
}

/// Upsert keyed on slug: re-saving an existing slug overwrites it.
async fn save_tutorial(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(tutorial): Json<Tutorial>,
) -> AppResult<Json<ApiMessage>> {
    SqliteTutorialStore::new(state.db.clone())
        .upsert(&tutorial)
        .await
        .map_err(|e| {
            tracing::error!("Error saving tutorial: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(ApiMessage {
        success: true,
        message: "Tutorial saved successfully".to_string(),
    }))
}

async fn delete_tutorial(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(params): Query<DeleteParams>,
) -> AppResult<Json<ApiMessage>> {
    // Reject before any store access
    let slug = params
        .slug
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Slug is required".to_string()))?;

    SqliteTutorialStore::new(state.db.clone())
        .delete_by_slug(&slug)
        .await
        .map_err(|e| {
            tracing::error!("Error deleting tutorial: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(ApiMessage {
        success: true,
        message: "Tutorial deleted successfully".to_string(),
    }))
}
