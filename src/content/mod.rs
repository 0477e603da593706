// Repository pattern - isolates all database side effects
pub mod projects;
pub mod tutorials;

use thiserror::Error;

pub use projects::{ProjectStore, SqliteProjectStore};
pub use tutorials::{SqliteTutorialStore, TutorialStore};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] r2d2::Error),

    #[error("SQL error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<RepositoryError> for crate::error::AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidInput(msg) => crate::error::AppError::BadRequest(msg),
            RepositoryError::Database(e) => {
                crate::error::AppError::Internal(format!("pool: {}", e))
            }
            RepositoryError::Sql(e) => crate::error::AppError::Database(e),
            RepositoryError::Serialization(e) => crate::error::AppError::Json(e),
        }
    }
}
