use async_trait::async_trait;
use rusqlite::params;

use crate::content::RepositoryError;
use crate::db::models::Tutorial;
use crate::state::DbPool;

/// Tutorial persistence contract.
///
/// Unlike projects, tutorials are written one at a time: saves are
/// upserts keyed on the slug and deletes target a single slug.
#[async_trait]
pub trait TutorialStore: Send + Sync {
    /// All tutorials, newest date first.
    async fn list(&self) -> Result<Vec<Tutorial>, RepositoryError>;

    /// Look up a single tutorial by slug.
    async fn get(&self, slug: &str) -> Result<Option<Tutorial>, RepositoryError>;

    /// Insert or overwrite the row sharing this record's slug.
    async fn upsert(&self, tutorial: &Tutorial) -> Result<(), RepositoryError>;

    /// Delete by slug; returns whether a row was removed. An empty
    /// slug is rejected before touching the store.
    async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepositoryError>;
}

/// SQLite implementation
pub struct SqliteTutorialStore {
    pool: DbPool,
}

impl SqliteTutorialStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "slug, title, date, description, tags, content, created_at, updated_at";

type TutorialRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn into_tutorial(row: TutorialRow) -> Result<Tutorial, RepositoryError> {
    let (slug, title, date, description, tags, content, created_at, updated_at) = row;
    Ok(Tutorial {
        slug,
        title,
        date,
        description,
        tags: serde_json::from_str(&tags)?,
        content,
        created_at: Some(created_at),
        updated_at: Some(updated_at),
    })
}

#[async_trait]
impl TutorialStore for SqliteTutorialStore {
    async fn list(&self) -> Result<Vec<Tutorial>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tutorials ORDER BY date DESC",
            SELECT_COLUMNS
        ))?;

        let rows: Vec<TutorialRow> = stmt
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter().map(into_tutorial).collect()
    }

    async fn get(&self, slug: &str) -> Result<Option<Tutorial>, RepositoryError> {
        let conn = self.pool.get()?;

        let result: Result<TutorialRow, rusqlite::Error> = conn.query_row(
            &format!("SELECT {} FROM tutorials WHERE slug = ?1", SELECT_COLUMNS),
            params![slug],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                ))
            },
        );

        match result {
            Ok(row) => Ok(Some(into_tutorial(row)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn upsert(&self, tutorial: &Tutorial) -> Result<(), RepositoryError> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO tutorials (slug, title, date, description, tags, content)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(slug) DO UPDATE SET
               title = excluded.title,
               date = excluded.date,
               description = excluded.description,
               tags = excluded.tags,
               content = excluded.content,
               updated_at = datetime('now')",
            params![
                tutorial.slug,
                tutorial.title,
                tutorial.date,
                tutorial.description,
                serde_json::to_string(&tutorial.tags)?,
                tutorial.content,
            ],
        )?;

        Ok(())
    }

    async fn delete_by_slug(&self, slug: &str) -> Result<bool, RepositoryError> {
        if slug.trim().is_empty() {
            return Err(RepositoryError::InvalidInput("Slug is required".into()));
        }

        let conn = self.pool.get()?;
        let rows = conn.execute("DELETE FROM tutorials WHERE slug = ?1", params![slug])?;
        Ok(rows > 0)
    }
}
