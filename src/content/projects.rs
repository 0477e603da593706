use async_trait::async_trait;
use rusqlite::params;

use crate::content::RepositoryError;
use crate::db::models::Project;
use crate::state::DbPool;

/// Project persistence contract.
///
/// Projects are written as a whole: the editor pushes its entire
/// working set and the store replaces the table contents with it.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// All projects, newest first.
    async fn list(&self) -> Result<Vec<Project>, RepositoryError>;

    /// Replace the whole table with the supplied collection.
    async fn replace_all(&self, projects: &[Project]) -> Result<(), RepositoryError>;
}

/// SQLite implementation
pub struct SqliteProjectStore {
    pool: DbPool,
}

impl SqliteProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for SqliteProjectStore {
    async fn list(&self) -> Result<Vec<Project>, RepositoryError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, title, description, stack, image, link, featured,
                    created_at, updated_at
             FROM projects
             ORDER BY created_at DESC",
        )?;

        type Row = (
            String,
            String,
            String,
            String,
            String,
            String,
            bool,
            String,
            String,
        );
        let rows: Vec<Row> = stmt
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
                    row.get(8)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut projects = Vec::with_capacity(rows.len());
        for (id, title, description, stack, image, link, featured, created_at, updated_at) in rows
        {
            projects.push(Project {
                id,
                title,
                description,
                stack: serde_json::from_str(&stack)?,
                image,
                link,
                featured,
                created_at: Some(created_at),
                updated_at: Some(updated_at),
            });
        }

        Ok(projects)
    }

    async fn replace_all(&self, projects: &[Project]) -> Result<(), RepositoryError> {
        let mut conn = self.pool.get()?;

        // Delete-then-insert runs inside one transaction so a failed
        // save never leaves the table half empty. Incoming timestamp
        // fields are ignored; the store assigns its own.
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM projects", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO projects (id, title, description, stack, image, link, featured)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for project in projects {
                stmt.execute(params![
                    project.id,
                    project.title,
                    project.description,
                    serde_json::to_string(&project.stack)?,
                    project.image,
                    project.link,
                    project.featured,
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }
}
