use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::is_foreign_key_violation;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::ProjectName;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::user::models::UserId;

const PROJECT_COLUMNS: &str = "id, name, description, created_by, created_at";

pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_project(row: &PgRow) -> Result<Project, ProjectError> {
        let name: String = row.get("name");

        Ok(Project {
            id: ProjectId(row.get("id")),
            name: ProjectName::new(&name)?,
            description: row.get("description"),
            created_by: UserId(row.get("created_by")),
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(&self, project: NewProject) -> Result<Project, ProjectError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO projects (name, description, created_by)
            VALUES ($1, $2, $3)
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(project.name.as_str())
        .bind(project.description.as_deref())
        .bind(project.created_by.0)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                return ProjectError::CreatorNotFound(project.created_by.to_string());
            }
            ProjectError::DatabaseError(e.to_string())
        })?;

        Self::row_to_project(&row)
    }

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError> {
        let row = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_project).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Project>, ProjectError> {
        let rows = sqlx::query(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_project).collect()
    }

    async fn find_by_creator(&self, creator: &UserId) -> Result<Vec<Project>, ProjectError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {PROJECT_COLUMNS}
            FROM projects
            WHERE created_by = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(creator.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_project).collect()
    }

    async fn update(&self, project: Project) -> Result<Project, ProjectError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE projects
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING {PROJECT_COLUMNS}
            "#
        ))
        .bind(project.id.0)
        .bind(project.name.as_str())
        .bind(project.description.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProjectError::DatabaseError(e.to_string()))?
        .ok_or_else(|| ProjectError::NotFound(project.id.to_string()))?;

        Self::row_to_project(&row)
    }

    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        // Comments go with their bugs through the bug_id cascade.
        let bugs = sqlx::query("DELETE FROM bugs WHERE project_id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(ProjectError::NotFound(id.to_string()));
        }

        tx.commit()
            .await
            .map_err(|e| ProjectError::DatabaseError(e.to_string()))?;

        tracing::debug!(project_id = %id, bugs_deleted = bugs.rows_affected(), "Project rows deleted");

        Ok(())
    }
}
