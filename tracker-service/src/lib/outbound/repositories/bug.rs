use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::is_foreign_key_violation;
use super::violated_constraint;
use crate::domain::bug::errors::BugError;
use crate::domain::bug::models::Bug;
use crate::domain::bug::models::BugId;
use crate::domain::bug::models::BugPriority;
use crate::domain::bug::models::BugStatus;
use crate::domain::bug::models::BugTitle;
use crate::domain::bug::models::NewBug;
use crate::domain::bug::ports::BugRepository;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::UserId;

const BUG_COLUMNS: &str =
    "id, title, description, status, priority, project_id, reported_by, assigned_to, created_at";

pub struct PostgresBugRepository {
    pool: PgPool,
}

impl PostgresBugRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_bug(row: &PgRow) -> Result<Bug, BugError> {
        let title: String = row.get("title");
        let status: String = row.get("status");
        let priority: String = row.get("priority");
        let reported_by: Option<i64> = row.get("reported_by");
        let assigned_to: Option<i64> = row.get("assigned_to");

        Ok(Bug {
            id: BugId(row.get("id")),
            title: BugTitle::new(&title)?,
            description: row.get("description"),
            status: BugStatus::from_str(&status)?,
            priority: BugPriority::from_str(&priority)?,
            project_id: ProjectId(row.get("project_id")),
            reported_by: reported_by.map(UserId),
            assigned_to: assigned_to.map(UserId),
            created_at: row.get("created_at"),
        })
    }

    /// Map a foreign key violation to the reference that failed.
    fn reference_error(e: sqlx::Error, project_id: ProjectId) -> BugError {
        if !is_foreign_key_violation(&e) {
            return BugError::DatabaseError(e.to_string());
        }
        match violated_constraint(&e) {
            Some("bugs_project_id_fkey") => BugError::ProjectNotFound(project_id.to_string()),
            _ => BugError::UserNotFound(e.to_string()),
        }
    }

    async fn fetch_where(&self, filter: &str, value: i64) -> Result<Vec<Bug>, BugError> {
        let rows = sqlx::query(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs WHERE {filter} = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BugError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_bug).collect()
    }
}

#[async_trait]
impl BugRepository for PostgresBugRepository {
    async fn create(&self, bug: NewBug) -> Result<Bug, BugError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bugs (title, description, status, priority, project_id, reported_by, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {BUG_COLUMNS}
            "#
        ))
        .bind(bug.title.as_str())
        .bind(bug.description.as_deref())
        .bind(bug.status.as_str())
        .bind(bug.priority.as_str())
        .bind(bug.project_id.0)
        .bind(bug.reported_by.map(|id| id.0))
        .bind(bug.assigned_to.map(|id| id.0))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::reference_error(e, bug.project_id))?;

        Self::row_to_bug(&row)
    }

    async fn find_by_id(&self, id: &BugId) -> Result<Option<Bug>, BugError> {
        let row = sqlx::query(&format!("SELECT {BUG_COLUMNS} FROM bugs WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BugError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_bug).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Bug>, BugError> {
        let rows = sqlx::query(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BugError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_bug).collect()
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bug>, BugError> {
        self.fetch_where("project_id", project_id.0).await
    }

    async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Bug>, BugError> {
        self.fetch_where("assigned_to", assignee.0).await
    }

    async fn find_by_reporter(&self, reporter: &UserId) -> Result<Vec<Bug>, BugError> {
        self.fetch_where("reported_by", reporter.0).await
    }

    async fn find_by_status(&self, status: BugStatus) -> Result<Vec<Bug>, BugError> {
        let rows = sqlx::query(&format!(
            "SELECT {BUG_COLUMNS} FROM bugs WHERE status = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| BugError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_bug).collect()
    }

    async fn update(&self, bug: Bug) -> Result<Bug, BugError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE bugs
            SET title = $2, description = $3, status = $4, priority = $5, assigned_to = $6
            WHERE id = $1
            RETURNING {BUG_COLUMNS}
            "#
        ))
        .bind(bug.id.0)
        .bind(bug.title.as_str())
        .bind(bug.description.as_deref())
        .bind(bug.status.as_str())
        .bind(bug.priority.as_str())
        .bind(bug.assigned_to.map(|id| id.0))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::reference_error(e, bug.project_id))?
        .ok_or_else(|| BugError::NotFound(bug.id.to_string()))?;

        Self::row_to_bug(&row)
    }

    async fn delete(&self, id: &BugId) -> Result<(), BugError> {
        let result = sqlx::query("DELETE FROM bugs WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| BugError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(BugError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
