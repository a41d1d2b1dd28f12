use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::is_foreign_key_violation;
use super::violated_constraint;
use crate::domain::bug::models::BugId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentText;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentRepository;
use crate::domain::user::models::UserId;

const COMMENT_COLUMNS: &str = "id, bug_id, user_id, comment_text, created_at";

pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_comment(row: &PgRow) -> Result<Comment, CommentError> {
        let text: String = row.get("comment_text");

        Ok(Comment {
            id: CommentId(row.get("id")),
            bug_id: BugId(row.get("bug_id")),
            user_id: UserId(row.get("user_id")),
            comment_text: CommentText::new(&text)?,
            created_at: row.get("created_at"),
        })
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, CommentError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO comments (bug_id, user_id, comment_text)
            VALUES ($1, $2, $3)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(comment.bug_id.0)
        .bind(comment.user_id.0)
        .bind(comment.comment_text.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if !is_foreign_key_violation(&e) {
                return CommentError::DatabaseError(e.to_string());
            }
            match violated_constraint(&e) {
                Some("comments_bug_id_fkey") => {
                    CommentError::BugNotFound(comment.bug_id.to_string())
                }
                _ => CommentError::AuthorNotFound(comment.user_id.to_string()),
            }
        })?;

        Self::row_to_comment(&row)
    }

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError> {
        let row = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_comment).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Comment>, CommentError> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn find_by_bug(&self, bug_id: &BugId) -> Result<Vec<Comment>, CommentError> {
        // Threads read top to bottom.
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE bug_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(bug_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, CommentError> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        ))
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_comment).collect()
    }

    async fn update(&self, comment: Comment) -> Result<Comment, CommentError> {
        let row = sqlx::query(&format!(
            "UPDATE comments SET comment_text = $2 WHERE id = $1 RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(comment.id.0)
        .bind(comment.comment_text.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CommentError::DatabaseError(e.to_string()))?
        .ok_or_else(|| CommentError::NotFound(comment.id.to_string()))?;

        Self::row_to_comment(&row)
    }

    async fn delete(&self, id: &CommentId) -> Result<(), CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(CommentError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn delete_by_bug(&self, bug_id: &BugId) -> Result<u64, CommentError> {
        let result = sqlx::query("DELETE FROM comments WHERE bug_id = $1")
            .bind(bug_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
