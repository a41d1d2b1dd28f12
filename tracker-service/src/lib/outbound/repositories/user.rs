use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use super::is_foreign_key_violation;
use super::is_unique_violation;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const USER_COLUMNS: &str = "id, username, email, password_hash, role, created_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &PgRow) -> Result<User, UserError> {
        let username: String = row.get("username");
        let email: String = row.get("email");
        let role: String = row.get("role");

        Ok(User {
            id: UserId(row.get("id")),
            username: Username::new(&username)?,
            email: EmailAddress::new(&email)?,
            password_hash: row.get("password_hash"),
            role: Role::from_str(&role)?,
            created_at: row.get("created_at"),
        })
    }

    async fn count(&self, query: &str, id: &UserId) -> Result<i64, UserError> {
        let row = sqlx::query(query)
            .bind(id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        Ok(row.get("count"))
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, UserError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (username, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
            UserError::DatabaseError(e.to_string())
        })?;

        Self::row_to_user(&row)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)"
        ))
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<User>, UserError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id IN (
                SELECT created_by FROM projects WHERE id = $1
                UNION
                SELECT assigned_to FROM bugs WHERE project_id = $1 AND assigned_to IS NOT NULL
                UNION
                SELECT reported_by FROM bugs WHERE project_id = $1 AND reported_by IS NOT NULL
            )
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(project_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE users
            SET username = $2, email = $3, role = $4
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id.0)
        .bind(user.username.as_str())
        .bind(user.email.as_str())
        .bind(user.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return UserError::EmailAlreadyExists(user.email.as_str().to_string());
            }
            UserError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;

        Self::row_to_user(&row)
    }

    async fn update_password_hash(
        &self,
        id: &UserId,
        password_hash: &str,
    ) -> Result<(), UserError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id.0)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn count_created_projects(&self, id: &UserId) -> Result<i64, UserError> {
        self.count(
            "SELECT COUNT(*) AS count FROM projects WHERE created_by = $1",
            id,
        )
        .await
    }

    async fn count_assigned_bugs(&self, id: &UserId) -> Result<i64, UserError> {
        self.count(
            "SELECT COUNT(*) AS count FROM bugs WHERE assigned_to = $1",
            id,
        )
        .await
    }

    async fn count_authored_comments(&self, id: &UserId) -> Result<i64, UserError> {
        self.count(
            "SELECT COUNT(*) AS count FROM comments WHERE user_id = $1",
            id,
        )
        .await
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    return UserError::StillReferenced;
                }
                UserError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
