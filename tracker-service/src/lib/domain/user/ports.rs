use async_trait::async_trait;

use crate::domain::project::models::ProjectId;
use crate::domain::user::models::Actor;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::validation::ProfileUpdatePayload;
use crate::domain::user::validation::RegistrationPayload;
use crate::user::errors::UserError;

/// Port for user lifecycle operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new identity and issue its first token.
    ///
    /// # Arguments
    /// * `payload` - Raw registration fields
    ///
    /// # Returns
    /// Created user with a bearer token
    ///
    /// # Errors
    /// * `Validation` / value-object errors - Payload rejected
    /// * `EmailAlreadyExists` - Email already registered (any casing)
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, payload: RegistrationPayload) -> Result<AuthSession, UserError>;

    /// Exchange email and password for a token.
    ///
    /// # Errors
    /// * `Validation` - Email or password missing
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError>;

    /// Retrieve the profile of an identity.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_profile(&self, id: &UserId) -> Result<User, UserError>;

    /// Apply a partial profile update.
    ///
    /// # Arguments
    /// * `id` - User to update
    /// * `payload` - Raw profile fields; absent fields are untouched
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Validation` / value-object errors - Field rejected or nothing to update
    /// * `EmailAlreadyExists` - New email belongs to another identity
    /// * `DatabaseError` - Database operation failed
    async fn update_profile(
        &self,
        id: &UserId,
        payload: ProfileUpdatePayload,
    ) -> Result<User, UserError>;

    /// Rotate the password after proving the current one.
    ///
    /// # Errors
    /// * `Validation` - Missing fields or new password too short
    /// * `NotFound` - User does not exist
    /// * `IncorrectCurrentPassword` - Current password does not match
    /// * `DatabaseError` - Database operation failed
    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError>;

    /// Delete an identity that owns no projects, assigned bugs or comments.
    ///
    /// # Arguments
    /// * `id` - User to delete
    /// * `actor` - Caller; must be the same user or an admin
    ///
    /// # Errors
    /// * `Forbidden` - Caller is neither the user nor an admin
    /// * `NotFound` - User does not exist
    /// * `DeleteBlocked` - User still owns data
    /// * `StillReferenced` - The store refused the delete
    /// * `DatabaseError` - Database operation failed
    async fn delete_user(&self, id: &UserId, actor: &Actor) -> Result<(), UserError>;

    /// List every user, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// List users who created a project or reported/are assigned to its bugs.
    async fn list_project_users(&self, project_id: &ProjectId) -> Result<Vec<User>, UserError>;
}

/// Persistence operations for user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user; the store assigns id and creation time.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique email index violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: NewUser) -> Result<User, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Retrieve user by normalized email, compared case-insensitively.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve all users, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve distinct users related to a project.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<User>, UserError>;

    /// Write username, email and role of an existing user.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailAlreadyExists` - Unique email index violated
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, user: User) -> Result<User, UserError>;

    /// Replace the stored password hash.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_password_hash(&self, id: &UserId, password_hash: &str)
        -> Result<(), UserError>;

    /// Number of projects created by the user.
    async fn count_created_projects(&self, id: &UserId) -> Result<i64, UserError>;

    /// Number of bugs assigned to the user.
    async fn count_assigned_bugs(&self, id: &UserId) -> Result<i64, UserError>;

    /// Number of comments written by the user.
    async fn count_authored_comments(&self, id: &UserId) -> Result<i64, UserError>;

    /// Remove user from storage.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `StillReferenced` - A foreign key still points at the user
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &UserId) -> Result<(), UserError>;
}
