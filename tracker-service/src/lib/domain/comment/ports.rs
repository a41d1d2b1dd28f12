use async_trait::async_trait;

use crate::domain::bug::models::BugId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentText;
use crate::domain::comment::models::NewComment;
use crate::domain::user::models::Actor;
use crate::domain::user::models::UserId;

/// Port for comment operations.
#[async_trait]
pub trait CommentServicePort: Send + Sync + 'static {
    /// Post a comment on an existing bug.
    ///
    /// # Errors
    /// * `BugNotFound` - Bug does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, CommentError>;

    /// Retrieve a comment.
    ///
    /// # Errors
    /// * `NotFound` - Comment does not exist
    async fn get_comment(&self, id: &CommentId) -> Result<Comment, CommentError>;

    /// List every comment, newest first.
    async fn list_comments(&self) -> Result<Vec<Comment>, CommentError>;

    /// List the comments on a bug, oldest first.
    async fn list_comments_by_bug(&self, bug_id: &BugId) -> Result<Vec<Comment>, CommentError>;

    /// List the comments a user wrote, newest first.
    async fn list_comments_by_user(&self, user_id: &UserId)
        -> Result<Vec<Comment>, CommentError>;

    /// Replace the text as the author or an admin.
    ///
    /// # Errors
    /// * `NotFound` - Comment does not exist
    /// * `Forbidden` - Caller is neither author nor admin
    async fn update_comment(
        &self,
        id: &CommentId,
        text: CommentText,
        actor: &Actor,
    ) -> Result<Comment, CommentError>;

    /// Delete as the author or an admin.
    ///
    /// # Errors
    /// * `NotFound` - Comment does not exist
    /// * `Forbidden` - Caller is neither author nor admin
    async fn delete_comment(&self, id: &CommentId, actor: &Actor) -> Result<(), CommentError>;

    /// Delete every comment on a bug.
    ///
    /// # Returns
    /// Number of comments removed
    async fn delete_comments_by_bug(&self, bug_id: &BugId) -> Result<u64, CommentError>;
}

/// Persistence operations for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    /// Persist a new comment.
    ///
    /// # Errors
    /// * `BugNotFound` / `AuthorNotFound` - Foreign key violated
    async fn create(&self, comment: NewComment) -> Result<Comment, CommentError>;

    async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError>;

    async fn list_all(&self) -> Result<Vec<Comment>, CommentError>;

    async fn find_by_bug(&self, bug_id: &BugId) -> Result<Vec<Comment>, CommentError>;

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, CommentError>;

    /// Write the text of an existing comment.
    ///
    /// # Errors
    /// * `NotFound` - Comment does not exist
    async fn update(&self, comment: Comment) -> Result<Comment, CommentError>;

    /// # Errors
    /// * `NotFound` - Comment does not exist
    async fn delete(&self, id: &CommentId) -> Result<(), CommentError>;

    async fn delete_by_bug(&self, bug_id: &BugId) -> Result<u64, CommentError>;
}
