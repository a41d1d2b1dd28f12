use std::sync::Arc;

use async_trait::async_trait;

use super::errors::CommentError;
use super::models::Comment;
use super::models::CommentId;
use super::models::CommentText;
use super::models::NewComment;
use super::ports::CommentRepository;
use super::ports::CommentServicePort;
use crate::domain::bug::models::BugId;
use crate::domain::bug::ports::BugRepository;
use crate::domain::user::models::Actor;
use crate::domain::user::models::UserId;

/// Concrete implementation of CommentServicePort.
pub struct CommentService<CR, BR>
where
    CR: CommentRepository,
    BR: BugRepository,
{
    comment_repository: Arc<CR>,
    bug_repository: Arc<BR>,
}

impl<CR, BR> CommentService<CR, BR>
where
    CR: CommentRepository,
    BR: BugRepository,
{
    /// Create a new comment service.
    ///
    /// # Arguments
    /// * `comment_repository` - Comment persistence implementation
    /// * `bug_repository` - Bug lookups for validation
    pub fn new(comment_repository: Arc<CR>, bug_repository: Arc<BR>) -> Self {
        Self {
            comment_repository,
            bug_repository,
        }
    }

    async fn authored_comment(
        &self,
        id: &CommentId,
        actor: &Actor,
    ) -> Result<Comment, CommentError> {
        let comment = self.get_comment(id).await?;

        if !actor.may_modify(comment.user_id) {
            tracing::warn!(comment_id = %id, actor_id = %actor.id, "Comment change rejected: not author or admin");
            return Err(CommentError::Forbidden(
                "only the comment author or an admin can modify this comment".to_string(),
            ));
        }

        Ok(comment)
    }
}

#[async_trait]
impl<CR, BR> CommentServicePort for CommentService<CR, BR>
where
    CR: CommentRepository,
    BR: BugRepository,
{
    async fn create_comment(&self, comment: NewComment) -> Result<Comment, CommentError> {
        self.bug_repository
            .find_by_id(&comment.bug_id)
            .await
            .map_err(|e| CommentError::DatabaseError(e.to_string()))?
            .ok_or(CommentError::BugNotFound(comment.bug_id.to_string()))?;

        let comment = self.comment_repository.create(comment).await?;

        tracing::info!(comment_id = %comment.id, bug_id = %comment.bug_id, user_id = %comment.user_id, "Comment posted");

        Ok(comment)
    }

    async fn get_comment(&self, id: &CommentId) -> Result<Comment, CommentError> {
        self.comment_repository
            .find_by_id(id)
            .await?
            .ok_or(CommentError::NotFound(id.to_string()))
    }

    async fn list_comments(&self) -> Result<Vec<Comment>, CommentError> {
        self.comment_repository.list_all().await
    }

    async fn list_comments_by_bug(&self, bug_id: &BugId) -> Result<Vec<Comment>, CommentError> {
        self.comment_repository.find_by_bug(bug_id).await
    }

    async fn list_comments_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Comment>, CommentError> {
        self.comment_repository.find_by_user(user_id).await
    }

    async fn update_comment(
        &self,
        id: &CommentId,
        text: CommentText,
        actor: &Actor,
    ) -> Result<Comment, CommentError> {
        let mut comment = self.authored_comment(id, actor).await?;
        comment.comment_text = text;

        let comment = self.comment_repository.update(comment).await?;

        tracing::info!(comment_id = %comment.id, "Comment updated");

        Ok(comment)
    }

    async fn delete_comment(&self, id: &CommentId, actor: &Actor) -> Result<(), CommentError> {
        let comment = self.authored_comment(id, actor).await?;

        self.comment_repository.delete(&comment.id).await?;

        tracing::info!(comment_id = %comment.id, actor_id = %actor.id, "Comment deleted");

        Ok(())
    }

    async fn delete_comments_by_bug(&self, bug_id: &BugId) -> Result<u64, CommentError> {
        let deleted = self.comment_repository.delete_by_bug(bug_id).await?;

        tracing::info!(bug_id = %bug_id, deleted, "Comments deleted for bug");

        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::bug::errors::BugError;
    use crate::domain::bug::models::Bug;
    use crate::domain::bug::models::BugStatus;
    use crate::domain::bug::models::BugTitle;
    use crate::domain::bug::models::NewBug;
    use crate::domain::project::models::ProjectId;
    use crate::domain::user::models::Role;

    mock! {
        pub TestCommentRepository {}

        #[async_trait]
        impl CommentRepository for TestCommentRepository {
            async fn create(&self, comment: NewComment) -> Result<Comment, CommentError>;
            async fn find_by_id(&self, id: &CommentId) -> Result<Option<Comment>, CommentError>;
            async fn list_all(&self) -> Result<Vec<Comment>, CommentError>;
            async fn find_by_bug(&self, bug_id: &BugId) -> Result<Vec<Comment>, CommentError>;
            async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Comment>, CommentError>;
            async fn update(&self, comment: Comment) -> Result<Comment, CommentError>;
            async fn delete(&self, id: &CommentId) -> Result<(), CommentError>;
            async fn delete_by_bug(&self, bug_id: &BugId) -> Result<u64, CommentError>;
        }
    }

    mock! {
        pub TestBugRepository {}

        #[async_trait]
        impl BugRepository for TestBugRepository {
            async fn create(&self, bug: NewBug) -> Result<Bug, BugError>;
            async fn find_by_id(&self, id: &BugId) -> Result<Option<Bug>, BugError>;
            async fn list_all(&self) -> Result<Vec<Bug>, BugError>;
            async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bug>, BugError>;
            async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Bug>, BugError>;
            async fn find_by_reporter(&self, reporter: &UserId) -> Result<Vec<Bug>, BugError>;
            async fn find_by_status(&self, status: BugStatus) -> Result<Vec<Bug>, BugError>;
            async fn update(&self, bug: Bug) -> Result<Bug, BugError>;
            async fn delete(&self, id: &BugId) -> Result<(), BugError>;
        }
    }

    fn comment(id: i64, author: i64) -> Comment {
        Comment {
            id: CommentId(id),
            bug_id: BugId(1),
            user_id: UserId(author),
            comment_text: CommentText::new("Reproduced on main").unwrap(),
            created_at: Utc::now(),
        }
    }

    fn bug(id: i64) -> Bug {
        Bug {
            id: BugId(id),
            title: BugTitle::new("Crash on save").unwrap(),
            description: None,
            status: BugStatus::Open,
            priority: Default::default(),
            project_id: ProjectId(1),
            reported_by: None,
            assigned_to: None,
            created_at: Utc::now(),
        }
    }

    fn actor(id: i64, role: Role) -> Actor {
        Actor {
            id: UserId(id),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_comment_on_missing_bug() {
        let mut comments = MockTestCommentRepository::new();
        let mut bugs = MockTestBugRepository::new();

        bugs.expect_find_by_id().returning(|_| Ok(None));
        comments.expect_create().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(bugs));

        let result = service
            .create_comment(NewComment {
                bug_id: BugId(9),
                user_id: UserId(1),
                comment_text: CommentText::new("hello").unwrap(),
            })
            .await;
        assert!(matches!(result, Err(CommentError::BugNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_comment_success() {
        let mut comments = MockTestCommentRepository::new();
        let mut bugs = MockTestBugRepository::new();

        bugs.expect_find_by_id()
            .with(eq(BugId(1)))
            .returning(|id| Ok(Some(bug(id.0))));
        comments
            .expect_create()
            .times(1)
            .returning(|c| {
                Ok(Comment {
                    id: CommentId(10),
                    bug_id: c.bug_id,
                    user_id: c.user_id,
                    comment_text: c.comment_text,
                    created_at: Utc::now(),
                })
            });

        let service = CommentService::new(Arc::new(comments), Arc::new(bugs));

        let created = service
            .create_comment(NewComment {
                bug_id: BugId(1),
                user_id: UserId(4),
                comment_text: CommentText::new("Reproduced").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, CommentId(10));
        assert_eq!(created.user_id, UserId(4));
    }

    #[tokio::test]
    async fn test_update_comment_by_other_user_forbidden() {
        let mut comments = MockTestCommentRepository::new();
        comments
            .expect_find_by_id()
            .returning(|id| Ok(Some(comment(id.0, 4))));
        comments.expect_update().times(0);

        let service = CommentService::new(Arc::new(comments), Arc::new(MockTestBugRepository::new()));

        let result = service
            .update_comment(
                &CommentId(2),
                CommentText::new("edited").unwrap(),
                &actor(5, Role::User),
            )
            .await;
        assert!(matches!(result, Err(CommentError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_deletes_any_comment() {
        let mut comments = MockTestCommentRepository::new();
        comments
            .expect_find_by_id()
            .returning(|id| Ok(Some(comment(id.0, 4))));
        comments
            .expect_delete()
            .with(eq(CommentId(2)))
            .times(1)
            .returning(|_| Ok(()));

        let service = CommentService::new(Arc::new(comments), Arc::new(MockTestBugRepository::new()));

        service
            .delete_comment(&CommentId(2), &actor(1, Role::Admin))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_comments_by_bug_reports_count() {
        let mut comments = MockTestCommentRepository::new();
        comments
            .expect_delete_by_bug()
            .with(eq(BugId(1)))
            .returning(|_| Ok(3));

        let service = CommentService::new(Arc::new(comments), Arc::new(MockTestBugRepository::new()));

        assert_eq!(service.delete_comments_by_bug(&BugId(1)).await.unwrap(), 3);
    }
}
