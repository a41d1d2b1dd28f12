use std::sync::Arc;

use async_trait::async_trait;

use super::errors::BugError;
use super::models::Bug;
use super::models::BugId;
use super::models::BugStatus;
use super::models::NewBug;
use super::models::UpdateBugCommand;
use super::ports::BugRepository;
use super::ports::BugServicePort;
use crate::domain::project::models::ProjectId;
use crate::domain::project::ports::ProjectRepository;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Concrete implementation of BugServicePort.
///
/// Checks referenced projects and assignees before writing.
pub struct BugService<BR, PR, UR>
where
    BR: BugRepository,
    PR: ProjectRepository,
    UR: UserRepository,
{
    bug_repository: Arc<BR>,
    project_repository: Arc<PR>,
    user_repository: Arc<UR>,
}

impl<BR, PR, UR> BugService<BR, PR, UR>
where
    BR: BugRepository,
    PR: ProjectRepository,
    UR: UserRepository,
{
    /// Create a new bug service with injected dependencies.
    ///
    /// # Arguments
    /// * `bug_repository` - Bug persistence implementation
    /// * `project_repository` - Project lookups for validation
    /// * `user_repository` - Assignee lookups for validation
    pub fn new(
        bug_repository: Arc<BR>,
        project_repository: Arc<PR>,
        user_repository: Arc<UR>,
    ) -> Self {
        Self {
            bug_repository,
            project_repository,
            user_repository,
        }
    }

    async fn ensure_assignee_exists(&self, assignee: Option<UserId>) -> Result<(), BugError> {
        let Some(assignee) = assignee else {
            return Ok(());
        };

        self.user_repository
            .find_by_id(&assignee)
            .await
            .map_err(|e| BugError::DatabaseError(e.to_string()))?
            .ok_or(BugError::UserNotFound(assignee.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl<BR, PR, UR> BugServicePort for BugService<BR, PR, UR>
where
    BR: BugRepository,
    PR: ProjectRepository,
    UR: UserRepository,
{
    async fn create_bug(&self, bug: NewBug) -> Result<Bug, BugError> {
        self.project_repository
            .find_by_id(&bug.project_id)
            .await
            .map_err(|e| BugError::DatabaseError(e.to_string()))?
            .ok_or(BugError::ProjectNotFound(bug.project_id.to_string()))?;

        self.ensure_assignee_exists(bug.assigned_to).await?;

        let bug = self.bug_repository.create(bug).await?;

        tracing::info!(
            bug_id = %bug.id,
            project_id = %bug.project_id,
            status = %bug.status,
            priority = %bug.priority,
            "Bug reported"
        );

        Ok(bug)
    }

    async fn get_bug(&self, id: &BugId) -> Result<Bug, BugError> {
        self.bug_repository
            .find_by_id(id)
            .await?
            .ok_or(BugError::NotFound(id.to_string()))
    }

    async fn list_bugs(&self) -> Result<Vec<Bug>, BugError> {
        self.bug_repository.list_all().await
    }

    async fn list_bugs_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bug>, BugError> {
        self.bug_repository.find_by_project(project_id).await
    }

    async fn list_bugs_by_assignee(&self, assignee: &UserId) -> Result<Vec<Bug>, BugError> {
        self.bug_repository.find_by_assignee(assignee).await
    }

    async fn list_bugs_by_reporter(&self, reporter: &UserId) -> Result<Vec<Bug>, BugError> {
        self.bug_repository.find_by_reporter(reporter).await
    }

    async fn list_bugs_by_status(&self, status: BugStatus) -> Result<Vec<Bug>, BugError> {
        self.bug_repository.find_by_status(status).await
    }

    async fn update_bug(&self, id: &BugId, command: UpdateBugCommand) -> Result<Bug, BugError> {
        let mut bug = self.get_bug(id).await?;

        if command.is_empty() {
            return Err(BugError::Validation("no valid fields to update".to_string()));
        }

        self.ensure_assignee_exists(command.assigned_to).await?;

        if let Some(title) = command.title {
            bug.title = title;
        }
        if let Some(description) = command.description {
            bug.description = Some(description);
        }
        if let Some(status) = command.status {
            bug.status = status;
        }
        if let Some(priority) = command.priority {
            bug.priority = priority;
        }
        if let Some(assignee) = command.assigned_to {
            bug.assigned_to = Some(assignee);
        }

        let bug = self.bug_repository.update(bug).await?;

        tracing::info!(bug_id = %bug.id, status = %bug.status, "Bug updated");

        Ok(bug)
    }

    async fn delete_bug(&self, id: &BugId) -> Result<(), BugError> {
        self.bug_repository.delete(id).await?;

        tracing::info!(bug_id = %id, "Bug deleted");

        Ok(())
    }
}
