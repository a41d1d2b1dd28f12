use async_trait::async_trait;

use crate::domain::bug::errors::BugError;
use crate::domain::bug::models::Bug;
use crate::domain::bug::models::BugId;
use crate::domain::bug::models::BugStatus;
use crate::domain::bug::models::NewBug;
use crate::domain::bug::models::UpdateBugCommand;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::UserId;

/// Port for bug operations.
#[async_trait]
pub trait BugServicePort: Send + Sync + 'static {
    /// File a bug against an existing project.
    ///
    /// # Errors
    /// * `ProjectNotFound` - Project does not exist
    /// * `UserNotFound` - Assignee does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_bug(&self, bug: NewBug) -> Result<Bug, BugError>;

    /// Retrieve a bug.
    ///
    /// # Errors
    /// * `NotFound` - Bug does not exist
    async fn get_bug(&self, id: &BugId) -> Result<Bug, BugError>;

    /// List every bug, newest first.
    async fn list_bugs(&self) -> Result<Vec<Bug>, BugError>;

    async fn list_bugs_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bug>, BugError>;

    async fn list_bugs_by_assignee(&self, assignee: &UserId) -> Result<Vec<Bug>, BugError>;

    async fn list_bugs_by_reporter(&self, reporter: &UserId) -> Result<Vec<Bug>, BugError>;

    async fn list_bugs_by_status(&self, status: BugStatus) -> Result<Vec<Bug>, BugError>;

    /// Apply a partial update.
    ///
    /// # Errors
    /// * `NotFound` - Bug does not exist
    /// * `Validation` - Nothing to update
    /// * `UserNotFound` - New assignee does not exist
    async fn update_bug(&self, id: &BugId, command: UpdateBugCommand) -> Result<Bug, BugError>;

    /// Delete a bug; its comments go with it.
    ///
    /// # Errors
    /// * `NotFound` - Bug does not exist
    async fn delete_bug(&self, id: &BugId) -> Result<(), BugError>;
}

/// Persistence operations for bugs.
#[async_trait]
pub trait BugRepository: Send + Sync + 'static {
    async fn create(&self, bug: NewBug) -> Result<Bug, BugError>;

    async fn find_by_id(&self, id: &BugId) -> Result<Option<Bug>, BugError>;

    async fn list_all(&self) -> Result<Vec<Bug>, BugError>;

    async fn find_by_project(&self, project_id: &ProjectId) -> Result<Vec<Bug>, BugError>;

    async fn find_by_assignee(&self, assignee: &UserId) -> Result<Vec<Bug>, BugError>;

    async fn find_by_reporter(&self, reporter: &UserId) -> Result<Vec<Bug>, BugError>;

    async fn find_by_status(&self, status: BugStatus) -> Result<Vec<Bug>, BugError>;

    /// Write the mutable fields of an existing bug.
    ///
    /// # Errors
    /// * `NotFound` - Bug does not exist
    async fn update(&self, bug: Bug) -> Result<Bug, BugError>;

    /// Remove a bug; comments cascade.
    ///
    /// # Errors
    /// * `NotFound` - Bug does not exist
    async fn delete(&self, id: &BugId) -> Result<(), BugError>;
}
