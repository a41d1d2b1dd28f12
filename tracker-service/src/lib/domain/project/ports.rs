use async_trait::async_trait;

use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::UpdateProjectCommand;
use crate::domain::user::models::Actor;
use crate::domain::user::models::UserId;

/// Port for project operations.
#[async_trait]
pub trait ProjectServicePort: Send + Sync + 'static {
    /// Create a project owned by its creator.
    ///
    /// # Errors
    /// * `CreatorNotFound` - Creator no longer exists
    /// * `DatabaseError` - Database operation failed
    async fn create_project(&self, project: NewProject) -> Result<Project, ProjectError>;

    /// Retrieve a project.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError>;

    /// List every project, newest first.
    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError>;

    /// List the projects a user created.
    async fn list_projects_by_creator(&self, creator: &UserId)
        -> Result<Vec<Project>, ProjectError>;

    /// Apply a partial update as the creator or an admin.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is neither creator nor admin
    /// * `Validation` - Nothing to update
    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
        actor: &Actor,
    ) -> Result<Project, ProjectError>;

    /// Delete a project and its bugs as the creator or an admin.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `Forbidden` - Caller is neither creator nor admin
    async fn delete_project(&self, id: &ProjectId, actor: &Actor) -> Result<(), ProjectError>;
}

/// Persistence operations for projects.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    /// Persist a new project.
    ///
    /// # Errors
    /// * `CreatorNotFound` - Creator foreign key violated
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, project: NewProject) -> Result<Project, ProjectError>;

    async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;

    async fn list_all(&self) -> Result<Vec<Project>, ProjectError>;

    async fn find_by_creator(&self, creator: &UserId) -> Result<Vec<Project>, ProjectError>;

    /// Write name and description of an existing project.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    async fn update(&self, project: Project) -> Result<Project, ProjectError>;

    /// Delete the project's bugs, then the project, in one transaction.
    ///
    /// # Errors
    /// * `NotFound` - Project does not exist
    /// * `DatabaseError` - Database operation failed (nothing is deleted)
    async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError>;
}
