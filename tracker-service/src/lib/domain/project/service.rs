use std::sync::Arc;

use async_trait::async_trait;

use super::errors::ProjectError;
use super::models::NewProject;
use super::models::Project;
use super::models::ProjectId;
use super::models::UpdateProjectCommand;
use super::ports::ProjectRepository;
use super::ports::ProjectServicePort;
use crate::domain::user::models::Actor;
use crate::domain::user::models::UserId;

/// Concrete implementation of ProjectServicePort.
pub struct ProjectService<PR>
where
    PR: ProjectRepository,
{
    repository: Arc<PR>,
}

impl<PR> ProjectService<PR>
where
    PR: ProjectRepository,
{
    pub fn new(repository: Arc<PR>) -> Self {
        Self { repository }
    }

    /// Load a project the actor is allowed to modify.
    async fn owned_project(&self, id: &ProjectId, actor: &Actor) -> Result<Project, ProjectError> {
        let project = self.get_project(id).await?;

        if !actor.may_modify(project.created_by) {
            tracing::warn!(project_id = %id, actor_id = %actor.id, "Project change rejected: not creator or admin");
            return Err(ProjectError::Forbidden(
                "only the project creator or an admin can modify this project".to_string(),
            ));
        }

        Ok(project)
    }
}

#[async_trait]
impl<PR> ProjectServicePort for ProjectService<PR>
where
    PR: ProjectRepository,
{
    async fn create_project(&self, project: NewProject) -> Result<Project, ProjectError> {
        let project = self.repository.create(project).await?;

        tracing::info!(project_id = %project.id, created_by = %project.created_by, "Project created");

        Ok(project)
    }

    async fn get_project(&self, id: &ProjectId) -> Result<Project, ProjectError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ProjectError::NotFound(id.to_string()))
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ProjectError> {
        self.repository.list_all().await
    }

    async fn list_projects_by_creator(
        &self,
        creator: &UserId,
    ) -> Result<Vec<Project>, ProjectError> {
        self.repository.find_by_creator(creator).await
    }

    async fn update_project(
        &self,
        id: &ProjectId,
        command: UpdateProjectCommand,
        actor: &Actor,
    ) -> Result<Project, ProjectError> {
        let mut project = self.owned_project(id, actor).await?;

        if command.is_empty() {
            return Err(ProjectError::Validation(
                "no valid fields to update".to_string(),
            ));
        }

        if let Some(name) = command.name {
            project.name = name;
        }

        if let Some(description) = command.description {
            project.description = Some(description);
        }

        let project = self.repository.update(project).await?;

        tracing::info!(project_id = %project.id, "Project updated");

        Ok(project)
    }

    async fn delete_project(&self, id: &ProjectId, actor: &Actor) -> Result<(), ProjectError> {
        let project = self.owned_project(id, actor).await?;

        self.repository.delete(&project.id).await?;

        tracing::info!(project_id = %project.id, actor_id = %actor.id, "Project deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::project::models::ProjectName;
    use crate::domain::user::models::Role;

    mock! {
        pub TestProjectRepository {}

        #[async_trait]
        impl ProjectRepository for TestProjectRepository {
            async fn create(&self, project: NewProject) -> Result<Project, ProjectError>;
            async fn find_by_id(&self, id: &ProjectId) -> Result<Option<Project>, ProjectError>;
            async fn list_all(&self) -> Result<Vec<Project>, ProjectError>;
            async fn find_by_creator(&self, creator: &UserId) -> Result<Vec<Project>, ProjectError>;
            async fn update(&self, project: Project) -> Result<Project, ProjectError>;
            async fn delete(&self, id: &ProjectId) -> Result<(), ProjectError>;
        }
    }

    fn project(id: i64, creator: i64) -> Project {
        Project {
            id: ProjectId(id),
            name: ProjectName::new("Tracker").unwrap(),
            description: None,
            created_by: UserId(creator),
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
    async fn test_get_project_not_found() {
        let mut repository = MockTestProjectRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = ProjectService::new(Arc::new(repository));

        let result = service.get_project(&ProjectId(4)).await;
        assert!(matches!(result, Err(ProjectError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_project_by_creator() {
        let mut repository = MockTestProjectRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(ProjectId(1)))
            .returning(|_| Ok(Some(project(1, 10))));
        repository
            .expect_update()
            .withf(|p| p.name.as_str() == "Renamed" && p.description.as_deref() == Some("docs"))
            .times(1)
            .returning(|p| Ok(p));

        let service = ProjectService::new(Arc::new(repository));

        let updated = service
            .update_project(
                &ProjectId(1),
                UpdateProjectCommand {
                    name: Some(ProjectName::new("Renamed").unwrap()),
                    description: Some("docs".to_string()),
                },
                &actor(10, Role::User),
            )
            .await
            .unwrap();
        assert_eq!(updated.name.as_str(), "Renamed");
    }

    #[tokio::test]
    async fn test_update_project_forbidden_for_non_creator() {
        let mut repository = MockTestProjectRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(project(1, 10))));
        repository.expect_update().times(0);

        let service = ProjectService::new(Arc::new(repository));

        let result = service
            .update_project(
                &ProjectId(1),
                UpdateProjectCommand {
                    name: Some(ProjectName::new("Hijacked").unwrap()),
                    description: None,
                },
                &actor(11, Role::User),
            )
            .await;
        assert!(matches!(result, Err(ProjectError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_update_project_empty_patch() {
        let mut repository = MockTestProjectRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(project(1, 10))));
        repository.expect_update().times(0);

        let service = ProjectService::new(Arc::new(repository));

        let result = service
            .update_project(
                &ProjectId(1),
                UpdateProjectCommand::default(),
                &actor(10, Role::User),
            )
            .await;
        assert!(matches!(result, Err(ProjectError::Validation(_))));
    }

    #[tokio::test]
    async fn test_admin_deletes_any_project() {
        let mut repository = MockTestProjectRepository::new();
        repository
            .expect_find_by_id()
            .returning(|_| Ok(Some(project(1, 10))));
        repository
            .expect_delete()
            .with(eq(ProjectId(1)))
            .times(1)
            .returning(|_| Ok(()));

        let service = ProjectService::new(Arc::new(repository));

        service
            .delete_project(&ProjectId(1), &actor(99, Role::Admin))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_missing_project() {
        let mut repository = MockTestProjectRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = ProjectService::new(Arc::new(repository));

        let result = service
            .delete_project(&ProjectId(1), &actor(10, Role::User))
            .await;
        assert!(matches!(result, Err(ProjectError::NotFound(_))));
    }
}
