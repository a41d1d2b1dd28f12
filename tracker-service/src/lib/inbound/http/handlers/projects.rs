use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::optional_text;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::project::errors::ProjectError;
use crate::domain::project::models::NewProject;
use crate::domain::project::models::Project;
use crate::domain::project::models::ProjectId;
use crate::domain::project::models::ProjectName;
use crate::domain::project::models::UpdateProjectCommand;
use crate::domain::project::ports::ProjectServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_projects(
    State(state): State<AppState>,
) -> Result<ApiSuccess<ProjectsResponseData>, ApiError> {
    state
        .project_service
        .list_projects()
        .await
        .map_err(ApiError::from)
        .map(|projects| ApiSuccess::new(StatusCode::OK, projects.as_slice().into()))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ProjectResponseData>, ApiError> {
    let project_id = ProjectId::from_string(&id).map_err(ProjectError::from)?;

    state
        .project_service
        .get_project(&project_id)
        .await
        .map_err(ApiError::from)
        .map(|ref project| {
            ApiSuccess::new(
                StatusCode::OK,
                ProjectResponseData {
                    project: project.into(),
                },
            )
        })
}

pub async fn list_projects_by_creator(
    State(state): State<AppState>,
    Path(creator_id): Path<String>,
) -> Result<ApiSuccess<ProjectsResponseData>, ApiError> {
    let creator = UserId::from_string(&creator_id)
        .map_err(|e| ProjectError::Validation(e.to_string()))?;

    state
        .project_service
        .list_projects_by_creator(&creator)
        .await
        .map_err(ApiError::from)
        .map(|projects| ApiSuccess::new(StatusCode::OK, projects.as_slice().into()))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateProjectRequest>,
) -> Result<ApiSuccess<ProjectMutationResponseData>, ApiError> {
    let project = NewProject {
        name: ProjectName::new(body.name.as_deref().unwrap_or_default())
            .map_err(ProjectError::from)?,
        description: optional_text(body.description),
        created_by: auth_user.user_id,
    };

    state
        .project_service
        .create_project(project)
        .await
        .map_err(ApiError::from)
        .map(|ref project| {
            ApiSuccess::new(
                StatusCode::CREATED,
                ProjectMutationResponseData::new("project created successfully", project),
            )
        })
}

pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateProjectRequest>,
) -> Result<ApiSuccess<ProjectMutationResponseData>, ApiError> {
    let project_id = ProjectId::from_string(&id).map_err(ProjectError::from)?;

    let command = UpdateProjectCommand {
        name: body
            .name
            .as_deref()
            .map(ProjectName::new)
            .transpose()
            .map_err(ProjectError::from)?,
        description: optional_text(body.description),
    };

    state
        .project_service
        .update_project(&project_id, command, &auth_user.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref project| {
            ApiSuccess::new(
                StatusCode::OK,
                ProjectMutationResponseData::new("project updated successfully", project),
            )
        })
}

pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let project_id = ProjectId::from_string(&id).map_err(ProjectError::from)?;

    state
        .project_service
        .delete_project(&project_id, &auth_user.actor())
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateProjectRequest {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateProjectRequest {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectData {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Project> for ProjectData {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.0,
            name: project.name.as_str().to_string(),
            description: project.description.clone(),
            created_by: project.created_by.0,
            created_at: project.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectResponseData {
    pub project: ProjectData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectsResponseData {
    pub projects: Vec<ProjectData>,
}

impl From<&[Project]> for ProjectsResponseData {
    fn from(projects: &[Project]) -> Self {
        Self {
            projects: projects.iter().map(ProjectData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectMutationResponseData {
    pub message: String,
    pub project: ProjectData,
}

impl ProjectMutationResponseData {
    fn new(message: &str, project: &Project) -> Self {
        Self {
            message: message.to_string(),
            project: project.into(),
        }
    }
}
