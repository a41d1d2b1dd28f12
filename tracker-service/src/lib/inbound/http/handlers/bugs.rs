use std::str::FromStr;

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
use crate::domain::bug::errors::BugError;
use crate::domain::bug::models::Bug;
use crate::domain::bug::models::BugId;
use crate::domain::bug::models::BugPriority;
use crate::domain::bug::models::BugStatus;
use crate::domain::bug::models::BugTitle;
use crate::domain::bug::models::NewBug;
use crate::domain::bug::models::UpdateBugCommand;
use crate::domain::bug::ports::BugServicePort;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_bugs(
    State(state): State<AppState>,
) -> Result<ApiSuccess<BugsResponseData>, ApiError> {
    state
        .bug_service
        .list_bugs()
        .await
        .map_err(ApiError::from)
        .map(|bugs| ApiSuccess::new(StatusCode::OK, bugs.as_slice().into()))
}

pub async fn get_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BugResponseData>, ApiError> {
    let bug_id = BugId::from_string(&id).map_err(BugError::from)?;

    state
        .bug_service
        .get_bug(&bug_id)
        .await
        .map_err(ApiError::from)
        .map(|ref bug| ApiSuccess::new(StatusCode::OK, BugResponseData { bug: bug.into() }))
}

pub async fn list_bugs_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<ApiSuccess<BugsResponseData>, ApiError> {
    let project_id = ProjectId::from_string(&project_id)
        .map_err(|e| BugError::Validation(e.to_string()))?;

    state
        .bug_service
        .list_bugs_by_project(&project_id)
        .await
        .map_err(ApiError::from)
        .map(|bugs| ApiSuccess::new(StatusCode::OK, bugs.as_slice().into()))
}

pub async fn list_bugs_by_assignee(
    State(state): State<AppState>,
    Path(assignee_id): Path<String>,
) -> Result<ApiSuccess<BugsResponseData>, ApiError> {
    let assignee =
        UserId::from_string(&assignee_id).map_err(|e| BugError::Validation(e.to_string()))?;

    state
        .bug_service
        .list_bugs_by_assignee(&assignee)
        .await
        .map_err(ApiError::from)
        .map(|bugs| ApiSuccess::new(StatusCode::OK, bugs.as_slice().into()))
}

pub async fn list_bugs_by_reporter(
    State(state): State<AppState>,
    Path(reporter_id): Path<String>,
) -> Result<ApiSuccess<BugsResponseData>, ApiError> {
    let reporter =
        UserId::from_string(&reporter_id).map_err(|e| BugError::Validation(e.to_string()))?;

    state
        .bug_service
        .list_bugs_by_reporter(&reporter)
        .await
        .map_err(ApiError::from)
        .map(|bugs| ApiSuccess::new(StatusCode::OK, bugs.as_slice().into()))
}

pub async fn list_bugs_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<ApiSuccess<BugsResponseData>, ApiError> {
    let status = BugStatus::from_str(&status).map_err(BugError::from)?;

    state
        .bug_service
        .list_bugs_by_status(status)
        .await
        .map_err(ApiError::from)
        .map(|bugs| ApiSuccess::new(StatusCode::OK, bugs.as_slice().into()))
}

pub async fn create_bug(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateBugRequest>,
) -> Result<ApiSuccess<BugMutationResponseData>, ApiError> {
    let bug = body.try_into_new_bug(auth_user.user_id)?;

    state
        .bug_service
        .create_bug(bug)
        .await
        .map_err(ApiError::from)
        .map(|ref bug| {
            ApiSuccess::new(
                StatusCode::CREATED,
                BugMutationResponseData::new("bug created successfully", bug),
            )
        })
}

pub async fn update_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateBugRequest>,
) -> Result<ApiSuccess<BugMutationResponseData>, ApiError> {
    let bug_id = BugId::from_string(&id).map_err(BugError::from)?;
    let command = body.try_into_command()?;

    state
        .bug_service
        .update_bug(&bug_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref bug| {
            ApiSuccess::new(
                StatusCode::OK,
                BugMutationResponseData::new("bug updated successfully", bug),
            )
        })
}

pub async fn delete_bug(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let bug_id = BugId::from_string(&id).map_err(BugError::from)?;

    state
        .bug_service
        .delete_bug(&bug_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBugRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    project_id: Option<i64>,
    assigned_to: Option<i64>,
}

impl CreateBugRequest {
    fn try_into_new_bug(self, reporter: UserId) -> Result<NewBug, BugError> {
        let project_id = match self.project_id {
            Some(id) if id > 0 => ProjectId(id),
            Some(_) => return Err(BugError::Validation("invalid project_id".to_string())),
            None => return Err(BugError::Validation("project_id is required".to_string())),
        };

        Ok(NewBug {
            title: BugTitle::new(self.title.as_deref().unwrap_or_default())?,
            description: optional_text(self.description),
            status: self
                .status
                .as_deref()
                .map(BugStatus::from_str)
                .transpose()?
                .unwrap_or_default(),
            priority: self
                .priority
                .as_deref()
                .map(BugPriority::from_str)
                .transpose()?
                .unwrap_or_default(),
            project_id,
            reported_by: Some(reporter),
            assigned_to: assignee(self.assigned_to)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBugRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    priority: Option<String>,
    assigned_to: Option<i64>,
}

impl UpdateBugRequest {
    fn try_into_command(self) -> Result<UpdateBugCommand, BugError> {
        Ok(UpdateBugCommand {
            title: self.title.as_deref().map(BugTitle::new).transpose()?,
            description: optional_text(self.description),
            status: self.status.as_deref().map(BugStatus::from_str).transpose()?,
            priority: self
                .priority
                .as_deref()
                .map(BugPriority::from_str)
                .transpose()?,
            assigned_to: assignee(self.assigned_to)?,
        })
    }
}

fn assignee(id: Option<i64>) -> Result<Option<UserId>, BugError> {
    match id {
        Some(id) if id > 0 => Ok(Some(UserId(id))),
        Some(_) => Err(BugError::Validation("invalid assigned_to".to_string())),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugData {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub project_id: i64,
    pub reported_by: Option<i64>,
    pub assigned_to: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<&Bug> for BugData {
    fn from(bug: &Bug) -> Self {
        Self {
            id: bug.id.0,
            title: bug.title.as_str().to_string(),
            description: bug.description.clone(),
            status: bug.status.as_str().to_string(),
            priority: bug.priority.as_str().to_string(),
            project_id: bug.project_id.0,
            reported_by: bug.reported_by.map(|id| id.0),
            assigned_to: bug.assigned_to.map(|id| id.0),
            created_at: bug.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugResponseData {
    pub bug: BugData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugsResponseData {
    pub bugs: Vec<BugData>,
}

impl From<&[Bug]> for BugsResponseData {
    fn from(bugs: &[Bug]) -> Self {
        Self {
            bugs: bugs.iter().map(BugData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BugMutationResponseData {
    pub message: String,
    pub bug: BugData,
}

impl BugMutationResponseData {
    fn new(message: &str, bug: &Bug) -> Self {
        Self {
            message: message.to_string(),
            bug: bug.into(),
        }
    }
}
