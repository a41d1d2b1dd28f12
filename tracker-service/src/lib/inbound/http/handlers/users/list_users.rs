use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::UsersResponseData;
use crate::domain::project::models::ProjectId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<UsersResponseData>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.as_slice().into()))
}

pub async fn list_project_users(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<ApiSuccess<UsersResponseData>, ApiError> {
    let project_id = ProjectId::from_string(&project_id)
        .map_err(|e| ApiError::from(UserError::Validation(e.to_string())))?;

    state
        .user_service
        .list_project_users(&project_id)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.as_slice().into()))
}
