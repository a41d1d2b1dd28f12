use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use crate::domain::user::models::ChangePasswordCommand;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let command = ChangePasswordCommand {
        current_password: body.current_password.unwrap_or_default(),
        new_password: body.new_password.unwrap_or_default(),
    };

    state
        .user_service
        .change_password(&auth_user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// Accepts both snake_case and camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(alias = "currentPassword")]
    current_password: Option<String>,
    #[serde(alias = "newPassword")]
    new_password: Option<String>,
}
