use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::raw_field;
use super::UserData;
use crate::domain::user::validation::ProfileUpdatePayload;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .user_service
        .get_profile(&auth_user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                ProfileResponseData { user: user.into() },
            )
        })
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<UpdateProfileRequest>,
) -> Result<ApiSuccess<UpdateProfileResponseData>, ApiError> {
    state
        .user_service
        .update_profile(&auth_user.user_id, body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref user| {
            ApiSuccess::new(
                StatusCode::OK,
                UpdateProfileResponseData {
                    message: "profile updated successfully".to_string(),
                    user: user.into(),
                },
            )
        })
}

/// Profile patch. Password fields are only read to reject them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    username: Option<Value>,
    email: Option<Value>,
    role: Option<Value>,
    password: Option<Value>,
    password_hash: Option<Value>,
}

impl From<UpdateProfileRequest> for ProfileUpdatePayload {
    fn from(body: UpdateProfileRequest) -> Self {
        Self {
            username: raw_field(body.username),
            email: raw_field(body.email),
            role: raw_field(body.role),
            password_supplied: body.password.is_some() || body.password_hash.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub user: UserData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateProfileResponseData {
    pub message: String,
    pub user: UserData,
}
