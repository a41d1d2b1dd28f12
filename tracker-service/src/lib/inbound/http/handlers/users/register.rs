use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::raw_field;
use super::UserData;
use crate::domain::user::models::AuthSession;
use crate::domain::user::validation::RegistrationPayload;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiJson;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

pub async fn register(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .user_service
        .register(body.into())
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registration. Fields stay untyped until validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    username: Option<Value>,
    email: Option<Value>,
    password: Option<Value>,
    role: Option<Value>,
}

impl From<RegisterRequest> for RegistrationPayload {
    fn from(body: RegisterRequest) -> Self {
        Self {
            username: raw_field(body.username),
            email: raw_field(body.email),
            password: raw_field(body.password),
            role: raw_field(body.role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub message: String,
    pub user: UserData,
    pub token: String,
}

impl From<&AuthSession> for RegisterResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            message: "user registered successfully".to_string(),
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}
