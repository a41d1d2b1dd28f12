use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::bug::errors::BugError;
use crate::domain::comment::errors::CommentError;
use crate::domain::project::errors::ProjectError;
use crate::user::errors::UserError;

pub mod bugs;
pub mod comments;
pub mod health;
pub mod projects;
pub mod users;

const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

/// Standardized API success response: the payload is the whole body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON body extractor whose rejections use the API error shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl ApiError {
    /// Log the cause and hide it from the client.
    fn internal(cause: impl std::fmt::Display) -> Self {
        tracing::error!(error = %cause, "Request failed with internal error");
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(_)
            | UserError::InvalidUsername(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidRole(_)
            | UserError::InvalidPassword(_)
            | UserError::Validation(_) => ApiError::BadRequest(err.to_string()),
            UserError::InvalidCredentials | UserError::IncorrectCurrentPassword => {
                ApiError::Unauthorized(err.to_string())
            }
            UserError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_)
            | UserError::DeleteBlocked(_)
            | UserError::StillReferenced => ApiError::Conflict(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::internal(err),
        }
    }
}

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::InvalidProjectId(_)
            | ProjectError::InvalidName(_)
            | ProjectError::Validation(_) => ApiError::BadRequest(err.to_string()),
            ProjectError::NotFound(_) | ProjectError::CreatorNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ProjectError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            ProjectError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<BugError> for ApiError {
    fn from(err: BugError) -> Self {
        match err {
            BugError::InvalidBugId(_)
            | BugError::InvalidTitle(_)
            | BugError::InvalidStatus(_)
            | BugError::InvalidPriority(_)
            | BugError::Validation(_) => ApiError::BadRequest(err.to_string()),
            BugError::NotFound(_) | BugError::ProjectNotFound(_) | BugError::UserNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BugError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<CommentError> for ApiError {
    fn from(err: CommentError) -> Self {
        match err {
            CommentError::InvalidCommentId(_) | CommentError::InvalidText(_) => {
                ApiError::BadRequest(err.to_string())
            }
            CommentError::NotFound(_)
            | CommentError::BugNotFound(_)
            | CommentError::AuthorNotFound(_) => ApiError::NotFound(err.to_string()),
            CommentError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            CommentError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

/// Trimmed free text; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
