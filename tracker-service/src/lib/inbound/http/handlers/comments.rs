use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::bug::models::BugId;
use crate::domain::comment::errors::CommentError;
use crate::domain::comment::models::Comment;
use crate::domain::comment::models::CommentId;
use crate::domain::comment::models::CommentText;
use crate::domain::comment::models::NewComment;
use crate::domain::comment::ports::CommentServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_comments(
    State(state): State<AppState>,
) -> Result<ApiSuccess<CommentsResponseData>, ApiError> {
    state
        .comment_service
        .list_comments()
        .await
        .map_err(ApiError::from)
        .map(|comments| ApiSuccess::new(StatusCode::OK, comments.as_slice().into()))
}

pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<CommentResponseData>, ApiError> {
    let comment_id = CommentId::from_string(&id).map_err(CommentError::from)?;

    state
        .comment_service
        .get_comment(&comment_id)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| {
            ApiSuccess::new(
                StatusCode::OK,
                CommentResponseData {
                    comment: comment.into(),
                },
            )
        })
}

pub async fn list_comments_by_bug(
    State(state): State<AppState>,
    Path(bug_id): Path<String>,
) -> Result<ApiSuccess<CommentsResponseData>, ApiError> {
    let bug_id = parse_bug_id(&bug_id)?;

    state
        .comment_service
        .list_comments_by_bug(&bug_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| ApiSuccess::new(StatusCode::OK, comments.as_slice().into()))
}

pub async fn list_comments_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<CommentsResponseData>, ApiError> {
    let user_id = UserId::from_string(&user_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .comment_service
        .list_comments_by_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|comments| ApiSuccess::new(StatusCode::OK, comments.as_slice().into()))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateCommentRequest>,
) -> Result<ApiSuccess<CommentMutationResponseData>, ApiError> {
    let bug_id = match body.bug_id {
        Some(id) if id > 0 => BugId(id),
        Some(_) => return Err(ApiError::BadRequest("invalid bug_id".to_string())),
        None => return Err(ApiError::BadRequest("bug_id is required".to_string())),
    };

    let comment = NewComment {
        bug_id,
        user_id: auth_user.user_id,
        comment_text: CommentText::new(body.comment_text.as_deref().unwrap_or_default())
            .map_err(CommentError::from)?,
    };

    state
        .comment_service
        .create_comment(comment)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| {
            ApiSuccess::new(
                StatusCode::CREATED,
                CommentMutationResponseData::new("comment created successfully", comment),
            )
        })
}

pub async fn update_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateCommentRequest>,
) -> Result<ApiSuccess<CommentMutationResponseData>, ApiError> {
    let comment_id = CommentId::from_string(&id).map_err(CommentError::from)?;
    let text = CommentText::new(body.comment_text.as_deref().unwrap_or_default())
        .map_err(CommentError::from)?;

    state
        .comment_service
        .update_comment(&comment_id, text, &auth_user.actor())
        .await
        .map_err(ApiError::from)
        .map(|ref comment| {
            ApiSuccess::new(
                StatusCode::OK,
                CommentMutationResponseData::new("comment updated successfully", comment),
            )
        })
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let comment_id = CommentId::from_string(&id).map_err(CommentError::from)?;

    state
        .comment_service
        .delete_comment(&comment_id, &auth_user.actor())
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// Admin only; the router layers `require_admin` in front of it.
pub async fn delete_comments_by_bug(
    State(state): State<AppState>,
    Path(bug_id): Path<String>,
) -> Result<ApiSuccess<BulkDeleteResponseData>, ApiError> {
    let bug_id = parse_bug_id(&bug_id)?;

    state
        .comment_service
        .delete_comments_by_bug(&bug_id)
        .await
        .map_err(ApiError::from)
        .map(|deleted| {
            ApiSuccess::new(
                StatusCode::OK,
                BulkDeleteResponseData {
                    message: format!("deleted {} comments", deleted),
                    deleted,
                },
            )
        })
}

fn parse_bug_id(raw: &str) -> Result<BugId, ApiError> {
    BugId::from_string(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequest {
    bug_id: Option<i64>,
    comment_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCommentRequest {
    comment_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub bug_id: i64,
    pub user_id: i64,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.0,
            bug_id: comment.bug_id.0,
            user_id: comment.user_id.0,
            comment_text: comment.comment_text.as_str().to_string(),
            created_at: comment.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentResponseData {
    pub comment: CommentData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentsResponseData {
    pub comments: Vec<CommentData>,
}

impl From<&[Comment]> for CommentsResponseData {
    fn from(comments: &[Comment]) -> Self {
        Self {
            comments: comments.iter().map(CommentData::from).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentMutationResponseData {
    pub message: String,
    pub comment: CommentData,
}

impl CommentMutationResponseData {
    fn new(message: &str, comment: &Comment) -> Self {
        Self {
            message: message.to_string(),
            comment: comment.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkDeleteResponseData {
    pub message: String,
    pub deleted: u64,
}
