use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::bug::models::BugId;
use crate::domain::comment::errors::CommentIdError;
use crate::domain::comment::errors::CommentTextError;
use crate::domain::user::models::UserId;

/// Comment unique identifier (store-assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommentId(pub i64);

impl CommentId {
    pub fn from_string(s: &str) -> Result<Self, CommentIdError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(CommentId(id)),
            _ => Err(CommentIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment body (trimmed, 1-2000 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(String);

impl CommentText {
    const MAX_LENGTH: usize = 2000;

    pub fn new(text: &str) -> Result<Self, CommentTextError> {
        let text = text.trim();
        let length = text.chars().count();

        if length == 0 {
            return Err(CommentTextError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(CommentTextError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Comment left by a user on a bug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub bug_id: BugId,
    pub user_id: UserId,
    pub comment_text: CommentText,
    pub created_at: DateTime<Utc>,
}

/// Row to insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub bug_id: BugId,
    pub user_id: UserId,
    pub comment_text: CommentText,
}
