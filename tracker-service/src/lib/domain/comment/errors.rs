use thiserror::Error;

/// Error for CommentId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentIdError {
    #[error("invalid comment id: {0}")]
    InvalidFormat(String),
}

/// Error for CommentText validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommentTextError {
    #[error("comment text is required")]
    Empty,

    #[error("comment too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for comment operations
#[derive(Debug, Clone, Error)]
pub enum CommentError {
    #[error("{0}")]
    InvalidCommentId(#[from] CommentIdError),

    #[error("{0}")]
    InvalidText(#[from] CommentTextError),

    #[error("comment not found")]
    NotFound(String),

    #[error("bug not found")]
    BugNotFound(String),

    #[error("user not found")]
    AuthorNotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
