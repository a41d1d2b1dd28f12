use thiserror::Error;

/// Error for ProjectId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectIdError {
    #[error("invalid project id: {0}")]
    InvalidFormat(String),
}

/// Error for ProjectName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectNameError {
    #[error("project name is required")]
    Empty,

    #[error("project name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for project operations
#[derive(Debug, Clone, Error)]
pub enum ProjectError {
    #[error("{0}")]
    InvalidProjectId(#[from] ProjectIdError),

    #[error("{0}")]
    InvalidName(#[from] ProjectNameError),

    #[error("{0}")]
    Validation(String),

    #[error("project not found")]
    NotFound(String),

    #[error("user not found")]
    CreatorNotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
