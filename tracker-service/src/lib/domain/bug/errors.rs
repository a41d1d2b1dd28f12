use thiserror::Error;

/// Error for BugId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BugIdError {
    #[error("invalid bug id: {0}")]
    InvalidFormat(String),
}

/// Error for BugTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BugTitleError {
    #[error("bug title is required")]
    Empty,

    #[error("bug title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for BugStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BugStatusError {
    #[error("invalid status: {0} (expected Open, In Progress, Resolved or Closed)")]
    Unknown(String),
}

/// Error for BugPriority parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BugPriorityError {
    #[error("invalid priority: {0} (expected Low, Medium, High or Critical)")]
    Unknown(String),
}

/// Top-level error for bug operations
#[derive(Debug, Clone, Error)]
pub enum BugError {
    #[error("{0}")]
    InvalidBugId(#[from] BugIdError),

    #[error("{0}")]
    InvalidTitle(#[from] BugTitleError),

    #[error("{0}")]
    InvalidStatus(#[from] BugStatusError),

    #[error("{0}")]
    InvalidPriority(#[from] BugPriorityError),

    #[error("{0}")]
    Validation(String),

    #[error("bug not found")]
    NotFound(String),

    #[error("project not found")]
    ProjectNotFound(String),

    #[error("user not found")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
