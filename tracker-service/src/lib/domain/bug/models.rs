use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::bug::errors::BugIdError;
use crate::domain::bug::errors::BugPriorityError;
use crate::domain::bug::errors::BugStatusError;
use crate::domain::bug::errors::BugTitleError;
use crate::domain::project::models::ProjectId;
use crate::domain::user::models::UserId;

/// Bug unique identifier (store-assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BugId(pub i64);

impl BugId {
    /// Parse a bug ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, BugIdError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(BugId(id)),
            _ => Err(BugIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for BugId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Bug title value object (trimmed, 1-200 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BugTitle(String);

impl BugTitle {
    const MAX_LENGTH: usize = 200;

    pub fn new(title: &str) -> Result<Self, BugTitleError> {
        let title = title.trim();
        let length = title.chars().count();

        if length == 0 {
            return Err(BugTitleError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(BugTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Workflow state of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BugStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl BugStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugStatus::Open => "Open",
            BugStatus::InProgress => "In Progress",
            BugStatus::Resolved => "Resolved",
            BugStatus::Closed => "Closed",
        }
    }
}

impl FromStr for BugStatus {
    type Err = BugStatusError;

    /// Case-insensitive; `In Progress` also accepts `in_progress` and `in-progress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "open" => Ok(BugStatus::Open),
            "in progress" => Ok(BugStatus::InProgress),
            "resolved" => Ok(BugStatus::Resolved),
            "closed" => Ok(BugStatus::Closed),
            _ => Err(BugStatusError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for BugStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency of a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BugPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl BugPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            BugPriority::Low => "Low",
            BugPriority::Medium => "Medium",
            BugPriority::High => "High",
            BugPriority::Critical => "Critical",
        }
    }
}

impl FromStr for BugPriority {
    type Err = BugPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(BugPriority::Low),
            "medium" => Ok(BugPriority::Medium),
            "high" => Ok(BugPriority::High),
            "critical" => Ok(BugPriority::Critical),
            _ => Err(BugPriorityError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for BugPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bug aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bug {
    pub id: BugId,
    pub title: BugTitle,
    pub description: Option<String>,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub project_id: ProjectId,
    pub reported_by: Option<UserId>,
    pub assigned_to: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

/// Row to insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBug {
    pub title: BugTitle,
    pub description: Option<String>,
    pub status: BugStatus,
    pub priority: BugPriority,
    pub project_id: ProjectId,
    pub reported_by: Option<UserId>,
    pub assigned_to: Option<UserId>,
}

/// Partial bug update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateBugCommand {
    pub title: Option<BugTitle>,
    pub description: Option<String>,
    pub status: Option<BugStatus>,
    pub priority: Option<BugPriority>,
    pub assigned_to: Option<UserId>,
}

impl UpdateBugCommand {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
    }
}
