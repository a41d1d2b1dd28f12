use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::domain::project::errors::ProjectIdError;
use crate::domain::project::errors::ProjectNameError;
use crate::domain::user::models::UserId;

/// Project unique identifier (store-assigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(pub i64);

impl ProjectId {
    /// Parse a project ID from a path segment.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, ProjectIdError> {
        match s.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(ProjectId(id)),
            _ => Err(ProjectIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Project name value object (trimmed, 1-200 characters)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    const MAX_LENGTH: usize = 200;

    pub fn new(name: &str) -> Result<Self, ProjectNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            return Err(ProjectNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(ProjectNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub name: ProjectName,
    pub description: Option<String>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Row to insert; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: ProjectName,
    pub description: Option<String>,
    pub created_by: UserId,
}

/// Partial project update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectCommand {
    pub name: Option<ProjectName>,
    pub description: Option<String>,
}

impl UpdateProjectCommand {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_name_rules() {
        assert_eq!(ProjectName::new("  Tracker ").unwrap().as_str(), "Tracker");
        assert_eq!(ProjectName::new(" "), Err(ProjectNameError::Empty));
        assert!(matches!(
            ProjectName::new(&"p".repeat(201)),
            Err(ProjectNameError::TooLong { .. })
        ));
    }

    #[test]
    fn test_project_id_parsing() {
        assert_eq!(ProjectId::from_string("12"), Ok(ProjectId(12)));
        assert!(ProjectId::from_string("-1").is_err());
        assert!(ProjectId::from_string("twelve").is_err());
    }
}
