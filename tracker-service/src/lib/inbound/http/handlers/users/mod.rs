use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;

use crate::domain::user::models::User;
use crate::domain::user::validation::RawField;

pub mod change_password;
pub mod delete_user;
pub mod list_users;
pub mod login;
pub mod profile;
pub mod register;

/// Public view of a user. Carries every field except the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersResponseData {
    pub users: Vec<UserData>,
}

impl From<&[User]> for UsersResponseData {
    fn from(users: &[User]) -> Self {
        Self {
            users: users.iter().map(UserData::from).collect(),
        }
    }
}

/// Classify an untyped JSON field. `null` counts as absent.
pub(crate) fn raw_field(value: Option<Value>) -> RawField {
    match value {
        None | Some(Value::Null) => RawField::Absent,
        Some(Value::String(text)) => RawField::Text(text),
        Some(_) => RawField::NonText,
    }
}
