//! Normalization and validation of untrusted user input.
//!
//! Payload fields arrive as [`RawField`] so type mismatches can be reported
//! separately from missing values. Nothing here touches storage.

use std::str::FromStr;

use crate::user::errors::UserError;
use crate::user::models::EmailAddress;
use crate::user::models::PlaintextPassword;
use crate::user::models::RegisterUserCommand;
use crate::user::models::Role;
use crate::user::models::UpdateProfileCommand;
use crate::user::models::Username;

pub const MISSING_CREDENTIALS: &str =
    "missing credentials, please fill in username, email and password";
pub const INVALID_FIELD_TYPES: &str = "invalid field types";
pub const PASSWORD_NOT_UPDATABLE: &str = "password cannot be updated via profile update";
pub const NO_VALID_FIELDS: &str = "no valid fields to update";

/// A JSON field as received, before type checks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawField {
    #[default]
    Absent,
    NonText,
    Text(String),
}

impl RawField {
    fn is_blank(&self) -> bool {
        match self {
            RawField::Absent => true,
            RawField::NonText => false,
            RawField::Text(text) => text.is_empty(),
        }
    }
}

/// Registration body with untyped fields.
#[derive(Debug, Clone, Default)]
pub struct RegistrationPayload {
    pub username: RawField,
    pub email: RawField,
    pub password: RawField,
    pub role: RawField,
}

/// Profile update body with untyped fields.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdatePayload {
    pub username: RawField,
    pub email: RawField,
    pub role: RawField,
    /// Set when the body carries `password` or `password_hash`.
    pub password_supplied: bool,
}

/// Validate a registration payload into a command.
///
/// # Errors
/// * `Validation` - Missing fields or wrong field types
/// * `InvalidEmail` - Email not shaped like `local@domain.tld`
/// * `InvalidPassword` - Password shorter than 8 characters
/// * `InvalidUsername` - Username blank after trimming or too long
/// * `InvalidRole` - Role string outside the known set
pub fn validate_registration(payload: RegistrationPayload) -> Result<RegisterUserCommand, UserError> {
    if payload.username.is_blank() || payload.email.is_blank() || payload.password.is_blank() {
        return Err(UserError::Validation(MISSING_CREDENTIALS.to_string()));
    }

    let (username, email, password) = match (payload.username, payload.email, payload.password) {
        (RawField::Text(username), RawField::Text(email), RawField::Text(password)) => {
            (username, email, password)
        }
        _ => return Err(UserError::Validation(INVALID_FIELD_TYPES.to_string())),
    };

    let email = EmailAddress::new(&email)?;
    let password = PlaintextPassword::new(password)?;
    let username = Username::new(&username)?;

    let role = match payload.role {
        RawField::Text(role) => Role::from_str(&role)?,
        RawField::Absent | RawField::NonText => Role::default(),
    };

    Ok(RegisterUserCommand {
        username,
        email,
        password,
        role,
    })
}

/// Validate the present fields of a profile update.
///
/// An empty result is not an error here; the caller decides.
///
/// # Errors
/// * `Validation` - Password fields present, or username/email has the wrong type
/// * `InvalidUsername` / `InvalidEmail` / `InvalidRole` - Field value rejected
pub fn validate_profile_update(
    payload: ProfileUpdatePayload,
) -> Result<UpdateProfileCommand, UserError> {
    if payload.password_supplied {
        return Err(UserError::Validation(PASSWORD_NOT_UPDATABLE.to_string()));
    }

    let username = match payload.username {
        RawField::Absent => None,
        RawField::NonText => return Err(UserError::Validation("invalid username".to_string())),
        RawField::Text(username) => Some(Username::new(&username)?),
    };

    let email = match payload.email {
        RawField::Absent => None,
        RawField::NonText => return Err(UserError::Validation("invalid email type".to_string())),
        RawField::Text(email) => Some(EmailAddress::new(&email)?),
    };

    // Same as registration: a role that is not a string is ignored.
    let role = match payload.role {
        RawField::Absent | RawField::NonText => None,
        RawField::Text(role) => Some(Role::from_str(&role)?),
    };

    Ok(UpdateProfileCommand {
        username,
        email,
        role,
    })
}
