use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;

use crate::domain::project::models::ProjectId;
use crate::domain::user::models::Actor;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::ChangePasswordCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::PlaintextPassword;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::validation::validate_profile_update;
use crate::domain::user::validation::validate_registration;
use crate::domain::user::validation::ProfileUpdatePayload;
use crate::domain::user::validation::RegistrationPayload;
use crate::domain::user::validation::NO_VALID_FIELDS;
use crate::user::errors::DeleteBlocker;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
/// Argon2 work runs on the blocking pool so request tasks never stall the runtime.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuing
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    async fn run_blocking<T, F>(&self, task: F) -> Result<T, UserError>
    where
        F: FnOnce(&Authenticator) -> T + Send + 'static,
        T: Send + 'static,
    {
        let authenticator = Arc::clone(&self.authenticator);
        tokio::task::spawn_blocking(move || task(&authenticator))
            .await
            .map_err(|e| UserError::Unknown(format!("Blocking task failed: {}", e)))
    }

    async fn hash_password(&self, password: PlaintextPassword) -> Result<String, UserError> {
        let hash = self
            .run_blocking(move |authenticator| authenticator.hash_password(password.expose()))
            .await??;
        Ok(hash)
    }

    async fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, UserError> {
        let password = password.to_string();
        let stored_hash = stored_hash.to_string();
        let verified = self
            .run_blocking(move |authenticator| {
                authenticator.verify_password(&password, &stored_hash)
            })
            .await??;
        Ok(verified)
    }

    async fn existing_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    fn session_for(&self, user: User) -> Result<AuthSession, UserError> {
        let token = self.authenticator.issue_token(user.token_subject())?;
        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, payload: RegistrationPayload) -> Result<AuthSession, UserError> {
        let command = validate_registration(payload)?;

        if self.repository.find_by_email(&command.email).await?.is_some() {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self.hash_password(command.password).await?;

        let user = self
            .repository
            .create(NewUser {
                username: command.username,
                email: command.email,
                password_hash,
                role: command.role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");

        self.session_for(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, UserError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(UserError::Validation(
                "email and password are required".to_string(),
            ));
        }

        // A malformed address cannot belong to anyone.
        let Ok(email) = EmailAddress::new(email) else {
            return Err(UserError::InvalidCredentials);
        };

        let password = password.to_string();

        let Some(user) = self.repository.find_by_email(&email).await? else {
            self.run_blocking(move |authenticator| authenticator.verify_decoy(&password))
                .await??;
            tracing::warn!("Login rejected: unknown email");
            return Err(UserError::InvalidCredentials);
        };

        let (user, outcome) = self
            .run_blocking(move |authenticator| {
                let outcome =
                    authenticator.authenticate(&password, &user.password_hash, user.token_subject());
                (user, outcome)
            })
            .await?;

        let token = match outcome {
            Ok(result) => result.access_token,
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                return Err(UserError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthSession { user, token })
    }

    async fn get_profile(&self, id: &UserId) -> Result<User, UserError> {
        self.existing_user(id).await
    }

    async fn update_profile(
        &self,
        id: &UserId,
        payload: ProfileUpdatePayload,
    ) -> Result<User, UserError> {
        let mut user = self.existing_user(id).await?;

        let command = validate_profile_update(payload)?;

        if let Some(email) = &command.email {
            if let Some(owner) = self.repository.find_by_email(email).await? {
                if owner.id != user.id {
                    return Err(UserError::EmailAlreadyExists(email.to_string()));
                }
            }
        }

        if command.is_empty() {
            return Err(UserError::Validation(NO_VALID_FIELDS.to_string()));
        }

        if let Some(username) = command.username {
            user.username = username;
        }

        if let Some(email) = command.email {
            user.email = email;
        }

        if let Some(role) = command.role {
            user.role = role;
        }

        let updated_user = self.repository.update(user).await?;

        tracing::info!(user_id = %updated_user.id, "Profile updated");

        Ok(updated_user)
    }

    async fn change_password(
        &self,
        id: &UserId,
        command: ChangePasswordCommand,
    ) -> Result<(), UserError> {
        if command.current_password.is_empty() || command.new_password.is_empty() {
            return Err(UserError::Validation(
                "current password and new password are required".to_string(),
            ));
        }

        let new_password = PlaintextPassword::new(command.new_password).map_err(|_| {
            UserError::Validation(format!(
                "new password must be at least {} characters",
                PlaintextPassword::MIN_LENGTH
            ))
        })?;

        let user = self.existing_user(id).await?;

        if !self
            .verify_password(&command.current_password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user.id, "Password change rejected: wrong current password");
            return Err(UserError::IncorrectCurrentPassword);
        }

        let password_hash = self.hash_password(new_password).await?;
        self.repository
            .update_password_hash(&user.id, &password_hash)
            .await?;

        tracing::info!(user_id = %user.id, "Password changed");

        Ok(())
    }

    async fn delete_user(&self, id: &UserId, actor: &Actor) -> Result<(), UserError> {
        if !actor.may_modify(*id) {
            tracing::warn!(user_id = %id, actor_id = %actor.id, "Delete rejected: not owner or admin");
            return Err(UserError::Forbidden(
                "you can only delete your own account".to_string(),
            ));
        }

        let user = self.existing_user(id).await?;

        if self.repository.count_created_projects(&user.id).await? > 0 {
            return Err(UserError::DeleteBlocked(DeleteBlocker::CreatedProjects));
        }

        if self.repository.count_assigned_bugs(&user.id).await? > 0 {
            return Err(UserError::DeleteBlocked(DeleteBlocker::AssignedBugs));
        }

        if self.repository.count_authored_comments(&user.id).await? > 0 {
            return Err(UserError::DeleteBlocked(DeleteBlocker::AuthoredComments));
        }

        self.repository.delete(&user.id).await?;

        tracing::info!(user_id = %user.id, actor_id = %actor.id, "User deleted");

        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn list_project_users(&self, project_id: &ProjectId) -> Result<Vec<User>, UserError> {
        self.repository.find_by_project(project_id).await
    }
}
